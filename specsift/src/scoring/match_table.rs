use std::io::Write;

use crate::errors::Result;
use crate::models::Spectrum;

/// Stands in for the reference scan id when no background scan passed the
/// precursor gate.
pub const NO_MATCH_MARKER: &str = "no_bckgr_spectra_with_same_precursor_mass";
/// Fills the reference mass and charge columns of a marker row.
pub const NOT_FOUND: &str = "not_found";
/// Score column of a marker row, kept as a fixed literal so downstream
/// filters can grep for it.
pub const NO_MATCH_SCORE: &str = "1.00";

/// One output row of a screening run.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchRow {
    Hit {
        query_scan_id: String,
        reference_scan_id: String,
        query_precursor_mass: f64,
        reference_precursor_mass: f64,
        query_charge: u8,
        reference_charge: u8,
        combined_score: f64,
    },
    NoMatch {
        query_scan_id: String,
        query_precursor_mass: f64,
        query_charge: u8,
    },
}

impl MatchRow {
    pub fn hit(query: &Spectrum, reference: &Spectrum, combined_score: f64) -> Self {
        Self::Hit {
            query_scan_id: query.scan_id.clone(),
            reference_scan_id: reference.scan_id.clone(),
            query_precursor_mass: query.precursor_mass,
            reference_precursor_mass: reference.precursor_mass,
            query_charge: query.charge,
            reference_charge: reference.charge,
            combined_score,
        }
    }

    pub fn no_match(query: &Spectrum) -> Self {
        Self::NoMatch {
            query_scan_id: query.scan_id.clone(),
            query_precursor_mass: query.precursor_mass,
            query_charge: query.charge,
        }
    }
}

/// Writes match rows as headerless tab-separated records, seven columns per
/// row: query id, reference id, query mass, reference mass, query charge,
/// reference charge, score. Scores carry four decimals; marker rows fill the
/// reference columns with the fixed literals above.
pub struct MatchTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> MatchTableWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .delimiter(b'\t')
                .has_headers(false)
                .from_writer(writer),
        }
    }

    pub fn write_row(&mut self, row: &MatchRow) -> Result<()> {
        match row {
            MatchRow::Hit {
                query_scan_id,
                reference_scan_id,
                query_precursor_mass,
                reference_precursor_mass,
                query_charge,
                reference_charge,
                combined_score,
            } => {
                let query_mass = query_precursor_mass.to_string();
                let reference_mass = reference_precursor_mass.to_string();
                let query_charge = query_charge.to_string();
                let reference_charge = reference_charge.to_string();
                let score = format!("{:.4}", combined_score);
                self.writer.write_record([
                    query_scan_id.as_str(),
                    reference_scan_id.as_str(),
                    query_mass.as_str(),
                    reference_mass.as_str(),
                    query_charge.as_str(),
                    reference_charge.as_str(),
                    score.as_str(),
                ])?;
            }
            MatchRow::NoMatch {
                query_scan_id,
                query_precursor_mass,
                query_charge,
            } => {
                let query_mass = query_precursor_mass.to_string();
                let query_charge = query_charge.to_string();
                self.writer.write_record([
                    query_scan_id.as_str(),
                    NO_MATCH_MARKER,
                    query_mass.as_str(),
                    NOT_FOUND,
                    query_charge.as_str(),
                    NOT_FOUND,
                    NO_MATCH_SCORE,
                ])?;
            }
        }
        Ok(())
    }

    pub fn write_all(&mut self, rows: &[MatchRow]) -> Result<()> {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_row_format() {
        let mut buf = Vec::new();
        {
            let mut writer = MatchTableWriter::new(&mut buf);
            writer
                .write_row(&MatchRow::Hit {
                    query_scan_id: "q/scan1.dta".to_string(),
                    reference_scan_id: "b/scan9.dta".to_string(),
                    query_precursor_mass: 1000.0,
                    reference_precursor_mass: 1000.25,
                    query_charge: 2,
                    reference_charge: 2,
                    combined_score: 48.0 / 137.0,
                })
                .unwrap();
            writer.flush().unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "q/scan1.dta\tb/scan9.dta\t1000\t1000.25\t2\t2\t0.3504\n");
    }

    #[test]
    fn test_no_match_row_format() {
        let mut buf = Vec::new();
        {
            let mut writer = MatchTableWriter::new(&mut buf);
            writer
                .write_row(&MatchRow::NoMatch {
                    query_scan_id: "q/scan2.dta".to_string(),
                    query_precursor_mass: 888.5,
                    query_charge: 3,
                })
                .unwrap();
            writer.flush().unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "q/scan2.dta\tno_bckgr_spectra_with_same_precursor_mass\t888.5\tnot_found\t3\tnot_found\t1.00\n"
        );
    }

    #[test]
    fn test_score_rounding() {
        let mut buf = Vec::new();
        {
            let mut writer = MatchTableWriter::new(&mut buf);
            writer
                .write_row(&MatchRow::Hit {
                    query_scan_id: "a".to_string(),
                    reference_scan_id: "b".to_string(),
                    query_precursor_mass: 1.0,
                    reference_precursor_mass: 1.0,
                    query_charge: 1,
                    reference_charge: 1,
                    combined_score: 0.000123,
                })
                .unwrap();
            writer.flush().unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        let score = out.trim_end().rsplit('\t').next();
        assert_eq!(score, Some("0.0001"));
    }
}
