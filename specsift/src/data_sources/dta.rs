use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use tracing::{
    debug,
    info,
};

use crate::errors::{
    Result,
    SpectrumReadingError,
};
use crate::models::{
    Peak,
    Spectrum,
};

/// Reads every `.dta` file under `dir` as one scan.
///
/// Files are processed in ascending file name order so the scan enumeration
/// (and with it the output row order) does not depend on the filesystem.
/// Entries without a `.dta` extension are skipped.
pub fn read_dta_directory(dir: &Path) -> Result<Vec<Spectrum>> {
    let entries = fs::read_dir(dir).map_err(|source| SpectrumReadingError::FileReadingError {
        source,
        path: dir.to_path_buf(),
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SpectrumReadingError::FileReadingError {
            source,
            path: dir.to_path_buf(),
        })?;
        let path = entry.path();
        let is_dta = path
            .extension()
            .and_then(|x| x.to_str())
            .is_some_and(|x| x.eq_ignore_ascii_case("dta"));
        if path.is_file() && is_dta {
            paths.push(path);
        } else {
            debug!("Skipping non-dta entry {}", path.display());
        }
    }
    paths.sort();

    let mut spectra = Vec::with_capacity(paths.len());
    for path in paths.iter() {
        spectra.push(read_dta_file(path)?);
    }
    info!("Read {} dta scans from {}", spectra.len(), dir.display());
    Ok(spectra)
}

/// Parses a single `.dta` file.
///
/// The format is a whitespace separated token stream: the first pair is the
/// MH+ precursor mass and the charge, every following pair a fragment
/// `(mass, intensity)`. A header-only file is a valid zero-peak scan. The
/// file path becomes the scan id.
pub fn read_dta_file(path: &Path) -> Result<Spectrum> {
    let content =
        fs::read_to_string(path).map_err(|source| SpectrumReadingError::FileReadingError {
            source,
            path: path.to_path_buf(),
        })?;
    let mut tokens = content.split_whitespace();

    let precursor_mass = match tokens.next() {
        Some(token) => parse_f64(token, path, "the precursor mass")?,
        None => {
            return Err(SpectrumReadingError::MalformedRecord {
                path: path.to_path_buf(),
                line: None,
                msg: "empty file, expected a precursor mass and charge header".to_string(),
            }
            .into());
        }
    };
    let charge = match tokens.next() {
        Some(token) => parse_charge(token, path)?,
        None => {
            return Err(SpectrumReadingError::MalformedRecord {
                path: path.to_path_buf(),
                line: None,
                msg: "missing charge after the precursor mass".to_string(),
            }
            .into());
        }
    };

    let mut peaks = Vec::new();
    while let Some(mass_token) = tokens.next() {
        let mass = parse_f64(mass_token, path, "a peak mass")?;
        let intensity = match tokens.next() {
            Some(token) => parse_f64(token, path, "a peak intensity")?,
            None => {
                return Err(SpectrumReadingError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: None,
                    msg: format!("peak mass {} has no paired intensity", mass_token),
                }
                .into());
            }
        };
        peaks.push(Peak { mass, intensity });
    }

    Ok(Spectrum::new(
        path.display().to_string(),
        precursor_mass,
        charge,
        peaks,
    ))
}

fn parse_f64(token: &str, path: &Path, what: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(x) => Ok(x),
        Err(_) => Err(SpectrumReadingError::MalformedRecord {
            path: path.to_path_buf(),
            line: None,
            msg: format!("expected a number for {}, got {:?}", what, token),
        }
        .into()),
    }
}

fn parse_charge(token: &str, path: &Path) -> Result<u8> {
    let charge: u8 = token
        .parse()
        .map_err(|_| SpectrumReadingError::InvalidCharge {
            path: path.to_path_buf(),
            found: token.to_string(),
        })?;
    if charge < 1 {
        return Err(SpectrumReadingError::InvalidCharge {
            path: path.to_path_buf(),
            found: token.to_string(),
        }
        .into());
    }
    Ok(charge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SpecSiftError;
    use tempfile::TempDir;

    fn write_scan(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_reads_header_and_peaks() {
        let dir = TempDir::new().unwrap();
        write_scan(
            dir.path(),
            "a.dta",
            "1479.79 2\n300.1 15.0\n1203.4 40.5\n",
        );
        let spectra = read_dta_directory(dir.path()).unwrap();
        assert_eq!(spectra.len(), 1);
        let scan = &spectra[0];
        assert_eq!(scan.precursor_mass, 1479.79);
        assert_eq!(scan.charge, 2);
        assert_eq!(scan.peaks.len(), 2);
        assert_eq!(scan.max_intensity, 40.5);
        assert!(scan.scan_id.ends_with("a.dta"));
    }

    #[test]
    fn test_directory_order_is_by_file_name() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "b.dta", "1100.0 2\n");
        write_scan(dir.path(), "a.dta", "1000.0 2\n");
        write_scan(dir.path(), "c.dta", "1200.0 2\n");
        let spectra = read_dta_directory(dir.path()).unwrap();
        let masses: Vec<f64> = spectra.iter().map(|x| x.precursor_mass).collect();
        assert_eq!(masses, vec![1000.0, 1100.0, 1200.0]);
    }

    #[test]
    fn test_skips_other_extensions() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "a.dta", "1000.0 2\n");
        write_scan(dir.path(), "notes.txt", "not a scan");
        let spectra = read_dta_directory(dir.path()).unwrap();
        assert_eq!(spectra.len(), 1);
    }

    #[test]
    fn test_unsorted_peaks_are_sorted() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "a.dta", "1000.0 2 500.0 1.0 100.0 2.0");
        let spectra = read_dta_directory(dir.path()).unwrap();
        let masses: Vec<f64> = spectra[0].peaks.iter().map(|x| x.mass).collect();
        assert_eq!(masses, vec![100.0, 500.0]);
    }

    #[test]
    fn test_header_only_file_is_a_zero_peak_scan() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "a.dta", "1000.0 2\n");
        let spectra = read_dta_directory(dir.path()).unwrap();
        assert!(spectra[0].peaks.is_empty());
        assert_eq!(spectra[0].max_intensity, 0.0);
    }

    #[test]
    fn test_trailing_unpaired_mass_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "a.dta", "1000.0 2\n300.0 15.0\n400.0\n");
        let result = read_dta_directory(dir.path());
        match result {
            Err(SpecSiftError::Reading(SpectrumReadingError::MalformedRecord { .. })) => {}
            other => panic!("Expected a malformed record error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_token_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "a.dta", "1000.0 2\nabc 15.0\n");
        assert!(read_dta_directory(dir.path()).is_err());
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "a.dta", "");
        assert!(read_dta_directory(dir.path()).is_err());
    }

    #[test]
    fn test_zero_charge_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "a.dta", "1000.0 0\n300.0 15.0\n");
        let result = read_dta_directory(dir.path());
        match result {
            Err(SpecSiftError::Reading(SpectrumReadingError::InvalidCharge { .. })) => {}
            other => panic!("Expected an invalid charge error, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_charge_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_scan(dir.path(), "a.dta", "1000.0 2.0\n300.0 15.0\n");
        assert!(read_dta_directory(dir.path()).is_err());
    }
}
