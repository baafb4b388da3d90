use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::Path;

use tracing::info;

use crate::errors::{
    Result,
    SpecSiftError,
    SpectrumReadingError,
};
use crate::models::{
    Peak,
    Spectrum,
};

/// Mass of a proton, used to put MGF precursor m/z values on the MH+ scale
/// shared with dta files.
const PROTON_MASS: f64 = 1.007825;

#[derive(Debug, Default)]
struct ScanBlock {
    title: Option<String>,
    charge: Option<u8>,
    precursor_mz: Option<f64>,
    peaks: Vec<Peak>,
}

/// Reads an MGF peak list file.
pub fn read_mgf_file(path: &Path) -> Result<Vec<Spectrum>> {
    let file = File::open(path).map_err(|source| SpectrumReadingError::FileReadingError {
        source,
        path: path.to_path_buf(),
    })?;
    read_mgf(BufReader::new(file), path)
}

/// Line-oriented reader over `BEGIN IONS` / `END IONS` blocks.
///
/// Content outside a block is ignored so global headers are permitted.
/// Inside one, TITLE, CHARGE and PEPMASS are collected, other `KEY=value`
/// lines are skipped, and digit-led lines are peaks. A block must carry all
/// three headers by its `END IONS`; headers never carry over from one block
/// to the next.
pub fn read_mgf<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Spectrum>> {
    let mut spectra = Vec::new();
    let mut current: Option<ScanBlock> = None;

    for (index, line) in reader.lines().enumerate() {
        let lineno = index + 1;
        let line = line.map_err(|source| SpectrumReadingError::FileReadingError {
            source,
            path: path.to_path_buf(),
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "BEGIN IONS" {
            if current.is_some() {
                return Err(malformed(
                    path,
                    lineno,
                    "BEGIN IONS inside an open scan block",
                ));
            }
            current = Some(ScanBlock::default());
            continue;
        }
        if line == "END IONS" {
            match current.take() {
                Some(block) => spectra.push(finish_block(block, path, lineno)?),
                None => {
                    return Err(malformed(
                        path,
                        lineno,
                        "END IONS without a matching BEGIN IONS",
                    ));
                }
            }
            continue;
        }

        let block = match current.as_mut() {
            Some(x) => x,
            None => continue,
        };

        if let Some(value) = line.strip_prefix("TITLE=") {
            block.title = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("CHARGE=") {
            block.charge = Some(parse_charge(value.trim(), path)?);
        } else if let Some(value) = line.strip_prefix("PEPMASS=") {
            // A second token (precursor intensity) may follow the m/z.
            let first = value.split_whitespace().next().unwrap_or("");
            block.precursor_mz = Some(parse_f64(first, path, lineno, "PEPMASS")?);
        } else if line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            block.peaks.push(parse_peak_line(line, path, lineno)?);
        } else if !line.contains('=') {
            return Err(malformed(
                path,
                lineno,
                &format!("unrecognized line in a scan block: {:?}", line),
            ));
        }
        // Unknown KEY=value lines (SCANS, RTINSECONDS, ...) fall through.
    }

    if current.is_some() {
        return Err(SpectrumReadingError::MalformedRecord {
            path: path.to_path_buf(),
            line: None,
            msg: "unterminated scan block at end of file".to_string(),
        }
        .into());
    }
    info!("Read {} mgf scans from {}", spectra.len(), path.display());
    Ok(spectra)
}

fn finish_block(block: ScanBlock, path: &Path, lineno: usize) -> Result<Spectrum> {
    let title = match block.title {
        Some(x) => x,
        None => return Err(malformed(path, lineno, "scan block is missing TITLE")),
    };
    let charge = match block.charge {
        Some(x) => x,
        None => return Err(malformed(path, lineno, "scan block is missing CHARGE")),
    };
    let precursor_mz = match block.precursor_mz {
        Some(x) => x,
        None => return Err(malformed(path, lineno, "scan block is missing PEPMASS")),
    };
    // PEPMASS carries the observed m/z; the precursor gate compares MH+.
    let precursor_mass = charge as f64 * precursor_mz - (charge as f64 - 1.0) * PROTON_MASS;
    Ok(Spectrum::new(title, precursor_mass, charge, block.peaks))
}

/// Charge fields may carry a trailing sign, as in `2+`.
fn parse_charge(value: &str, path: &Path) -> Result<u8> {
    let (magnitude, negative) = match value.as_bytes().last() {
        Some(b'+') => (&value[..value.len() - 1], false),
        Some(b'-') => (&value[..value.len() - 1], true),
        _ => (value, false),
    };
    match magnitude.parse::<u8>() {
        Ok(charge) if !negative && charge >= 1 => Ok(charge),
        _ => Err(SpectrumReadingError::InvalidCharge {
            path: path.to_path_buf(),
            found: value.to_string(),
        }
        .into()),
    }
}

fn parse_f64(token: &str, path: &Path, lineno: usize, what: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(x) => Ok(x),
        Err(_) => Err(malformed(
            path,
            lineno,
            &format!("expected a number for {}, got {:?}", what, token),
        )),
    }
}

fn parse_peak_line(line: &str, path: &Path, lineno: usize) -> Result<Peak> {
    let mut fields = line.split_whitespace();
    let mass = match fields.next() {
        Some(token) => parse_f64(token, path, lineno, "a peak mass")?,
        None => return Err(malformed(path, lineno, "empty peak line")),
    };
    let intensity = match fields.next() {
        Some(token) => parse_f64(token, path, lineno, "a peak intensity")?,
        None => {
            return Err(malformed(
                path,
                lineno,
                "peak line without an intensity column",
            ));
        }
    };
    // Further columns (per peak charge annotations) are ignored.
    Ok(Peak { mass, intensity })
}

fn malformed(path: &Path, lineno: usize, msg: &str) -> SpecSiftError {
    SpectrumReadingError::MalformedRecord {
        path: path.to_path_buf(),
        line: Some(lineno),
        msg: msg.to_string(),
    }
    .into()
}
