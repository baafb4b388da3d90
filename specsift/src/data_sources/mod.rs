pub mod dta;
pub mod mgf;

use std::path::Path;

use crate::errors::{
    Result,
    SpectrumReadingError,
};
use crate::models::Spectrum;

/// Reads a scan set from `path`.
///
/// A directory is read as a folder of `.dta` scans, one scan per file; an
/// `.mgf` file is read as a peak list collection. Anything else is rejected.
pub fn read_spectra(path: &Path) -> Result<Vec<Spectrum>> {
    if path.is_dir() {
        return dta::read_dta_directory(path);
    }
    match path.extension().and_then(|x| x.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mgf") => mgf::read_mgf_file(path),
        _ => Err(SpectrumReadingError::UnsupportedFormat {
            path: path.to_path_buf(),
        }
        .into()),
    }
}
