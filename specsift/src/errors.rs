use std::path::PathBuf;

#[derive(Debug)]
pub enum SpectrumReadingError {
    FileReadingError {
        source: std::io::Error,
        path: PathBuf,
    },
    MalformedRecord {
        path: PathBuf,
        line: Option<usize>,
        msg: String,
    },
    InvalidCharge {
        path: PathBuf,
        found: String,
    },
    UnsupportedFormat {
        path: PathBuf,
    },
}

#[derive(Debug)]
pub enum SpecSiftError {
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },
    Reading(SpectrumReadingError),
    Csv(csv::Error),
    InvalidParams {
        msg: String,
    },
    ExpectedSlicesSameLength {
        expected: usize,
        other: usize,
        context: &'static str,
    },
    ExpectedNonEmptyData {
        context: &'static str,
    },
}

impl std::fmt::Display for SpecSiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type Result<T> = std::result::Result<T, SpecSiftError>;

impl From<SpectrumReadingError> for SpecSiftError {
    fn from(x: SpectrumReadingError) -> Self {
        Self::Reading(x)
    }
}

impl From<csv::Error> for SpecSiftError {
    fn from(x: csv::Error) -> Self {
        Self::Csv(x)
    }
}

impl From<std::io::Error> for SpecSiftError {
    fn from(x: std::io::Error) -> Self {
        Self::Io {
            source: x,
            path: None,
        }
    }
}
