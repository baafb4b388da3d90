pub mod data_sources;
pub mod errors;
pub mod models;
pub mod scoring;
pub mod utils;

pub use data_sources::read_spectra;
pub use models::{
    Peak,
    ScreenParams,
    Spectrum,
};
pub use scoring::{
    MatchRow,
    MatchTableWriter,
    Screener,
};
