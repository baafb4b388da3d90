mod params;
mod spectrum;

pub use params::ScreenParams;
pub use spectrum::{
    Peak,
    Spectrum,
};
