use serde::{
    Deserialize,
    Serialize,
};
use specsift::ScreenParams;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::errors::CliError;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Query scan source: a dta directory or an mgf file.
    pub queries: Option<PathBuf>,
    /// Background scan source: a dta directory or an mgf file.
    pub background: Option<PathBuf>,
    /// Output table path; stdout when missing.
    pub output: Option<PathBuf>,
    pub params: ScreenParams,
    /// Drop background peaks at or below this fraction of each scan's base
    /// peak before screening.
    pub library_floor: Option<f64>,
    pub threads: Option<usize>,
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queries: None,
            background: None,
            output: None,
            params: ScreenParams::default(),
            library_floor: None,
            threads: None,
            chunk_size: 512,
        }
    }
}

impl Config {
    pub fn with_cli_args(args: Cli) -> Result<Self, CliError> {
        let mut config = match args.config {
            Some(ref path) => {
                let file = std::fs::File::open(path).map_err(|e| CliError::Io {
                    source: e.to_string(),
                    path: Some(path.to_string_lossy().to_string()),
                })?;
                serde_json::from_reader(file)
                    .map_err(|e| CliError::ParseError { msg: e.to_string() })?
            }
            None => Config::default(),
        };

        // Override config with command line arguments if provided
        if let Some(queries) = args.queries {
            config.queries = Some(queries);
        }
        if let Some(background) = args.background {
            config.background = Some(background);
        }
        if let Some(output) = args.output {
            config.output = Some(output);
        }
        if let Some(significance_height) = args.significance_height {
            config.params.significance_height = significance_height;
        }
        if let Some(precursor_tolerance) = args.precursor_tolerance {
            config.params.precursor_mass_tolerance = precursor_tolerance;
        }
        if let Some(fragment_tolerance) = args.fragment_tolerance {
            config.params.fragment_mass_tolerance = fragment_tolerance;
        }
        if let Some(library_floor) = args.library_floor {
            config.library_floor = Some(library_floor);
        }
        if let Some(threads) = args.threads {
            config.threads = Some(threads);
        }
        if let Some(chunk_size) = args.chunk_size {
            config.chunk_size = chunk_size;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.queries.is_none() {
            return Err(CliError::Config {
                source: "No queries provided, please provide them in either the config file or with the --queries flag".to_string(),
            });
        }
        if self.background.is_none() {
            return Err(CliError::Config {
                source: "No background provided, please provide it in either the config file or with the --background flag".to_string(),
            });
        }
        self.params.validate().map_err(|e| CliError::Config {
            source: format!("{:?}", e),
        })?;
        if let Some(floor) = self.library_floor {
            if !(0.0..1.0).contains(&floor) {
                return Err(CliError::Config {
                    source: format!("library_floor must be in [0, 1), got {}", floor),
                });
            }
        }
        if self.chunk_size == 0 {
            return Err(CliError::Config {
                source: "chunk_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
