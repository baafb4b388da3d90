use indicatif::{
    ProgressIterator,
    ProgressStyle,
};
use specsift::data_sources::read_spectra;
use specsift::models::Spectrum;
use specsift::scoring::{
    MatchTableWriter,
    Screener,
};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{
    info,
    warn,
};

use crate::config::Config;
use crate::errors::CliError;

fn load_set(what: &str, path: &Path) -> Result<Vec<Spectrum>, CliError> {
    let st = Instant::now();
    let spectra = read_spectra(path)?;
    info!(
        "Loaded {} {} scans from {} in {:?}",
        spectra.len(),
        what,
        path.display(),
        st.elapsed()
    );
    Ok(spectra)
}

pub fn run_screen(config: &Config) -> Result<(), CliError> {
    let queries_path = match config.queries {
        Some(ref x) => x,
        None => {
            return Err(CliError::Config {
                source: "No queries provided".to_string(),
            });
        }
    };
    let background_path = match config.background {
        Some(ref x) => x,
        None => {
            return Err(CliError::Config {
                source: "No background provided".to_string(),
            });
        }
    };

    let queries = load_set("query", queries_path)?;
    if queries.is_empty() {
        return Err(CliError::Config {
            source: format!("No query scans found in {}", queries_path.display()),
        });
    }
    let mut background = load_set("background", background_path)?;
    if background.is_empty() {
        warn!("Background set is empty; every query will report the no-match marker row");
    }
    if let Some(floor) = config.library_floor {
        background = background.iter().map(|x| x.strip_below(floor)).collect();
        info!(
            "Dropped background peaks at or below {} of each base peak",
            floor
        );
    }

    let screener = Screener::new(background, config.params.clone());

    let out: Box<dyn Write> = match config.output {
        Some(ref path) => Box::new(std::fs::File::create(path).map_err(|e| CliError::Io {
            source: e.to_string(),
            path: Some(path.to_string_lossy().to_string()),
        })?),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = MatchTableWriter::new(out);

    let mut nrows = 0;
    let mut chunk_num = 0;
    let start = Instant::now();
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .unwrap();
    for chunk in queries.chunks(config.chunk_size).progress_with_style(style) {
        // Parallelism happens here within the screen_iter function
        let rows = screener.screen_iter(chunk);
        nrows += rows.len();
        writer.write_all(&rows)?;
        chunk_num += 1;
    }
    writer.flush()?;

    info!(
        "Wrote {} rows for {} query scans against {} background scans",
        nrows,
        queries.len(),
        screener.background.len()
    );
    info!(
        "Finished processing {} chunks in {:?}",
        chunk_num,
        start.elapsed()
    );
    Ok(())
}
