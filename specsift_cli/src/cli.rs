use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Query scans: a .dta directory or an .mgf file (will over-write the config file)
    #[arg(short, long)]
    pub queries: Option<PathBuf>,

    /// Background scans: a .dta directory or an .mgf file (will over-write the config file)
    #[arg(short, long)]
    pub background: Option<PathBuf>,

    /// Path to the output table (stdout when not given)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fraction of the base peak intensity below which peaks are ignored
    #[arg(long)]
    pub significance_height: Option<f64>,

    /// Half-width of the precursor mass gate, in Da
    #[arg(long)]
    pub precursor_tolerance: Option<f64>,

    /// Half-width of the fragment match window, in Da
    #[arg(long)]
    pub fragment_tolerance: Option<f64>,

    /// Drop background peaks at or below this fraction of the base peak
    /// before screening
    #[arg(long)]
    pub library_floor: Option<f64>,

    /// Number of worker threads (defaults to all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Number of queries scored per progress step
    #[arg(long)]
    pub chunk_size: Option<usize>,
}
