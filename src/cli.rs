use slide_merge::app::AppConfig;
use slide_merge::config::{ConfigError, EngineConfig};
use std::path::PathBuf;
use structopt::clap::Shell;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "slide-merge",
    about = "Slide and merge numbered tiles on a square grid"
)]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(short, long, default_value = "5", help = "Tiles per row and column")]
    size: usize,

    #[structopt(short, long, default_value = "2048", help = "Tile value that wins the game")]
    win: u32,

    #[structopt(long, help = "Random seed")]
    seed: Option<u64>,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "JSON file that keeps the best score between sessions"
    )]
    best_file: Option<PathBuf>,

    #[structopt(long, possible_values = &Shell::variants(), case_insensitive = true, help = "Generate shell completions and exit")]
    pub completions: Option<Shell>,
}

impl Opt {
    pub fn to_app_config(&self) -> Result<AppConfig, ConfigError> {
        Ok(AppConfig {
            engine: EngineConfig::new(self.size, self.win)?,
            seed: self.seed,
            best_file: self.best_file.clone(),
        })
    }
}
