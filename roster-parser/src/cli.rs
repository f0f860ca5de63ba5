//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use roster_parser::extract::ParserConfig;

/// Extract duty records from crew roster text files.
///
/// Each input writes `<stem>.duties.json` and `<stem>.log.json` into the
/// output directory; a document that cannot be parsed writes only its log.
#[derive(Debug, Parser)]
#[command(name = "roster-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Roster text files to parse
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the JSON outputs
    #[arg(short, long, env = "ROSTER_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Fragment bound per document
    #[arg(
        long,
        env = "ROSTER_MAX_FRAGMENTS",
        default_value_t = 5000,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_fragments: usize,

    /// Months searched when resolving a weekday and day of month
    #[arg(
        long,
        env = "ROSTER_SEARCH_MONTHS",
        default_value_t = 2,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub search_months: u32,
}

impl Cli {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new(self.max_fragments, self.search_months)
    }
}
