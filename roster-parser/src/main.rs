mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use roster_parser::extract::{ParserConfig, parse_roster};
use roster_parser::output::{write_failure_log, write_outputs};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.parser_config();

    let mut failed = 0;
    for input in &cli.inputs {
        if !process(input, &cli.output_dir, &config) {
            failed += 1;
        }
    }

    info!(documents = cli.inputs.len(), failed, "done");
    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Parse one file and write its outputs. Returns false on any failure.
fn process(input: &Path, output_dir: &Path, config: &ParserConfig) -> bool {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "roster".to_string());

    let text = match std::fs::read_to_string(input) {
        Ok(text) => text,
        Err(e) => {
            error!(input = %input.display(), "failed to read input: {e}");
            return false;
        }
    };

    let (written, parsed) = match parse_roster(Some(&text), config) {
        Ok(roster) => {
            info!(
                input = %input.display(),
                duties = roster.duties.len(),
                "extracted roster"
            );
            (write_outputs(output_dir, &stem, &roster), true)
        }
        Err(failure) => {
            error!(input = %input.display(), "roster could not be parsed: {}", failure.error);
            (write_failure_log(output_dir, &stem, &failure), false)
        }
    };

    match written {
        Ok(files) => {
            info!(log = %files.log.display(), "wrote outputs");
            parsed
        }
        Err(e) => {
            error!("{e}");
            false
        }
    }
}
