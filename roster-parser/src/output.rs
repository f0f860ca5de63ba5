//! Writing parse results to disk.
//!
//! Each document produces `<stem>.duties.json` and `<stem>.log.json` in the
//! output directory. A failed parse writes only the log.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::extract::{ParseFailure, ParsedRoster};

/// Errors from writing output files.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialise {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Paths of the files written for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub duties: Option<PathBuf>,
    pub log: PathBuf,
}

/// Write the duties and the log of a successful parse.
pub fn write_outputs(
    dir: &Path,
    stem: &str,
    roster: &ParsedRoster,
) -> Result<WrittenFiles, OutputError> {
    let duties = dir.join(format!("{stem}.duties.json"));
    write_json(&duties, &roster.duties)?;
    let log = dir.join(format!("{stem}.log.json"));
    write_json(&log, &roster.log)?;

    Ok(WrittenFiles {
        duties: Some(duties),
        log,
    })
}

/// Write the log of a failed parse.
pub fn write_failure_log(
    dir: &Path,
    stem: &str,
    failure: &ParseFailure,
) -> Result<WrittenFiles, OutputError> {
    let log = dir.join(format!("{stem}.log.json"));
    write_json(&log, &failure.log)?;

    Ok(WrittenFiles { duties: None, log })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)
}
