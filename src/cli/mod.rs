//! Admin command line.
//!
//! Offline inspection of exported data: each subcommand reads JSON files,
//! evaluates them with the domain rules, and renders a report. Nothing is
//! written back.

mod check;
mod tally;

pub use check::{run_check, CheckArgs, CheckReport};
pub use tally::{run_tally, TallyArgs, TallyOutput};

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::domain::election::{Election, ElectionError};
use crate::domain::foundation::Timestamp;
use crate::domain::results::ResultsError;

/// Failures of a CLI subcommand.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid election: {0}")]
    InvalidElection(#[from] ElectionError),

    #[error(transparent)]
    Results(#[from] ResultsError),

    #[error("cannot render output: {0}")]
    Render(serde_json::Error),
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an election export and checks its invariants.
pub(crate) fn read_election(path: &Path) -> Result<Election, CliError> {
    let election: Election = read_json(path)?;
    election.validate()?;
    tracing::debug!(election_id = %election.id, path = %path.display(), "election loaded");
    Ok(election)
}

pub(crate) fn instant(at: Option<Timestamp>) -> Timestamp {
    at.unwrap_or_else(Timestamp::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<Election>(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = read_json::<Election>(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
        assert!(err.to_string().starts_with("cannot parse"));
    }
}
