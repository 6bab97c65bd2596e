//! Errors surfaced by the `hue-sort` binary.
//!
//! | code | meaning                                             |
//! |------|-----------------------------------------------------|
//! | 2    | clap parse error (before `run`)                     |
//! | 10   | sorting failed                                      |
//! | 11   | source folder or destination root unusable          |
//! | 12   | bad `--config` file or out-of-range flag value      |
//! | 13   | JSON output could not be encoded                    |

use std::path::PathBuf;

use hue_sort_core::SortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The `--config` file could not be read, parsed, or validated.
    #[error("invalid --config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: SortError,
    },

    /// A threshold flag left the classifier settings out of range.
    #[error("invalid value for --{flag}: {value}")]
    InvalidFlag { flag: &'static str, value: String },

    #[error(transparent)]
    Sort(SortError),

    #[error("{0}")]
    Io(String),

    #[error("cannot encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sort(_) => 10,
            CliError::Io(_) => 11,
            CliError::Config { .. } | CliError::InvalidFlag { .. } => 12,
            CliError::Json(_) => 13,
        }
    }

    /// Wraps a failure from `ClassifierConfig::from_json_file`.
    pub fn config(path: impl Into<PathBuf>, source: SortError) -> Self {
        CliError::Config {
            path: path.into(),
            source,
        }
    }

    /// Maps a validation failure after flag overrides back to the flag that
    /// sets the offending parameter.
    pub fn from_validation(err: SortError) -> Self {
        match err {
            SortError::InvalidParameter { name, value } => CliError::InvalidFlag {
                flag: flag_for_parameter(&name),
                value,
            },
            other => CliError::Sort(other),
        }
    }
}

fn flag_for_parameter(name: &str) -> &'static str {
    match name {
        "min_sat" => "min-sat",
        "min_val" => "min-val",
        "bins" => "bins",
        _ => "resize",
    }
}

impl From<SortError> for CliError {
    fn from(e: SortError) -> Self {
        match e {
            SortError::Io(msg) => CliError::Io(msg),
            other => CliError::Sort(other),
        }
    }
}
