//! CLI error handling with user-friendly messages.

use lastfm_tiler::config::ConfigError;
use lastfm_tiler::grid::GridError;
use lastfm_tiler::provider::{HttpError, ProviderError};
use std::fmt;
use std::path::PathBuf;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Invalid flags or settings
    Config(ConfigError),
    /// Couldn't start the async runtime
    Runtime(std::io::Error),
    /// Couldn't build the HTTP client
    HttpClient(HttpError),
    /// Grid build failed for one user
    Build { user: String, error: GridError },
    /// Failed to encode or write an output image
    FileWrite {
        path: PathBuf,
        error: image::ImageError,
    },
    /// Some users failed; details were reported as they happened
    Incomplete { failed: usize, total: usize },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        self.report();
        process::exit(1)
    }

    /// Print the error, plus a hint for the common mistakes, to stderr.
    pub fn report(&self) {
        eprintln!("Error: {}", self);
        if let Some(hint) = self.hint() {
            eprintln!();
            eprintln!("{}", hint);
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Config(ConfigError::MissingApiKey) => Some(
                "Pass --lastfm-api-key or set LASTFM_API_KEY.\n\
                 Keys are issued at https://www.last.fm/api/account/create",
            ),
            CliError::Build {
                error: GridError::Provider(ProviderError::Api { code: 6, .. }),
                ..
            } => Some("Check the spelling of the user name."),
            CliError::Build {
                error: GridError::Provider(ProviderError::Api { code: 10, .. }),
                ..
            } => Some("Last.fm rejected the API key. Check --lastfm-api-key or LASTFM_API_KEY."),
            _ => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Build { user, error } => {
                write!(f, "Failed to build grid for '{}': {}", user, error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
            CliError::Incomplete { failed, total } => {
                write!(f, "{} of {} grids could not be built", failed, total)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Build { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Incomplete { .. } => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<HttpError> for CliError {
    fn from(e: HttpError) -> Self {
        CliError::HttpClient(e)
    }
}
