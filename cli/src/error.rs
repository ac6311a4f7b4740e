use secretsys_model::clients;
use snafu::Snafu;
use std::path::PathBuf;

/// The crate-wide result type.
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum Error {
    /// The failure is passed through exactly as the API reported it.
    #[snafu(display("{}", source))]
    Api { source: clients::Error },

    #[snafu(display("Unable to create {}: {}", what, source))]
    Client {
        what: String,
        source: clients::Error,
    },

    #[snafu(display("{}", message))]
    Configuration { message: String },

    #[snafu(display("Error reading content from '{}': {}", path.display(), source))]
    ContentRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to open file '{}': {}", path.display(), source))]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to write output: {}", source))]
    Write { source: std::io::Error },
}
