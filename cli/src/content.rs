use crate::error::{self, Result};
use log::{debug, trace};
use secretsys_model::constants::STDIN_MARKER;
use snafu::ResultExt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where the secret content comes from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum ContentSource {
    /// The process's standard input, selected with `-`.
    Stdin,
    File(PathBuf),
}

impl ContentSource {
    pub(crate) fn from_arg(arg: &str) -> Self {
        if arg == STDIN_MARKER {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// The path shown in error messages. Standard input is shown as `-`.
    pub(crate) fn path(&self) -> &Path {
        match self {
            Self::Stdin => Path::new(STDIN_MARKER),
            Self::File(path) => path,
        }
    }
}

/// Read all of the content from `source`.
///
/// `stdin` is only read when `source` is [`ContentSource::Stdin`], and it is never closed. A file
/// is closed before this returns, whether or not reading it succeeded.
pub(crate) fn read_content<R>(source: &ContentSource, stdin: &mut R) -> Result<Vec<u8>>
where
    R: Read + ?Sized,
{
    let mut data = Vec::new();
    match source {
        ContentSource::Stdin => {
            debug!("Reading secret content from stdin");
            stdin
                .read_to_end(&mut data)
                .context(error::ContentReadSnafu {
                    path: source.path(),
                })?;
        }
        ContentSource::File(path) => {
            debug!("Reading secret content from '{}'", path.display());
            let mut file = File::open(path).context(error::FileOpenSnafu { path })?;
            file.read_to_end(&mut data)
                .context(error::ContentReadSnafu { path })?;
        }
    }
    trace!("Read {} bytes of secret content", data.len());
    Ok(data)
}
