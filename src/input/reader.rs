//! Line reader over stdin or a list of files.

use crate::utils::config::STDIN_PATH;
use crate::utils::error::InputError;
use log::{debug, info};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Where one stretch of input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Map a CLI path to a source (`-` is stdin)
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.as_os_str() == STDIN_PATH {
            InputSource::Stdin
        } else {
            InputSource::File(path.to_path_buf())
        }
    }

    fn open(&self) -> Result<Box<dyn BufRead>, InputError> {
        match self {
            InputSource::Stdin => {
                debug!("Reading from standard input");
                Ok(Box::new(io::stdin().lock()))
            }
            InputSource::File(path) => {
                debug!("Opening {}", path.display());
                let file = File::open(path).map_err(|source| InputError::OpenFailed {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// Iterator over raw lines from one or more readers
///
/// Line terminators are stripped. Bytes that are not valid UTF-8 are
/// replaced rather than failing the run, since debug logs routinely
/// contain binary fragments.
pub struct LineSource {
    readers: VecDeque<Box<dyn BufRead>>,
    buf: Vec<u8>,
}

impl LineSource {
    /// Open every path up front; no paths means stdin
    ///
    /// **Public** - main entry point for input
    ///
    /// # Errors
    /// * `InputError::OpenFailed` - a named file cannot be opened
    pub fn open(paths: &[PathBuf]) -> Result<Self, InputError> {
        let sources: Vec<InputSource> = if paths.is_empty() {
            vec![InputSource::Stdin]
        } else {
            paths.iter().map(InputSource::from_path).collect()
        };

        info!("Reading log input from {} source(s)", sources.len());

        let readers = sources
            .iter()
            .map(InputSource::open)
            .collect::<Result<VecDeque<_>, _>>()?;

        Ok(Self {
            readers,
            buf: Vec::new(),
        })
    }

    /// Wrap an in-memory or already open reader
    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        let mut readers: VecDeque<Box<dyn BufRead>> = VecDeque::new();
        readers.push_back(Box::new(reader));
        Self {
            readers,
            buf: Vec::new(),
        }
    }
}

impl Iterator for LineSource {
    type Item = Result<String, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let reader = self.readers.front_mut()?;
            self.buf.clear();

            match reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.readers.pop_front();
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.buf);
                    return Some(Ok(line.trim_end_matches(['\n', '\r']).to_string()));
                }
                Err(e) => {
                    self.readers.pop_front();
                    return Some(Err(InputError::ReadFailed(e)));
                }
            }
        }
    }
}
