// Lexora – A word game
// Copyright (C) 2024  The Lexora developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;

/// Durable home of the progression blob. The blob is opaque to the
/// store.
pub trait Store {
    fn load(&mut self) -> Result<Option<String>, Error>;
    fn save(&mut self, blob: &str) -> Result<(), Error>;
    fn clear(&mut self) -> Result<(), Error>;
}

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Unavailable(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => e.fmt(f),
            Error::Unavailable(reason) => {
                write!(f, "storage unavailable: {}", reason)
            },
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug)]
pub struct MemoryStore {
    blob: Option<String>,
    available: bool,
    n_saves: usize,
}

impl Default for MemoryStore {
    fn default() -> MemoryStore {
        MemoryStore::new()
    }
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore {
            blob: None,
            available: true,
            n_saves: 0,
        }
    }

    pub fn with_blob(blob: &str) -> MemoryStore {
        MemoryStore {
            blob: Some(blob.to_string()),
            ..MemoryStore::new()
        }
    }

    /// A store where every operation fails.
    pub fn unavailable() -> MemoryStore {
        MemoryStore {
            available: false,
            ..MemoryStore::new()
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    pub fn n_saves(&self) -> usize {
        self.n_saves
    }

    fn check_available(&self) -> Result<(), Error> {
        if self.available {
            Ok(())
        } else {
            Err(Error::Unavailable("memory store disabled".to_string()))
        }
    }
}

impl Store for MemoryStore {
    fn load(&mut self) -> Result<Option<String>, Error> {
        self.check_available()?;
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<(), Error> {
        self.check_available()?;
        self.blob = Some(blob.to_string());
        self.n_saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.check_available()?;
        self.blob = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::path::{Path, PathBuf};
    use std::{fs, io};
    use super::{Error, Store};

    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new<P: AsRef<Path>>(path: P) -> FileStore {
            FileStore {
                path: path.as_ref().to_path_buf(),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Store for FileStore {
        fn load(&mut self) -> Result<Option<String>, Error> {
            match fs::read_to_string(&self.path) {
                Ok(s) => Ok(Some(s)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn save(&mut self, blob: &str) -> Result<(), Error> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }

            // Write to a sibling file first so that a failed write
            // doesn’t destroy the previous save
            let mut tmp_path = self.path.clone().into_os_string();
            tmp_path.push(".tmp");

            fs::write(&tmp_path, blob)?;
            fs::rename(&tmp_path, &self.path)?;

            Ok(())
        }

        fn clear(&mut self) -> Result<(), Error> {
            match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}
