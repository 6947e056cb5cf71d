//! Mock system implementation for testing

use super::System;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// # Example
/// ```
/// use nios_leases::system::{mock::MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_file("/work/gm.ini", b"[NIOS]\ngm = 192.168.1.10\n")
///     .unwrap();
///
/// assert!(system.exists(Path::new("/work/gm.ini")));
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    current_dir: PathBuf,
    config_dir: Option<PathBuf>,
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MockSystem {
    /// Create a new `MockSystem` rooted at `/` with no configuration directory
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                current_dir: PathBuf::from("/"),
                config_dir: None,
                files: HashMap::new(),
            })),
        }
    }

    /// Set the current working directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_current_dir<P: AsRef<Path>>(self, dir: P) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.current_dir = dir.as_ref().to_path_buf();
        drop(state);
        Ok(self)
    }

    /// Set the user configuration directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_config_dir<P: AsRef<Path>>(self, dir: P) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.config_dir = Some(dir.as_ref().to_path_buf());
        drop(state);
        Ok(self)
    }

    /// Add a file with contents (builder pattern)
    ///
    /// Relative paths are resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal state lock is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let resolved = state.current_dir.join(path.as_ref());
        state.files.insert(resolved, contents.to_vec());
        drop(state);
        Ok(self)
    }

    fn resolve(state: &MockSystemState, path: &Path) -> PathBuf {
        state.current_dir.join(path)
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn current_dir(&self) -> io::Result<PathBuf> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(state.current_dir.clone())
    }

    #[inline]
    fn config_dir(&self) -> Option<PathBuf> {
        self.state.read().ok()?.config_dir.clone()
    }

    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let bytes = state
            .files
            .get(&Self::resolve(&state, path))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                )
            })?
            .clone();
        drop(state);
        String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {e}")))
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        self.state
            .read()
            .is_ok_and(|state| state.files.contains_key(&Self::resolve(&state, path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_files_resolve_against_current_dir() {
        let system = MockSystem::new()
            .with_current_dir("/home/admin")
            .unwrap()
            .with_file("gm.ini", b"[NIOS]")
            .unwrap();

        assert!(system.exists(Path::new("gm.ini")));
        assert!(system.exists(Path::new("/home/admin/gm.ini")));
        assert!(!system.exists(Path::new("/gm.ini")));
        assert_eq!(system.read_to_string(Path::new("gm.ini")).unwrap(), "[NIOS]");
    }

    #[test]
    fn missing_file_is_not_found() {
        let system = MockSystem::new();
        let err = system.read_to_string(Path::new("/nope.ini")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn config_dir_defaults_to_none() {
        let system = MockSystem::new();
        assert!(system.config_dir().is_none());

        let system = system.with_config_dir("/home/admin/.config").unwrap();
        assert_eq!(
            system.config_dir(),
            Some(PathBuf::from("/home/admin/.config"))
        );
    }
}
