//! File access used while resolving includes

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

/// Opens config files and expands include patterns
pub trait ConfigFs: Send + Sync {
    /// Open a file for reading
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Expand a glob pattern into the matching paths, sorted
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>>;
}

/// Whether an include argument is a pattern rather than a literal path
pub fn has_magic(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn bad_pattern(err: glob::PatternError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// The real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl ConfigFs for OsFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(path)?))
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in glob::glob(pattern).map_err(bad_pattern)? {
            paths.push(entry.map_err(glob::GlobError::into_error)?);
        }
        paths.sort();
        Ok(paths)
    }
}

/// An in-memory file tree
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    files: BTreeMap<PathBuf, String>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl ConfigFs for MemFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        match self.files.get(path) {
            Some(contents) => Ok(Box::new(Cursor::new(contents.as_bytes()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no such file or directory",
            )),
        }
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let pattern = Pattern::new(pattern).map_err(bad_pattern)?;
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };
        // BTreeMap keys come out sorted
        Ok(self
            .files
            .keys()
            .filter(|path| pattern.matches_path_with(path, options))
            .cloned()
            .collect())
    }
}
