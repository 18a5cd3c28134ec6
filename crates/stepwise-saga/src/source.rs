use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::MigrateError;

/// Direction a migration file applies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// A migration file: where it lives, what it is called, and optionally its
/// content already loaded in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Directory containing the file.
    pub path: PathBuf,
    /// File name within `path`.
    pub file_name: String,
    /// Version number from the file name prefix.
    pub version: u64,
    /// Name between the version and the direction.
    pub name: String,
    /// Whether the file applies or reverts.
    pub direction: Direction,
    /// In-memory content. When present and non-empty it is used instead of
    /// reading `path/file_name`.
    pub content: Option<Vec<u8>>,
}

impl MigrationFile {
    /// Build a file from its location, parsing version, name and direction
    /// from a `<version>_<name>.<up|down>.<ext>` file name.
    ///
    /// Returns `None` if the file name does not follow that pattern.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let (version, name, direction) = parse_file_name(file_name)?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Some(Self {
            path: dir,
            file_name: file_name.to_string(),
            version,
            name,
            direction,
            content: None,
        })
    }

    /// A file whose content is supplied directly rather than read from disk.
    #[must_use]
    pub fn in_memory(
        version: u64,
        name: impl Into<String>,
        direction: Direction,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::new(),
            file_name: format!("{version}_{name}.{direction}.mig"),
            version,
            name,
            direction,
            content: Some(content.into()),
        }
    }

    /// Full path of the file on disk.
    #[must_use]
    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.file_name)
    }

    fn loaded_content(&self) -> Option<&[u8]> {
        self.content.as_deref().filter(|content| !content.is_empty())
    }
}

fn parse_file_name(file_name: &str) -> Option<(u64, String, Direction)> {
    let mut parts = file_name.splitn(3, '.');
    let stem = parts.next()?;
    let direction = match parts.next()? {
        "up" => Direction::Up,
        "down" => Direction::Down,
        _ => return None,
    };
    parts.next()?;

    let (version, name) = stem.split_once('_')?;
    if name.is_empty() {
        return None;
    }
    let version = version.parse().ok()?;
    Some((version, name.to_string(), direction))
}

/// Read the raw lines of a migration file.
///
/// In-memory content is split on line boundaries. Otherwise the file is read
/// from disk line by line; the handle is closed before returning on every
/// path. Either way, bytes that are not valid UTF-8 are replaced rather than
/// rejected.
///
/// # Errors
///
/// Returns `MigrateError::SourceRead` if the file cannot be opened or read.
pub fn read_lines(file: &MigrationFile) -> Result<Vec<String>, MigrateError> {
    if let Some(content) = file.loaded_content() {
        return Ok(String::from_utf8_lossy(content)
            .split('\n')
            .map(str::to_string)
            .collect());
    }

    let full_path = file.full_path();
    let handle =
        File::open(&full_path).map_err(|e| MigrateError::source_read(full_path.clone(), e))?;

    let mut lines = Vec::new();
    for line in BufReader::new(handle).split(b'\n') {
        let mut line = line.map_err(|e| MigrateError::source_read(full_path.clone(), e))?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        lines.push(String::from_utf8_lossy(&line).into_owned());
    }
    Ok(lines)
}
