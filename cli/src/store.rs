use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use sha2::{Digest, Sha256};
use sweeper_core::Record;

/// File extension of saved games.
pub const EXTENSION: &str = "sweeper";

/// Saved games as one encoded [`Record`] per file inside a directory.
#[derive(Clone, Debug)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the save called `name`. Names are restricted so they cannot leave the directory.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        ensure!(!name.is_empty(), "Save name cannot be empty");
        ensure!(
            name.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "Save name {name:?} may only contain letters, digits, '-' and '_'"
        );
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    /// Writes `record` under `name`, creating the directory when missing.
    pub fn save(&self, name: &str, record: &Record) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Could not create save directory {}", self.dir.display()))?;

        let file = fs::File::create(&path)
            .with_context(|| format!("Could not create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        record
            .encode(&mut writer)
            .with_context(|| format!("Could not write {}", path.display()))?;
        writer.flush()?;

        log::debug!("Saved {} moves to {}", record.moves.len(), path.display());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Record> {
        let path = self.path_for(name)?;
        let file = fs::File::open(&path)
            .with_context(|| format!("Could not open save {}", path.display()))?;
        Record::decode(BufReader::new(file))
            .with_context(|| format!("Could not read save {}", path.display()))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.exists())
    }
}

/// Derives a save name from a random value: hex SHA-256 of its little-endian bytes.
pub fn generate_name(salt: i64) -> String {
    Sha256::digest(salt.to_le_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
