use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A known recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// File name shown to the user
    pub name: String,
    /// Full path, unique within a catalog
    pub path: PathBuf,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Ordered list of recordings, unique by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a directory listing: each name joined with `base_dir`
    ///
    /// Order is preserved. Repeated names keep their first occurrence.
    pub fn from_listing<I, S>(base_dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::new();
        for name in names {
            let name = name.into();
            let path = base_dir.join(&name);
            catalog.push(CatalogEntry { name, path });
        }
        catalog
    }

    /// Append unless an entry with the same path exists. Returns whether it was added.
    pub fn push(&mut self, entry: CatalogEntry) -> bool {
        if self.contains(&entry.path) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry with this path, if any
    pub fn remove(&mut self, path: &Path) -> Option<CatalogEntry> {
        let index = self.entries.iter().position(|e| e.path == path)?;
        Some(self.entries.remove(index))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
