use std::path::{Path, PathBuf};

/// A directory or file produced by a run, relative to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEntry {
    pub destination: PathBuf,
    /// File contents. `None` marks a directory.
    pub content: Option<String>,
}
impl VirtualEntry {
    pub fn is_file(&self) -> bool {
        self.content.is_some()
    }
}

/// Ordered record of everything a run wrote, or would write in a dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualFS {
    pub entries: Vec<VirtualEntry>,
}
impl VirtualFS {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_dir(&mut self, destination: impl Into<PathBuf>) {
        self.entries.push(VirtualEntry {
            destination: destination.into(),
            content: None,
        });
    }

    pub fn push_file(&mut self, destination: impl Into<PathBuf>, content: String) {
        self.entries.push(VirtualEntry {
            destination: destination.into(),
            content: Some(content),
        });
    }

    pub fn get(&self, destination: impl AsRef<Path>) -> Option<&VirtualEntry> {
        self.entries
            .iter()
            .find(|entry| entry.destination == destination.as_ref())
    }

    pub fn files(&self) -> impl Iterator<Item = &VirtualEntry> {
        self.entries.iter().filter(|entry| entry.is_file())
    }
}
