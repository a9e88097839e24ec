//! Injected filesystem seam (component E), so metadata extraction stays
//! testable without touching disk.

use std::collections::HashMap;
use std::sync::Mutex;

/// Size and timestamps for a path, or `None` when the path does not exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileStat {
    pub size: u64,
    pub created_at_unix: i64,
    pub modified_at_unix: i64,
}

/// Filesystem seam used by metadata extraction. The real implementation
/// shells out to `std::fs`; tests use `InMemoryFileSystem`.
pub trait FileSystem: Send + Sync {
    fn stat(&self, path: &str) -> Option<FileStat>;
}

/// `std::fs`-backed implementation.
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn stat(&self, path: &str) -> Option<FileStat> {
        let meta = std::fs::metadata(path).ok()?;
        let to_unix = |t: std::io::Result<std::time::SystemTime>| {
            t.ok()
                .and_then(|time| time.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0)
        };
        Some(FileStat {
            size: meta.len(),
            created_at_unix: to_unix(meta.created()),
            modified_at_unix: to_unix(meta.modified()),
        })
    }
}

/// Deterministic in-memory filesystem for tests.
#[derive(Default)]
pub struct InMemoryFileSystem {
    entries: Mutex<HashMap<String, FileStat>>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<String>, stat: FileStat) {
        self.entries.lock().unwrap().insert(path.into(), stat);
    }
}

impl FileSystem for InMemoryFileSystem {
    fn stat(&self, path: &str) -> Option<FileStat> {
        self.entries.lock().unwrap().get(path).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_none() {
        let fs = InMemoryFileSystem::new();
        assert!(fs.stat("missing.md").is_none());
    }

    #[test]
    fn inserted_path_is_returned() {
        let fs = InMemoryFileSystem::new();
        fs.insert(
            "doc.md",
            FileStat {
                size: 42,
                created_at_unix: 1,
                modified_at_unix: 2,
            },
        );
        assert_eq!(fs.stat("doc.md").unwrap().size, 42);
    }
}
