use crate::domain::error::DomainError;
use crate::domain::ports::corpus_loader::{CorpusLoader, LoadedCorpus};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Loads every `*.json` file under a directory tree. Each file holds one
/// embedding as a bare JSON array of numbers; its path becomes the identifier.
pub struct JsonDirLoader {
    root: PathBuf,
}

impl JsonDirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_embedding(path: &Path) -> Result<Vec<f32>, DomainError> {
        let text = fs::read_to_string(path)
            .map_err(|e| DomainError::Io(format!("Could not open file {}: {e}", path.display())))?;
        let vector = serde_json::from_str::<Vec<f32>>(&text)
            .map_err(|e| DomainError::Parse(format!("Error parsing file {}: {e}", path.display())))?;
        // Values beyond f32 range parse as infinity.
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(DomainError::Parse(format!(
                "Error parsing file {}: embedding holds a value outside f32 range",
                path.display()
            )));
        }
        Ok(vector)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

impl CorpusLoader for JsonDirLoader {
    fn load(&self) -> Result<LoadedCorpus, DomainError> {
        if !self.root.is_dir() {
            return Err(DomainError::Io(format!(
                "Corpus directory not found: {}",
                self.root.display()
            )));
        }

        let mut corpus = LoadedCorpus::default();
        // Sorted walk so row order is stable across runs and filesystems.
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable corpus entry: {e}");
                    corpus.skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_json(entry.path()) {
                continue;
            }

            match Self::read_embedding(entry.path()) {
                Ok(vector) => {
                    debug!(path = %entry.path().display(), len = vector.len(), "embedding read");
                    corpus.push(entry.path().display().to_string(), vector);
                }
                Err(e) => {
                    warn!("{e}");
                    corpus.skipped += 1;
                }
            }
        }
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json(Path::new("a/b/c.json")));
        assert!(!is_json(Path::new("a/b/c.jpg")));
        assert!(!is_json(Path::new("a/b/json")));
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let loader = JsonDirLoader::new("/definitely/not/here/embedserve");
        assert!(matches!(loader.load(), Err(DomainError::Io(_))));
    }
}
