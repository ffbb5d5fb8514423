//! Working-directory context for prompt construction.

use std::env;
use std::fs;
use std::path::Path;

/// Snapshot of the invocation directory, collected once per run.
///
/// Context is best-effort: a directory that cannot be listed yields an
/// empty file list, and an unresolvable working directory yields an empty
/// path. The pipeline still produces a command either way.
#[derive(Debug, Clone)]
pub struct Context {
    pub working_directory: String,
    pub file_names: Vec<String>,
}

impl Context {
    /// Collects context from the process working directory.
    pub fn collect() -> Self {
        let current_dir = env::current_dir().unwrap_or_default();
        Self::from_dir(&current_dir)
    }

    /// Collects context from an explicit directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut file_names: Vec<String> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter_map(|e| e.file_name().into_string().ok())
                    .collect()
            })
            .unwrap_or_default();
        file_names.sort();

        Self {
            working_directory: dir.display().to_string(),
            file_names,
        }
    }
}
