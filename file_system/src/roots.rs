//! Platform folders behind each base directory kind
//!
//! Defaults come from the platform's known folders (XDG on Linux,
//! `~/Library` on macOS, known folders on Windows). Any root can be
//! replaced, which is how tests and sandboxed applications redirect storage.

use config::BaseDirectory;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRoots {
    roots: HashMap<BaseDirectory, PathBuf>,
}

impl FileRoots {
    /// No roots at all; every base must be set explicitly
    pub fn empty() -> Self {
        Self::default()
    }

    /// Roots of the current user on this platform
    pub fn from_env() -> Self {
        let mut roots = HashMap::new();
        let known = [
            (BaseDirectory::Documents, dirs::document_dir()),
            (BaseDirectory::Caches, dirs::cache_dir()),
            (BaseDirectory::ApplicationSupport, dirs::data_dir()),
            (BaseDirectory::Temporary, Some(env::temp_dir())),
        ];
        for (base, root) in known {
            if let Some(root) = root {
                roots.insert(base, root);
            }
        }

        Self { roots }
    }

    /// Sets one root, returning the updated set
    pub fn with_root(mut self, base: BaseDirectory, root: impl Into<PathBuf>) -> Self {
        self.roots.insert(base, root.into());
        self
    }

    pub fn root(&self, base: BaseDirectory) -> Option<&PathBuf> {
        self.roots.get(&base)
    }
}
