use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary mod layout: `mod/` and `data/` roots under one workspace dir.
pub struct ModTree {
    dir: TempDir,
}

impl ModTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn mod_root(&self) -> PathBuf {
        self.root().join("mod")
    }

    pub fn data_root(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn write(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, text).expect("write file");
        path
    }
}
