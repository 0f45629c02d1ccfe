use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const README_NAMES: [&str; 4] = ["README.md", "readme.md", "README", "README.txt"];
const MAKEFILE_NAMES: [&str; 2] = ["Makefile", "makefile"];

/// What the backend needs to see to plan a project's setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSnapshot {
    pub folder_name: String,
    /// Top-level entries, sorted; directories end with `/`.
    pub files: Vec<String>,
    pub readme: String,
    pub makefile: String,
}

impl ProjectSnapshot {
    pub fn collect(dir: &Path) -> Result<Self> {
        let folder_name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut files = Vec::new();
        let entries =
            fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                name.push('/');
            }
            files.push(name);
        }
        files.sort();

        Ok(Self {
            folder_name,
            files,
            readme: read_first(dir, &README_NAMES)?,
            makefile: read_first(dir, &MAKEFILE_NAMES)?,
        })
    }
}

fn read_first(dir: &Path, names: &[&str]) -> Result<String> {
    for name in names {
        let path = dir.join(name);
        if path.is_file() {
            return fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
    }
    Ok(String::new())
}
