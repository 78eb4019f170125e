use crate::errors::GeneratorError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Discovers the `.rs` files below a scan root, honoring gitignore rules.
pub struct SourceWalker {
    root: PathBuf,
    exclude_patterns: Vec<String>,
}

impl SourceWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            exclude_patterns: vec![],
        }
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>, GeneratorError> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| GeneratorError::Walk {
                path: self.root.clone(),
                source: e,
            })?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        if !path.extension().is_some_and(|ext| ext == "rs") {
            return false;
        }

        let path_str = path.to_string_lossy();
        for pattern in &self.exclude_patterns {
            if glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
            {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn walk_finds_only_rust_sources() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lib.rs"), "fn a() {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not code").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/mod.rs"), "fn b() {}").unwrap();

        let mut files = SourceWalker::new(dir.path().to_path_buf()).walk().unwrap();
        files.sort();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["lib.rs", "mod.rs"]);
    }

    #[test]
    fn exclude_patterns_drop_matching_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lib.rs"), "fn a() {}").unwrap();
        fs::write(dir.path().join("generated_tests.rs"), "").unwrap();

        let files = SourceWalker::new(dir.path().to_path_buf())
            .with_exclude_patterns(vec!["*generated_tests.rs".to_string()])
            .walk()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("lib.rs"));
    }
}
