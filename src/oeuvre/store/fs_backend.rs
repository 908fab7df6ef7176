use super::backend::StorageBackend;
use super::{RECORD_EXT, STAGING_DIR};
use crate::error::{OeuvreError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(OeuvreError::Io)?;
        }
        Ok(())
    }

    /// Record filename for a path under the root, always with `/` separators.
    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl StorageBackend for FsBackend {
    fn list_files(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            tracing::debug!(root = %self.root.display(), "collection directory does not exist");
            return Ok(Vec::new());
        }

        let staging = self.root.join(STAGING_DIR);
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.path() != staging.as_path());

        let mut names = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| OeuvreError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_record = entry
                .path()
                .extension()
                .is_some_and(|ext| ext == RECORD_EXT);
            if !is_record {
                continue;
            }
            if let Some(name) = self.relative_name(entry.path()) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_file(&self, name: &str) -> Result<Option<String>> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(OeuvreError::Io)?;
        Ok(Some(content))
    }

    fn write_file(&self, name: &str, content: &str) -> Result<()> {
        let path = self.file_path(name);
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }
        fs::write(&path, content).map_err(OeuvreError::Io)?;
        Ok(())
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.file_path(name);
        if path.exists() {
            fs::remove_file(path).map_err(OeuvreError::Io)?;
        }
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.file_path(name).exists()
    }

    fn file_path(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use crate::test_utils::TestEnv;

    #[test]
    fn lists_records_recursively_and_sorted() {
        let env = TestEnv::new();
        env.write("libra.txt", "");
        env.write("films/alphaville.txt", "");
        env.write("stories/deep/the-dead.txt", "");
        env.write("locations.json", "{}");
        env.write("README.md", "");

        let backend = FsBackend::new(&env.root);
        assert_eq!(
            backend.list_files().unwrap(),
            vec!["films/alphaville.txt", "libra.txt", "stories/deep/the-dead.txt"]
        );
    }

    #[test]
    fn staging_directory_is_skipped() {
        let env = TestEnv::new();
        env.write("libra.txt", "");
        env.write("editing/libra.txt", "");
        env.write("films/editing/odd-but-fine.txt", "");

        let backend = FsBackend::new(&env.root);
        assert_eq!(
            backend.list_files().unwrap(),
            vec!["films/editing/odd-but-fine.txt", "libra.txt"]
        );
    }

    #[test]
    fn missing_root_lists_nothing() {
        let env = TestEnv::new();
        let backend = FsBackend::new(env.root.join("nope"));
        assert!(backend.list_files().unwrap().is_empty());
    }

    #[test]
    fn write_creates_parent_directories() {
        let env = TestEnv::new();
        let backend = FsBackend::new(&env.root);
        backend.write_file("stories/the-dead.txt", "title: The Dead\n").unwrap();
        assert_eq!(env.read("stories/the-dead.txt"), "title: The Dead\n");
        assert_eq!(
            backend.file_path("stories/the-dead.txt"),
            env.root.join("stories").join("the-dead.txt")
        );
    }

    #[test]
    fn read_and_delete() {
        let env = TestEnv::new();
        let backend = FsBackend::new(&env.root);
        assert_eq!(backend.read_file("x.txt").unwrap(), None);
        env.write("x.txt", "hi");
        assert_eq!(backend.read_file("x.txt").unwrap().as_deref(), Some("hi"));
        backend.delete_file("x.txt").unwrap();
        assert!(!backend.exists("x.txt"));
        backend.delete_file("x.txt").unwrap();
    }

    #[test]
    fn staged_copies_live_under_editing_on_disk() {
        let env = TestEnv::new();
        let path = env.store.stage("films/alphaville.txt", "title: Alphaville\n").unwrap();
        assert_eq!(path, env.root.join("editing").join("films").join("alphaville.txt"));
        assert_eq!(env.read("editing/films/alphaville.txt"), "title: Alphaville\n");
        assert!(env.store.is_staged("films/alphaville.txt"));

        let err = env
            .store
            .parse_staged("title: Alphaville\nnonsense\n", "films/alphaville.txt")
            .unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));

        env.store.unstage("films/alphaville.txt").unwrap();
        assert!(!env.store.is_staged("films/alphaville.txt"));
    }
}
