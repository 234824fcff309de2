use super::{DirEntry, FileMetadata, FileSystem, FileType};
use crate::error::io_context;
use crate::list::strategy::Capabilities;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct MockEntry {
    file_type: FileType,
}

/// In-memory tree for exercising traversals without touching disk
///
/// Relative paths are resolved against the mock root (`/mock` by default).
/// Failures can be injected per directory, and every probe is counted.
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    failing: RwLock<HashMap<PathBuf, io::ErrorKind>>,
    unreadable: RwLock<HashSet<PathBuf>>,
    capabilities: Capabilities,
    root: PathBuf,
    read_dir_calls: AtomicUsize,
    metadata_calls: AtomicUsize,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: RwLock::new(HashMap::new()),
            failing: RwLock::new(HashMap::new()),
            unreadable: RwLock::new(HashSet::new()),
            capabilities: Capabilities::full(),
            root,
            read_dir_calls: AtomicUsize::new(0),
            metadata_calls: AtomicUsize::new(0),
        };
        let root = fs.root.clone();
        fs.add_dir(root);
        fs
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Adds a file, creating any missing parent directories
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            self.ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        self.ensure_parents(&mut files, &path);

        files.insert(
            path,
            MockEntry {
                file_type: FileType::Directory,
            },
        );
    }

    /// Makes every listing of `path` fail with `kind`
    pub fn fail_read_dir(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        let path = self.normalize_path(path.as_ref());
        self.failing.write().unwrap().insert(path, kind);
    }

    /// Makes `path` exist but refuse reads, as if its permissions were removed
    pub fn set_unreadable(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.unreadable.write().unwrap().insert(path);
    }

    /// Number of directory listings served so far
    pub fn read_dir_calls(&self) -> usize {
        self.read_dir_calls.load(Ordering::SeqCst)
    }

    /// Number of metadata probes served so far
    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        joined
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect()
    }

    fn ensure_parents(&self, files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if !files.contains_key(&current) {
                files.insert(
                    current.clone(),
                    MockEntry {
                        file_type: FileType::Directory,
                    },
                );
            }
        }
    }

    fn lookup(&self, path: &Path) -> io::Result<MockEntry> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file or directory"))
    }

    fn children(&self, path: &Path, operation: &'static str) -> io::Result<Vec<DirEntry>> {
        self.read_dir_calls.fetch_add(1, Ordering::SeqCst);
        let normalized = self.normalize_path(path);

        if let Some(kind) = self.failing.read().unwrap().get(&normalized) {
            return Err(io_context(
                operation,
                path,
                io::Error::new(*kind, "injected failure"),
            ));
        }
        if self.unreadable.read().unwrap().contains(&normalized) {
            return Err(io_context(
                operation,
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }

        let entry = self
            .lookup(&normalized)
            .map_err(|err| io_context(operation, path, err))?;
        if entry.file_type != FileType::Directory {
            return Err(io_context(
                operation,
                path,
                io::Error::new(io::ErrorKind::Other, "not a directory"),
            ));
        }

        let files = self.files.read().unwrap();
        let mut entries = Vec::new();
        for (file_path, entry) in files.iter() {
            if file_path.parent() == Some(normalized.as_path()) {
                let name = file_path.file_name().unwrap_or_default().to_os_string();

                entries.push(DirEntry {
                    path: path.join(&name),
                    name,
                    file_type: entry.file_type,
                });
            }
        }

        Ok(entries)
    }

    fn probe(&self, path: &Path) -> io::Result<FileMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        let entry = self
            .lookup(&self.normalize_path(path))
            .map_err(|err| io_context("read metadata", path, err))?;

        Ok(FileMetadata {
            file_type: entry.file_type,
        })
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        self.probe(path)
    }

    async fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        self.probe(path)
    }

    async fn probe_readable(&self, path: &Path) -> io::Result<()> {
        let normalized = self.normalize_path(path);
        self.lookup(&normalized)
            .map_err(|err| io_context("open directory", path, err))?;

        if self.unreadable.read().unwrap().contains(&normalized) {
            return Err(io_context(
                "open directory",
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        Ok(())
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        tokio::task::yield_now().await;
        self.children(path, "read directory")
    }

    async fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        tokio::task::yield_now().await;
        Ok(self
            .children(path, "read directory")?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    async fn walk(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut pending = vec![root.to_path_buf()];
        let mut paths = Vec::new();

        while let Some(directory) = pending.pop() {
            for entry in self.children(&directory, "walk")? {
                let relative = entry
                    .path
                    .strip_prefix(root)
                    .unwrap_or(&entry.path)
                    .to_path_buf();
                if entry.is_dir() {
                    pending.push(entry.path.clone());
                }
                paths.push(relative);
            }
        }

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_creates_parents() {
        let fs = MockFileSystem::new();
        fs.add_file("a/b/c/file.txt");

        let files = fs.files.read().unwrap();
        assert_eq!(
            files.get(Path::new("/mock/a/b")).unwrap().file_type,
            FileType::Directory
        );
        assert_eq!(
            files
                .get(Path::new("/mock/a/b/c/file.txt"))
                .unwrap()
                .file_type,
            FileType::File
        );
    }

    #[tokio::test]
    async fn test_metadata() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt");

        let meta = fs.metadata(Path::new("/mock/test.txt")).await.unwrap();
        assert_eq!(meta.file_type, FileType::File);
        assert_eq!(fs.metadata_calls(), 1);
    }

    #[tokio::test]
    async fn test_read_dir() {
        let fs = MockFileSystem::new();
        fs.add_dir("subdir");
        fs.add_file("test.txt");
        fs.add_file("subdir/nested.txt");

        let entries = fs.read_dir(Path::new("/mock")).await.unwrap();
        let mut names: Vec<_> = entries.iter().map(|e| e.file_name()).collect();
        names.sort();

        assert_eq!(names, vec!["subdir", "test.txt"]);
        assert_eq!(fs.read_dir_calls(), 1);
    }

    #[tokio::test]
    async fn test_read_dir_relative_to_root() {
        let fs = MockFileSystem::with_root(PathBuf::from("/repo"));
        fs.add_file("src/main.rs");

        let entries = fs.read_dir(Path::new("src")).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), Path::new("src/main.rs"));
    }

    #[tokio::test]
    async fn test_read_dir_missing() {
        let fs = MockFileSystem::new();
        let err = fs.read_dir(Path::new("/mock/nope")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let fs = MockFileSystem::new();
        fs.add_dir("broken");
        fs.fail_read_dir("broken", io::ErrorKind::PermissionDenied);

        let err = fs.read_dir(Path::new("/mock/broken")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(err.to_string().contains("/mock/broken"));
    }

    #[tokio::test]
    async fn test_unreadable() {
        let fs = MockFileSystem::new();
        fs.add_dir("locked");
        fs.set_unreadable("locked");

        assert!(fs.metadata(Path::new("/mock/locked")).await.is_ok());
        let err = fs
            .probe_readable(Path::new("/mock/locked"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[tokio::test]
    async fn test_walk() {
        let fs = MockFileSystem::new();
        fs.add_file("a.txt");
        fs.add_file("c/d.txt");

        let mut paths = fs.walk(Path::new("/mock")).await.unwrap();
        paths.sort();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("c"),
                PathBuf::from("c/d.txt"),
            ]
        );
    }

}
