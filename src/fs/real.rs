use super::{DirEntry, FileMetadata, FileSystem, FileType};
use crate::error::io_context;
use crate::list::strategy::Capabilities;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::trace;
use walkdir::WalkDir;

/// FileSystem backed by the host filesystem through `tokio::fs` and `walkdir`
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn to_metadata(meta: std::fs::Metadata) -> FileMetadata {
    FileMetadata {
        file_type: FileType::from(meta.file_type()),
    }
}

fn walk_blocking(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            io_context("walk", &path, io::Error::from(err))
        })?;

        if entry.depth() == 0 {
            // walkdir yields a non-directory root as a single entry instead of failing
            if !entry.file_type().is_dir() {
                return Err(io_context(
                    "read directory",
                    root,
                    io::Error::new(io::ErrorKind::Other, "not a directory"),
                ));
            }
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        paths.push(relative);
    }

    Ok(paths)
}

#[async_trait]
impl FileSystem for RealFileSystem {
    fn capabilities(&self) -> Capabilities {
        Capabilities::detect()
    }

    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        fs::metadata(path)
            .await
            .map(to_metadata)
            .map_err(|err| io_context("read metadata", path, err))
    }

    async fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        fs::symlink_metadata(path)
            .await
            .map(to_metadata)
            .map_err(|err| io_context("read metadata", path, err))
    }

    async fn probe_readable(&self, path: &Path) -> io::Result<()> {
        let meta = self.metadata(path).await?;
        if meta.is_dir() {
            fs::read_dir(path)
                .await
                .map(drop)
                .map_err(|err| io_context("open directory", path, err))
        } else {
            fs::File::open(path)
                .await
                .map(drop)
                .map_err(|err| io_context("open file", path, err))
        }
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = fs::read_dir(path)
            .await
            .map_err(|err| io_context("read directory", path, err))?;

        let mut result = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| io_context("read directory", path, err))?
        {
            let entry_path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|err| io_context("read entry type", &entry_path, err))?;

            result.push(DirEntry {
                name: entry.file_name(),
                path: entry_path,
                file_type: FileType::from(file_type),
            });
        }

        trace!(directory = %path.display(), entries = result.len(), "read directory");
        Ok(result)
    }

    async fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut entries = fs::read_dir(path)
            .await
            .map_err(|err| io_context("read directory", path, err))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| io_context("read directory", path, err))?
        {
            names.push(entry.file_name());
        }

        trace!(directory = %path.display(), entries = names.len(), "read directory names");
        Ok(names)
    }

    async fn walk(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let owned_root = root.to_path_buf();
        tokio::task::spawn_blocking(move || walk_blocking(&owned_root))
            .await
            .map_err(|err| io_context("walk", root, io::Error::other(err)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        std::fs::create_dir(base.join("subdir")).unwrap();
        std::fs::File::create(base.join("test.txt"))
            .unwrap()
            .write_all(b"hello world")
            .unwrap();
        std::fs::File::create(base.join("subdir/nested.txt"))
            .unwrap()
            .write_all(b"nested content")
            .unwrap();

        dir
    }

    #[tokio::test]
    async fn test_metadata() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let meta = fs.metadata(&temp.path().join("test.txt")).await.unwrap();
        assert_eq!(meta.file_type, FileType::File);

        let meta = fs.metadata(&temp.path().join("subdir")).await.unwrap();
        assert!(meta.is_dir());
    }

    #[tokio::test]
    async fn test_metadata_missing_path() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let err = fs
            .metadata(&temp.path().join("nonexistent"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("nonexistent"));
    }

    #[tokio::test]
    async fn test_read_dir() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(temp.path()).await.unwrap();
        let mut names: Vec<_> = entries.iter().map(|e| e.file_name()).collect();
        names.sort();

        assert_eq!(names, vec!["subdir", "test.txt"]);
        let subdir = entries.iter().find(|e| e.file_name() == "subdir").unwrap();
        assert!(subdir.is_dir());
    }

    #[tokio::test]
    async fn test_read_dir_names() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let mut names = fs.read_dir_names(temp.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec!["subdir", "test.txt"]);
    }

    #[tokio::test]
    async fn test_read_dir_on_file_fails() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.read_dir(&temp.path().join("test.txt")).await.is_err());
    }

    #[tokio::test]
    async fn test_probe_readable() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        fs.probe_readable(temp.path()).await.unwrap();
        fs.probe_readable(&temp.path().join("test.txt")).await.unwrap();
    }

    #[tokio::test]
    async fn test_walk_skips_root() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let mut paths = fs.walk(temp.path()).await.unwrap();
        paths.sort();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("subdir"),
                PathBuf::from("subdir").join("nested.txt"),
                PathBuf::from("test.txt"),
            ]
        );
    }

    #[tokio::test]
    async fn test_walk_on_file_fails() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let err = fs.walk(&temp.path().join("test.txt")).await.unwrap_err();
        assert!(err.to_string().contains("read directory"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_dir_keeps_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let name = std::ffi::OsStr::from_bytes(b"bad\xffdir");
        if std::fs::create_dir(temp.path().join(name)).is_err() {
            // the filesystem only accepts UTF-8 names
            return;
        }
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(temp.path()).await.unwrap();
        assert_eq!(entries[0].file_name(), name);
        assert!(fs.read_dir(entries[0].path()).await.unwrap().is_empty());

        let names = fs.read_dir_names(temp.path()).await.unwrap();
        assert_eq!(names, vec![name.to_os_string()]);
        fs.symlink_metadata(&temp.path().join(&names[0])).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_metadata_does_not_follow() {
        let temp = create_test_dir();
        std::os::unix::fs::symlink(temp.path().join("subdir"), temp.path().join("link")).unwrap();
        let fs = RealFileSystem::new();

        let meta = fs.symlink_metadata(&temp.path().join("link")).await.unwrap();
        assert_eq!(meta.file_type, FileType::Symlink);

        let meta = fs.metadata(&temp.path().join("link")).await.unwrap();
        assert!(meta.is_dir());
    }
}
