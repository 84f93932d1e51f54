use std::io;
use std::path::PathBuf;

use tokio::fs;

/// Byte-store behind the `/files/` route: one file per name under a root
/// directory.
///
/// Access is unsynchronized. Concurrent writers to one name race and the
/// last one wins; a reader may see the file before, after or in the middle
/// of a write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Returns `Ok(None)` if there is no file with that name.
    pub async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path(name)?).await {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Creates or overwrites the file.
    pub async fn write(&self, name: &str, data: &[u8]) -> io::Result<()> {
        fs::write(self.path(name)?, data).await
    }

    fn path(&self, name: &str) -> io::Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(&['/', '\\']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid file name {:?}", name),
            ));
        }
        Ok(self.root.join(name))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[tokio::test]
    async fn test_missing_file() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());
        assert_eq!(store.read("missing.txt").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_then_read() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());
        let data: Vec<u8> = (0..=255).collect();
        store.write("bytes.bin", &data).await?;
        assert_eq!(store.read("bytes.bin").await?, Some(data));
        Ok(())
    }

    #[tokio::test]
    async fn test_write_overwrites() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());
        store.write("a.txt", b"a much longer first version").await?;
        store.write("a.txt", b"short").await?;
        assert_eq!(store.read("a.txt").await?.as_deref(), Some(&b"short"[..]));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_escaping_names() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());
        for name in ["", ".", "..", "a/b", "a\\b"] {
            let err = store.read(name).await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
            let err = store.write(name, b"x").await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_other_read_errors_propagate() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("sub"))?;
        let store = FileStore::new(dir.path());
        assert!(store.read("sub").await.is_err());
        Ok(())
    }
}
