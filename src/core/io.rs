use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn read(&self, path: &str) -> Result<Vec<u8>>;
    async fn write(&self, path: &str, content: &[u8]) -> Result<()>;
    async fn exists(&self, path: &str) -> Result<bool>;
}

pub struct NativeStorage;

impl NativeStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for NativeStorage {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(path).await?)
    }

    async fn write(&self, path: &str, content: &[u8]) -> Result<()> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parent_dirs() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("nested").join("out.dat");
        let path_str = path.to_str().unwrap();

        let storage = NativeStorage::new();
        storage.write(path_str, b"0 rest\n").await?;

        assert!(storage.exists(path_str).await?);
        assert_eq!(storage.read(path_str).await?, b"0 rest\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_exists_and_read_missing() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let missing = temp_dir.path().join("missing.txt");
        let path_str = missing.to_str().unwrap();

        let storage = NativeStorage::new();
        assert!(!storage.exists(path_str).await?);
        assert!(storage.read(path_str).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_write_overwrites() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("speak_000_amy.dat");
        let path_str = path.to_str().unwrap();

        let storage = NativeStorage::new();
        storage.write(path_str, b"0 ai\n2 rest\n").await?;
        storage.write(path_str, b"0 rest\n").await?;
        assert_eq!(storage.read(path_str).await?, b"0 rest\n");
        Ok(())
    }
}
