use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(self.resolve(dir)).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            } else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_files(&self, files: &[(&str, &[u8])]) -> Result<()> {
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());

        for (path, data) in files {
            let full_path = self.resolve(path);
            let temp_path = temp_path_for(&full_path);
            if let Err(source) = stage(&full_path, &temp_path, data).await {
                let _ = fs::remove_file(&temp_path).await;
                discard(&staged).await;
                return Err(EtlError::SinkWriteError {
                    path: path.to_string(),
                    source,
                });
            }
            staged.push((temp_path, full_path));
        }

        for (i, (temp_path, full_path)) in staged.iter().enumerate() {
            if let Err(source) = fs::rename(temp_path, full_path).await {
                discard(&staged[i..]).await;
                return Err(EtlError::SinkWriteError {
                    path: full_path.to_string_lossy().into_owned(),
                    source,
                });
            }
        }
        Ok(())
    }
}

fn temp_path_for(full_path: &Path) -> PathBuf {
    let mut temp_name = full_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    PathBuf::from(temp_name)
}

async fn stage(full_path: &Path, temp_path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(temp_path, data).await
}

async fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in staged {
        let _ = fs::remove_file(temp_path).await;
    }
}
