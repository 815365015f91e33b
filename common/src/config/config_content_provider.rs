use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::ConfigError;

pub trait ConfigContentProvider {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn get_config_content(&self) -> Result<Option<String>, ConfigError>;
    fn set_config_content(&self, content: &str) -> Result<(), ConfigError>;
}

pub struct FileContentConfigProvider {
    file_path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self { file_path: file_path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }
}

/// Keeps content in memory; used where nothing should touch the disk.
#[derive(Default)]
pub struct MemoryContentProvider {
    content: Mutex<Option<String>>,
}

impl MemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            content: Mutex::new(Some(content.to_string())),
        }
    }
}

impl ConfigContentProvider for MemoryContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
        let content = self.content.lock().unwrap_or_else(|e| e.into_inner());
        Ok(content.clone())
    }

    fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
        let mut current = self.content.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(content.to_string());
        Ok(())
    }
}
