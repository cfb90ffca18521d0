use crate::{RegenError, Result};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where generated files live, addressed by file name
pub trait SnippetStore {
    /// Raw bytes of a stored file, `None` when it does not exist
    fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>>;

    fn write(&mut self, file_name: &str, text: &str) -> Result<()>;

    fn exists(&self, file_name: &str) -> Result<bool> {
        Ok(self.load(file_name)?.is_some())
    }
}

/// Files under one output directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Open the directory, creating it when missing
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| RegenError::OutputDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl SnippetStore for DirectoryStore {
    fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(file_name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RegenError::Read { path, source }),
        }
    }

    fn write(&mut self, file_name: &str, text: &str) -> Result<()> {
        let path = self.path_for(file_name);
        let tmp = self.dir.join(format!(".{file_name}.tmp"));
        std::fs::write(&tmp, text)
            .and_then(|()| std::fs::rename(&tmp, &path))
            .map_err(|source| {
                let _ = std::fs::remove_file(&tmp);
                RegenError::Write { path, source }
            })
    }

    fn exists(&self, file_name: &str) -> Result<bool> {
        Ok(self.path_for(file_name).exists())
    }
}

/// In-memory files, for previews and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(file_name.into(), contents.into());
    }

    #[must_use]
    pub fn text(&self, file_name: &str) -> Option<&str> {
        self.files
            .get(file_name)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl SnippetStore for MemoryStore {
    fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.files.get(file_name).cloned())
    }

    fn write(&mut self, file_name: &str, text: &str) -> Result<()> {
        self.insert(file_name, text);
        Ok(())
    }

    fn exists(&self, file_name: &str) -> Result<bool> {
        Ok(self.files.contains_key(file_name))
    }
}
