// File locking and write helpers shared by the config and vault layers.
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        file_path.with_extension("lock")
    }

    /// Run `f` while holding an exclusive advisory lock next to `file_path`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Write a file that must not exist yet.
    pub fn create_new<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
        let path = path.as_ref();
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .with_context(|| format!("Failed to create {:?}", path))?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    /// Append to a file that must already exist.
    pub fn append<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
        let path = path.as_ref();
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {:?} for appending", path))?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AppContext, TestContext};

    #[test]
    fn test_atomic_write_replaces_content() {
        let ctx = TestContext::new();
        let path = ctx.get_data_dir().unwrap().join("note.md");
        LocalStorage::atomic_write(&path, "first").unwrap();
        LocalStorage::atomic_write(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_create_new_refuses_existing() {
        let ctx = TestContext::new();
        let path = ctx.get_data_dir().unwrap().join("note.md");
        LocalStorage::create_new(&path, "a").unwrap();
        assert!(LocalStorage::create_new(&path, "b").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "a");
    }

    #[test]
    fn test_append_requires_existing_file() {
        let ctx = TestContext::new();
        let path = ctx.get_data_dir().unwrap().join("log.md");
        assert!(LocalStorage::append(&path, "x").is_err());
        LocalStorage::create_new(&path, "a").unwrap();
        LocalStorage::with_lock(&path, || LocalStorage::append(&path, "b")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ab");
    }
}
