// File: src/vault/local.rs
use super::{Properties, Vault, frontmatter};
use crate::config::Config;
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Vault backed by a directory on disk.
///
/// Every write holds one vault-wide advisory lock, so two processes
/// appending to the same log cannot interleave.
#[derive(Debug, Clone)]
pub struct LocalVault {
    root: PathBuf,
}

impl LocalVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the vault named by `config`, creating its root directory.
    pub fn open(ctx: &dyn AppContext, config: &Config) -> Result<Self> {
        let root = config.resolve_vault_root(ctx)?;
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create vault root {:?}", root))?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lock_anchor(&self) -> PathBuf {
        self.root.join(".jotter")
    }

    /// Map a vault path onto the filesystem. Absolute paths and `..` are refused.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        if path.trim().is_empty() {
            bail!("Empty vault path");
        }
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => bail!("Path '{}' escapes the vault", path),
            }
        }
        Ok(self.root.join(relative))
    }
}

impl Vault for LocalVault {
    fn folder_exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_dir())
    }

    fn create_folder(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        fs::create_dir_all(&target)
            .with_context(|| format!("Failed to create folder '{}'", path))?;
        log::debug!("Created folder {:?}", target);
        Ok(())
    }

    fn file_exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn create(&self, path: &str, content: &str) -> Result<()> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent()
            && !parent.is_dir()
        {
            return Err(anyhow!("Folder for '{}' does not exist", path));
        }
        LocalStorage::with_lock(&self.lock_anchor(), || {
            if target.exists() {
                bail!("File already exists: '{}'", path);
            }
            LocalStorage::create_new(&target, content)
        })?;
        log::info!("Created note '{}'", path);
        Ok(())
    }

    fn append(&self, path: &str, text: &str) -> Result<()> {
        let target = self.resolve(path)?;
        LocalStorage::with_lock(&self.lock_anchor(), || LocalStorage::append(&target, text))
            .with_context(|| format!("Failed to append to '{}'", path))?;
        log::debug!("Appended {} bytes to '{}'", text.len(), path);
        Ok(())
    }

    fn process_front_matter(&self, path: &str, properties: &Properties) -> Result<()> {
        let target = self.resolve(path)?;
        LocalStorage::with_lock(&self.lock_anchor(), || {
            let content = fs::read_to_string(&target)
                .with_context(|| format!("Failed to read '{}'", path))?;
            let updated = frontmatter::apply(&content, properties);
            LocalStorage::atomic_write(&target, updated)
        })
    }
}
