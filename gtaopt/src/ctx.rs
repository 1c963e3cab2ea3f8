//! Application context.
//!
//! [`AppContext`] holds the loaded [`OptConfig`] and performs the file work
//! around the core transform: validating and reading input documents and
//! writing exported ones.

use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::Context;
use gtacfg::EditSession;
use tokio::fs;

use crate::config::{DEFAULT_CONFIG_PATH, OptConfig};

/// Shared state for one invocation.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    /// Effective configuration.
    pub config: OptConfig,
    /// Where the configuration was looked up.
    pub config_path: PathBuf,
}

impl AppContext {
    /// Load the configuration from `config_path`, or from
    /// `.gtaopt.toml` when none is given.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing configuration file cannot be parsed.
    pub async fn new(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let config = OptConfig::load(&config_path).await?;
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Validate and read a settings document.
    ///
    /// The file must exist, carry an accepted extension and be no larger
    /// than `max_file_size`.
    pub async fn read_document(&self, path: &Path) -> anyhow::Result<String> {
        let meta = fs::metadata(path)
            .await
            .with_context(|| format!("Could not read file {}", path.display()))?;

        if !self.config.accepts_extension(path) {
            bail!(
                "Only {} files are accepted: {}",
                self.config
                    .accepted_extensions
                    .iter()
                    .map(|e| format!(".{e}"))
                    .collect::<Vec<_>>()
                    .join(", "),
                path.display()
            );
        }
        if meta.len() > self.config.max_file_size {
            bail!(
                "File size must be at most {} bytes, {} is {} bytes",
                self.config.max_file_size,
                path.display(),
                meta.len()
            );
        }

        fs::read_to_string(path)
            .await
            .with_context(|| format!("Could not read file content as text: {}", path.display()))
    }

    /// Read, parse and flatten a settings document.
    pub async fn load_session(&self, path: &Path) -> anyhow::Result<EditSession> {
        let text = self.read_document(path).await?;
        let session = EditSession::load(text)
            .with_context(|| format!("Invalid XML file format: {}", path.display()))?;
        info!("{}: {} entries", path.display(), session.model().len());
        Ok(session)
    }

    /// Explicit output path, or the configured default.
    pub fn output_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| PathBuf::from(&self.config.output))
    }

    /// Write an exported document, backing up an existing file first when
    /// configured to.
    ///
    /// Returns the backup path, if one was made.
    pub async fn write_output(
        &self,
        path: &Path,
        content: &str,
    ) -> anyhow::Result<Option<PathBuf>> {
        let mut backup = None;
        if self.config.backup && path.exists() {
            let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("xml");
            let bk = format!(
                "bk-{}.{ext}",
                SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)?
                    .as_secs()
            );
            let backup_path = path.with_extension(bk);
            fs::copy(path, &backup_path)
                .await
                .with_context(|| format!("Failed to back up {}", path.display()))?;
            debug!("backed up {} to {}", path.display(), backup_path.display());
            backup = Some(backup_path);
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(backup)
    }
}
