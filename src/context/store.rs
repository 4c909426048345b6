//! Context configuration file I/O

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::context as context_config;
use crate::error::{Result, ZedError};

use super::lock::StoreLock;
use super::models::{Context, ContextConfig, ContextEntry};

/// Handles reading and writing the context configuration file.
///
/// Reads load the whole document; every mutation runs as a locked
/// read-modify-write followed by an atomic replace of the file.
pub struct ContextStore {
    config_path: PathBuf,
    lock_timeout: Duration,
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStore {
    /// Create a new store using the default config path (~/.zed/config.json)
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create a store with a custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            lock_timeout: Duration::from_millis(context_config::LOCK_TIMEOUT_MS),
        }
    }

    /// Override how long writers wait for the lock
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get the default config file path
    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(context_config::DIR_NAME)
            .join(context_config::FILE_NAME)
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .config_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| context_config::FILE_NAME.into());
        name.push(".lock");
        self.config_path.with_file_name(name)
    }

    /// Load the context configuration from disk.
    /// Returns Default if file doesn't exist, errors on corrupt JSON.
    pub fn load(&self) -> Result<ContextConfig> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "No config store at {}, starting empty",
                    self.config_path.display()
                );
                return Ok(ContextConfig::default());
            }
            Err(e) => {
                return Err(ZedError::Persistence(format!(
                    "Failed to read config store {}: {}",
                    self.config_path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&content).map_err(|e| ZedError::CorruptStore {
            path: self.config_path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save the context configuration to disk.
    /// Uses atomic write (tmp file + rename); callers hold the store lock.
    fn save(&self, config: &ContextConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config).map_err(|e| {
            ZedError::Persistence(format!("Failed to serialize config store: {}", e))
        })?;

        let tmp_path = self
            .config_path
            .with_extension(format!("json.{}.tmp", std::process::id()));
        fs::write(&tmp_path, &json).map_err(|e| {
            ZedError::Persistence(format!(
                "Failed to write temp config file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        // Secrets live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            if let Err(e) = fs::set_permissions(&tmp_path, permissions) {
                let _ = fs::remove_file(&tmp_path);
                return Err(ZedError::Persistence(format!(
                    "Failed to set permissions on config file: {}",
                    e
                )));
            }
        }

        fs::rename(&tmp_path, &self.config_path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            ZedError::Persistence(format!(
                "Failed to rename temp config file to {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    /// Run `mutate` against the freshly loaded document under the store lock
    /// and persist the result. Nothing is written if `mutate` fails.
    pub fn update<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut ContextConfig) -> Result<T>,
    {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ZedError::Persistence(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let _lock = StoreLock::acquire(
            &self.lock_path(),
            self.lock_timeout,
            Duration::from_millis(context_config::LOCK_STALE_MS),
            Duration::from_millis(context_config::LOCK_RETRY_MS),
        )?;

        let mut config = self.load()?;
        let value = mutate(&mut config)?;
        self.save(&config)?;
        Ok(value)
    }

    /// Insert or overwrite a token
    pub fn set_token(&self, name: &str, secret: &str) -> Result<()> {
        self.update(|config| config.set_token(name, secret))?;
        debug!("Stored token '{}'", name);
        Ok(())
    }

    /// Token names, sorted; never secrets
    pub fn token_names(&self) -> Result<Vec<String>> {
        Ok(self.load()?.token_names())
    }

    /// Secret stored under `name`
    pub fn secret(&self, name: &str) -> Result<String> {
        self.load()?.secret(name).map(str::to_string)
    }

    pub fn remove_token(&self, name: &str) -> Result<()> {
        self.update(|config| config.remove_token(name))
    }

    /// Insert or overwrite a context without checking its token reference
    pub fn set_context(&self, name: &str, tenant: &str, token_name: &str) -> Result<()> {
        self.update(|config| config.set_context(name, tenant, token_name))?;
        debug!("Stored context '{}' (tenant={}, token={})", name, tenant, token_name);
        Ok(())
    }

    /// All contexts, sorted by name
    pub fn contexts(&self) -> Result<Vec<ContextEntry>> {
        Ok(self.load()?.context_entries())
    }

    pub fn context(&self, name: &str) -> Result<Context> {
        self.load()?.context(name).cloned()
    }

    /// Remove a context; clears the active pointer if it named it
    pub fn remove_context(&self, name: &str) -> Result<()> {
        self.update(|config| config.remove_context(name))
    }

    /// Make `name` the active context; fails without writing if it is unknown
    pub fn use_context(&self, name: &str) -> Result<()> {
        self.update(|config| config.use_context(name))?;
        debug!("Active context is now '{}'", name);
        Ok(())
    }

    /// Name of the active context, if one is set
    pub fn current_context(&self) -> Result<Option<String>> {
        Ok(self.load()?.active_context_name().map(str::to_string))
    }
}
