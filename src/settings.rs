use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

/// Schema of the GNOME remote-desktop RDP subsystem.
pub const RDP_SCHEMA: &str = "org.gnome.desktop.remote-desktop.rdp";
/// String key holding the screen-share mode.
pub const SCREEN_SHARE_MODE_KEY: &str = "screen-share-mode";
/// Boolean key enabling the remote-desktop backend.
pub const ENABLE_KEY: &str = "enable";

/// Errors from a settings store backend.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The schema is not installed on this system.
    #[error("settings schema '{0}' is not available")]
    SchemaUnavailable(String),

    /// The backend process could not be spawned or awaited.
    #[error("failed to execute settings backend: {0}")]
    Io(#[from] std::io::Error),

    /// The backend ran but reported failure.
    #[error("settings {verb} for key '{key}' failed: {stderr}")]
    Command {
        verb: &'static str,
        key: String,
        stderr: String,
    },

    /// A key held a value the caller could not interpret.
    #[error("key '{key}' holds a malformed value: '{value}'")]
    Malformed { key: String, value: String },

    /// The in-memory store has no value for the key.
    #[error("no value stored for key '{0}'")]
    MissingKey(String),
}

/// Keyed access to a named settings schema.
///
/// This is the seam between the toggle controller and the host configuration
/// system. The production backend drives the `gsettings` CLI; tests use
/// [`MemorySettings`].
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_string(&self, key: &str) -> Result<String, SettingsError>;
    async fn set_string(&self, key: &str, value: &str) -> Result<(), SettingsError>;
    async fn get_boolean(&self, key: &str) -> Result<bool, SettingsError>;
    async fn set_boolean(&self, key: &str, value: bool) -> Result<(), SettingsError>;

    /// Forces pending writes to be persisted before returning.
    async fn sync(&self) -> Result<(), SettingsError>;
}

/// Settings store backed by the `gsettings` command-line tool.
///
/// Every operation runs one `gsettings` invocation as a child process and
/// waits for it to exit, so writes are visible to other consumers of the
/// schema as soon as the call returns.
#[derive(Debug, Clone)]
pub struct GsettingsStore {
    schema: String,
}

impl GsettingsStore {
    /// Opens the store for `schema`, verifying that the schema is installed.
    ///
    /// # Errors
    ///
    /// [`SettingsError::SchemaUnavailable`] if `gsettings list-keys` rejects
    /// the schema; [`SettingsError::Io`] if the tool cannot be executed.
    pub async fn open(schema: &str) -> Result<Self, SettingsError> {
        let output = Command::new("gsettings")
            .args(["list-keys", schema])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(SettingsError::SchemaUnavailable(schema.to_string()));
        }

        info!("Opened gsettings schema '{}'", schema);
        Ok(Self {
            schema: schema.to_string(),
        })
    }

    /// The schema this store is scoped to.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    async fn run(
        &self,
        verb: &'static str,
        key: &str,
        value: Option<&str>,
    ) -> Result<String, SettingsError> {
        let mut cmd = Command::new("gsettings");
        cmd.arg(verb)
            .arg(&self.schema)
            .arg(key)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(value) = value {
            cmd.arg(value);
        }

        let output = cmd.output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!(
            "gsettings {} {}: exit={:?}, stdout='{}'",
            verb,
            key,
            output.status.code(),
            stdout.trim()
        );

        if !output.status.success() {
            return Err(SettingsError::Command {
                verb,
                key: key.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout.trim().to_string())
    }
}

/// Strips the GVariant quoting `gsettings get` puts around string values.
fn unquote_gvariant(raw: &str) -> &str {
    raw.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(raw)
}

#[async_trait]
impl SettingsStore for GsettingsStore {
    async fn get_string(&self, key: &str) -> Result<String, SettingsError> {
        let raw = self.run("get", key, None).await?;
        Ok(unquote_gvariant(&raw).to_string())
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.run("set", key, Some(value)).await?;
        Ok(())
    }

    async fn get_boolean(&self, key: &str) -> Result<bool, SettingsError> {
        let raw = self.run("get", key, None).await?;
        match raw.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(SettingsError::Malformed {
                key: key.to_string(),
                value: raw,
            }),
        }
    }

    async fn set_boolean(&self, key: &str, value: bool) -> Result<(), SettingsError> {
        self.run("set", key, Some(if value { "true" } else { "false" }))
            .await?;
        Ok(())
    }

    async fn sync(&self) -> Result<(), SettingsError> {
        // Each CLI invocation already blocks until the dconf daemon has
        // acknowledged the write, so there is nothing buffered to flush.
        // The operation stays on the trait for stores that do buffer.
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    strings: HashMap<String, String>,
    booleans: HashMap<String, bool>,
    write_count: usize,
    sync_count: usize,
}

/// In-process settings store for tests and examples.
///
/// Counts writes and flushes so callers can assert on how a code path
/// touched the store.
#[derive(Debug, Default)]
pub struct MemorySettings {
    inner: Mutex<MemoryInner>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a string key, without counting as a write.
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .strings
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Seeds a boolean key, without counting as a write.
    pub fn with_boolean(self, key: &str, value: bool) -> Self {
        self.inner
            .lock()
            .unwrap()
            .booleans
            .insert(key.to_string(), value);
        self
    }

    /// Number of `set_string`/`set_boolean` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().unwrap().write_count
    }

    /// Number of `sync` calls so far.
    pub fn sync_count(&self) -> usize {
        self.inner.lock().unwrap().sync_count
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get_string(&self, key: &str) -> Result<String, SettingsError> {
        self.inner
            .lock()
            .unwrap()
            .strings
            .get(key)
            .cloned()
            .ok_or_else(|| SettingsError::MissingKey(key.to_string()))
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut inner = self.inner.lock().unwrap();
        inner.strings.insert(key.to_string(), value.to_string());
        inner.write_count += 1;
        Ok(())
    }

    async fn get_boolean(&self, key: &str) -> Result<bool, SettingsError> {
        self.inner
            .lock()
            .unwrap()
            .booleans
            .get(key)
            .copied()
            .ok_or_else(|| SettingsError::MissingKey(key.to_string()))
    }

    async fn set_boolean(&self, key: &str, value: bool) -> Result<(), SettingsError> {
        let mut inner = self.inner.lock().unwrap();
        inner.booleans.insert(key.to_string(), value);
        inner.write_count += 1;
        Ok(())
    }

    async fn sync(&self) -> Result<(), SettingsError> {
        self.inner.lock().unwrap().sync_count += 1;
        Ok(())
    }
}
