//! Provider registry and the settings store behind it.
//!
//! Settings live in one document (provider lists, theme, DNS options)
//! that a [`ConfigStore`] loads and saves as a whole. The registry is the
//! only writer; it serializes read-modify-write cycles so a `set` replaces a
//! list atomically.

use async_trait::async_trait;
use lookout_core::{LookoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::EscalationConfig;
use crate::providers::{Adapter, GeoAdapter, Provider, ProviderKind, WhoisAdapter};

/// UI theme preference, persisted next to the provider lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme
    #[default]
    Dark,
    /// Light theme
    Light,
    /// Follow the system preference
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
            Self::System => write!(f, "system"),
        }
    }
}

impl FromStr for Theme {
    type Err = LookoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "system" => Ok(Self::System),
            other => Err(LookoutError::Config(format!(
                "unknown theme: {other} (expected dark, light or system)"
            ))),
        }
    }
}

/// The persisted settings document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// UI theme; unset means the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    /// DoH resolver endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,

    /// Domain suffixes that trigger the DNS escalation ladder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_suffixes: Option<Vec<String>>,

    /// IP geolocation providers, in priority order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_geo: Vec<Provider<GeoAdapter>>,

    /// WHOIS providers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub whois: Vec<Provider<WhoisAdapter>>,
}

/// Load/save contract for the settings document
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored document, `None` when nothing was ever saved
    async fn load(&self) -> Result<Option<Settings>>;

    /// Replace the stored document
    async fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings kept as a TOML file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigStore for FileStore {
    async fn load(&self) -> Result<Option<Settings>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let settings = toml::from_str(&content).map_err(|e| {
            LookoutError::Store(format!("{}: {e}", self.path.display()))
        })?;
        Ok(Some(settings))
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content =
            toml::to_string_pretty(settings).map_err(|e| LookoutError::Store(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Settings kept in memory for the life of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: Mutex<Option<Settings>>,
}

impl MemoryStore {
    /// Empty store, as on a first run
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a document
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
        }
    }

    /// Copy of whatever was last saved
    pub async fn snapshot(&self) -> Option<Settings> {
        self.settings.lock().await.clone()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn load(&self) -> Result<Option<Settings>> {
        Ok(self.settings.lock().await.clone())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.lock().await = Some(settings.clone());
        Ok(())
    }
}

/// Maps an adapter family to its list in the settings document
pub(crate) trait ProviderSlot: Adapter {
    fn slot(settings: &mut Settings) -> &mut Vec<Provider<Self>>;
}

impl ProviderSlot for GeoAdapter {
    fn slot(settings: &mut Settings) -> &mut Vec<Provider<Self>> {
        &mut settings.ip_geo
    }
}

impl ProviderSlot for WhoisAdapter {
    fn slot(settings: &mut Settings) -> &mut Vec<Provider<Self>> {
        &mut settings.whois
    }
}

/// Ordered provider lists per query kind, plus the other persisted settings
#[derive(Clone)]
pub struct ProviderRegistry {
    store: Arc<dyn ConfigStore>,
    write_lock: Arc<Mutex<()>>,
}

impl ProviderRegistry {
    /// Registry over an injected store
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Registry over a fresh in-memory store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The current settings document (defaults when nothing is stored)
    pub async fn settings(&self) -> Result<Settings> {
        Ok(self.store.load().await?.unwrap_or_default())
    }

    /// Ordered templates for a kind, initializing defaults on first use
    pub async fn list(&self, kind: ProviderKind) -> Result<Vec<String>> {
        Ok(match kind {
            ProviderKind::IpGeo => templates(&self.providers::<GeoAdapter>().await?),
            ProviderKind::Whois => templates(&self.providers::<WhoisAdapter>().await?),
        })
    }

    /// Replace the list for a kind. Each template is tagged on the way in.
    pub async fn set<I, S>(&self, kind: ProviderKind, list: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match kind {
            ProviderKind::IpGeo => self.replace(tag_all::<GeoAdapter, _, _>(list)?).await,
            ProviderKind::Whois => self.replace(tag_all::<WhoisAdapter, _, _>(list)?).await,
        }
    }

    /// Restore the built-in list for a kind and return it
    pub async fn reset(&self, kind: ProviderKind) -> Result<Vec<String>> {
        match kind {
            ProviderKind::IpGeo => self.replace(Provider::<GeoAdapter>::defaults()).await?,
            ProviderKind::Whois => self.replace(Provider::<WhoisAdapter>::defaults()).await?,
        }
        info!(kind = %kind, "provider list reset to defaults");
        self.list(kind).await
    }

    /// IP geolocation providers in priority order
    pub async fn geo_providers(&self) -> Result<Vec<Provider<GeoAdapter>>> {
        self.providers().await
    }

    /// WHOIS providers
    pub async fn whois_providers(&self) -> Result<Vec<Provider<WhoisAdapter>>> {
        self.providers().await
    }

    /// Replace the IP geolocation list with explicitly tagged providers
    pub async fn set_geo_providers(&self, list: Vec<Provider<GeoAdapter>>) -> Result<()> {
        self.replace(list).await
    }

    /// Replace the WHOIS list with explicitly tagged providers
    pub async fn set_whois_providers(&self, list: Vec<Provider<WhoisAdapter>>) -> Result<()> {
        self.replace(list).await
    }

    /// Stored theme, or the default
    pub async fn theme(&self) -> Result<Theme> {
        Ok(self.settings().await?.theme.unwrap_or_default())
    }

    /// Persist a theme preference
    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.update(|settings| settings.theme = Some(theme)).await
    }

    /// Escalation suffix set for DNS record fetches
    pub async fn escalation(&self) -> Result<EscalationConfig> {
        Ok(self
            .settings()
            .await?
            .escalation_suffixes
            .map_or_else(EscalationConfig::default, EscalationConfig::new))
    }

    /// DoH resolver override, if one is stored
    pub async fn resolver_url(&self) -> Result<Option<String>> {
        Ok(self.settings().await?.resolver)
    }

    pub(crate) async fn providers<A: ProviderSlot>(&self) -> Result<Vec<Provider<A>>> {
        let _guard = self.write_lock.lock().await;
        let mut settings = self.settings().await?;
        let slot = A::slot(&mut settings);
        if !slot.is_empty() {
            return Ok(slot.clone());
        }

        // First run: persist the defaults so the user can edit them
        *slot = Provider::defaults();
        let list = slot.clone();
        let kind = A::KIND;
        match self.store.save(&settings).await {
            Ok(()) => info!(kind = %kind, count = list.len(), "initialized default providers"),
            Err(e) => warn!(kind = %kind, error = %e, "could not persist default providers"),
        }
        Ok(list)
    }

    async fn replace<A: ProviderSlot>(&self, list: Vec<Provider<A>>) -> Result<()> {
        self.update(move |settings| *A::slot(settings) = list).await
    }

    async fn update(&self, change: impl FnOnce(&mut Settings) + Send) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut settings = self.settings().await?;
        change(&mut settings);
        self.store.save(&settings).await
    }
}

fn tag_all<A, I, S>(list: I) -> Result<Vec<Provider<A>>>
where
    A: Adapter,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    list.into_iter().map(Provider::new).collect()
}

fn templates<A: Adapter>(providers: &[Provider<A>]) -> Vec<String> {
    providers.iter().map(|p| p.template().to_string()).collect()
}
