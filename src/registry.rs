//! The provider registry and the file-identification dispatcher.
//!
//! The registry is populated explicitly by the host application at startup
//! and is read-only for the rest of the process lifetime. For every
//! (action, data-type) pair it maintains the list of qualifying providers,
//! the union of their extension globs, and a display filter list for UI
//! file dialogs.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::provider::{Action, DataType, FileProvider, ACTIONS, DATA_TYPES};
use crate::providers::TextStackProvider;

/// Derived support information for one (action, data-type) pair
#[derive(Debug, Clone, Default)]
struct FormatSupport {
    /// Indices into the provider list, in registration order
    providers: Vec<usize>,
    /// Ordered, de-duplicated union of the providers' extension globs
    extensions: Vec<String>,
    /// Display filter strings for file dialogs
    filter_list: Vec<String>,
}

/// Registry of available file-format providers.
///
/// Build it once at process start, register every provider the host wants
/// to offer, then treat it as read-only. Registration replaces the derived
/// tables wholesale, so re-registering never duplicates entries.
pub struct Registry {
    providers: Vec<Box<dyn FileProvider>>,
    support: HashMap<(Action, DataType), FormatSupport>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        let mut registry = Self {
            providers: Vec::new(),
            support: HashMap::new(),
        };
        registry.rebuild();
        registry
    }

    /// Create a registry with all built-in providers registered
    pub fn with_builtin_providers() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TextStackProvider));
        registry
    }

    /// Register a provider.
    ///
    /// A provider that cannot read anything is skipped with a warning, never
    /// partially registered.
    pub fn register(&mut self, provider: Box<dyn FileProvider>) {
        if provider.read_types().is_empty() {
            warn!(
                provider = provider.title(),
                "Skipping provider without read support"
            );
            return;
        }
        info!(
            provider = provider.title(),
            extensions = provider.extensions().join(" "),
            "Registered file provider"
        );
        self.providers.push(provider);
        self.rebuild();
    }

    /// Rebuild the derived support tables from the provider list.
    ///
    /// Clears and repopulates every table, so the operation is idempotent.
    fn rebuild(&mut self) {
        self.support.clear();
        for action in ACTIONS {
            for data_type in DATA_TYPES {
                let mut support = FormatSupport::default();
                for (i, provider) in self.providers.iter().enumerate() {
                    let types = match action {
                        Action::Read => provider.read_types(),
                        Action::Write => provider.write_types(),
                    };
                    if !types.contains(&data_type) {
                        continue;
                    }
                    support.providers.push(i);
                    support.filter_list.push(format!(
                        "{} ({})",
                        provider.title(),
                        provider.extensions().join(" ")
                    ));
                    for ext in provider.extensions() {
                        if !support.extensions.iter().any(|e| e.as_str() == *ext) {
                            support.extensions.push(ext.to_string());
                        }
                    }
                }
                if action == Action::Read {
                    support.filter_list.insert(
                        0,
                        format!("Supported Formats ({})", support.extensions.join(" ")),
                    );
                    support.filter_list.push("All files (*.*)".to_string());
                }
                self.support.insert((action, data_type), support);
            }
        }
    }

    /// All registered providers, in registration order
    pub fn providers(&self) -> &[Box<dyn FileProvider>] {
        &self.providers
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry has no providers
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Look up a provider by its title
    pub fn provider_by_title(&self, title: &str) -> Option<&dyn FileProvider> {
        self.providers
            .iter()
            .find(|p| p.title() == title)
            .map(|p| p.as_ref())
    }

    /// Providers supporting the given action and data type, in registration
    /// order
    pub fn providers_for(&self, action: Action, data_type: DataType) -> Vec<&dyn FileProvider> {
        self.support
            .get(&(action, data_type))
            .map(|s| s.providers.iter().map(|&i| self.providers[i].as_ref()).collect())
            .unwrap_or_default()
    }

    /// Union of extension globs supported for the given action and data type
    pub fn supported_extensions(&self, action: Action, data_type: DataType) -> &[String] {
        self.support
            .get(&(action, data_type))
            .map(|s| s.extensions.as_slice())
            .unwrap_or(&[])
    }

    /// Display filter strings for file dialogs.
    ///
    /// For the read action this is a "Supported Formats (...)" aggregate
    /// entry, one entry per qualifying provider in registration order, then
    /// an "All files (*.*)" catch-all.
    pub fn filter_list(&self, action: Action, data_type: DataType) -> &[String] {
        self.support
            .get(&(action, data_type))
            .map(|s| s.filter_list.as_slice())
            .unwrap_or(&[])
    }

    /// Select the provider claiming to understand the given file.
    ///
    /// Providers whose extension set contains the file's extension are
    /// probed in registration order; the first one whose `identify` confirms
    /// wins. A provider that fails its probe is marked ineligible and the
    /// scan moves on, so another provider claiming the same extension still
    /// gets its chance; a repeated failure signal from an already-ineligible
    /// provider ends the scan. Only extension-matching providers are ever
    /// probed: a file whose extension matches no provider yields `None`
    /// without any content probing.
    ///
    /// `None` is a normal outcome for unsupported files, not an error.
    pub fn identify(&self, filename: &Path) -> Option<&dyn FileProvider> {
        let ext = filename
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        debug!(file = %filename.display(), ext = ext, "Identifying file");

        let mut eligible = vec![true; self.providers.len()];
        for (i, provider) in self.providers.iter().enumerate() {
            if !provider.handles_extension(ext) {
                continue;
            }
            if provider.identify(filename) {
                info!(
                    file = %filename.display(),
                    provider = provider.title(),
                    "Identified file"
                );
                return Some(provider.as_ref());
            }
            if eligible[i] {
                // Give the next provider claiming this extension its chance
                eligible[i] = false;
                continue;
            }
            // A provider already probed once failed again: give up
            break;
        }
        warn!(file = %filename.display(), "Unknown file type");
        None
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
