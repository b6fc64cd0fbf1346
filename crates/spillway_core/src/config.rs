//! List configuration.

use std::path::PathBuf;
use uuid::Uuid;

/// Default number of items held in memory before spilling.
pub const DEFAULT_MAX_SIZE: usize = 250_000;

/// Configuration for a [`crate::SpillList`].
///
/// Values are taken as given; there is no validation. A `max_size` of zero
/// makes every push spill.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unique list name, used as the segment file prefix.
    pub name: String,

    /// Directory segment files are written to.
    pub write_path: PathBuf,

    /// Number of buffered items that triggers a spill.
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: generate_name(),
            write_path: std::env::temp_dir(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the list name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the segment directory.
    ///
    /// Scratch or test directories are chosen by the caller and passed in
    /// here; the engine never inspects the environment for them.
    #[must_use]
    pub fn write_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.write_path = path.into();
        self
    }

    /// Sets the spill threshold.
    #[must_use]
    pub const fn max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Configuration for a list derived from this one.
    ///
    /// Keeps `write_path` and `max_size`; the name is `name` when given,
    /// otherwise `<self.name>_<suffix>`.
    #[must_use]
    pub fn derive(&self, suffix: &str, name: Option<&str>) -> Self {
        let name = name.map_or_else(|| format!("{}_{suffix}", self.name), str::to_owned);
        Self {
            name,
            write_path: self.write_path.clone(),
            max_size: self.max_size,
        }
    }
}

fn generate_name() -> String {
    format!("spill_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
        assert_eq!(config.write_path, std::env::temp_dir());
        assert!(config.name.starts_with("spill_"));
    }

    #[test]
    fn default_names_are_unique() {
        assert_ne!(Config::default().name, Config::default().name);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .name("orders")
            .write_path("/var/tmp/spill")
            .max_size(10);

        assert_eq!(config.name, "orders");
        assert_eq!(config.write_path, PathBuf::from("/var/tmp/spill"));
        assert_eq!(config.max_size, 10);
    }

    #[test]
    fn derive_appends_suffix() {
        let config = Config::new().name("orders").max_size(3);
        let derived = config.derive("mapped", None);

        assert_eq!(derived.name, "orders_mapped");
        assert_eq!(derived.write_path, config.write_path);
        assert_eq!(derived.max_size, 3);
    }

    #[test]
    fn derive_prefers_explicit_name() {
        let config = Config::new().name("orders");
        assert_eq!(config.derive("filtered", Some("big_orders")).name, "big_orders");
    }
}
