//! Store configuration.

use std::path::PathBuf;

/// Locations of the backing resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// JSON document holding the product sequence
    pub data_file: PathBuf,
    /// Append-only request log
    pub request_log: PathBuf,
}

impl StoreConfig {
    /// Both resources inside `dir`, with the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            data_file: dir.join("products.json"),
            request_log: dir.join("requests.log"),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locations() {
        let config = StoreConfig::default();

        assert_eq!(config.data_file, PathBuf::from("data/products.json"));
        assert_eq!(config.request_log, PathBuf::from("data/requests.log"));
    }
}
