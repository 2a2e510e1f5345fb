//! Receipt storage configuration.

use serde::{Deserialize, Serialize};

/// Local receipt storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded receipt files.
    #[serde(default = "default_receipt_root")]
    pub receipt_root: String,
    /// Maximum receipt upload size in bytes (default 5 MB).
    #[serde(default = "default_max_receipt_size")]
    pub max_receipt_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            receipt_root: default_receipt_root(),
            max_receipt_size_bytes: default_max_receipt_size(),
        }
    }
}

fn default_receipt_root() -> String {
    "./data/receipts".to_string()
}

fn default_max_receipt_size() -> u64 {
    5_242_880 // 5 MB
}
