//! # Pagination Configuration
//!
//! The configuration surface the engine consumes. Loading and merging site
//! configuration files is the host's job; by the time a
//! [`PaginationConfig`] reaches this crate it is already a deserialized
//! struct (serde handles YAML, TOML, and JSON sources equally).
//!
//! ## Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `per_page` | `10` | Documents per page (clamped to at least 1) |
//! | `permalink` | `/page:num/` | URL pattern for pages after the first (`:num` placeholder) |
//! | `index_name` | unset | Index filename for extensionless permalinks (e.g. `index`) |
//! | `extension` | unset | Page file extension (normalized to start with a dot) |
//! | `filters` | empty | Per-metadata-key filter specifications |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::RawFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Documents per page.
    pub per_page: usize,

    /// URL pattern for pages after the first, containing the `:num`
    /// placeholder (and optionally `:max`).
    pub permalink: String,

    /// Index filename to append to page URLs. Leave unset to let the
    /// paginator fall back to `index` where a filename is required.
    pub index_name: Option<String>,

    /// Page file extension (e.g. ".html", "json"). Leave unset for the
    /// paginator's `.html` fallback.
    pub extension: Option<String>,

    /// Filter specification per metadata key, e.g.
    /// `{"category": "software", "date": {"max": "today"}}`.
    pub filters: BTreeMap<String, RawFilter>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: 10,
            permalink: "/page:num/".to_string(),
            index_name: None,
            extension: None,
            filters: BTreeMap::new(),
        }
    }
}

impl PaginationConfig {
    /// Get the per-page size, clamped to at least 1.
    pub fn per_page(&self) -> usize {
        self.per_page.max(1)
    }

    /// Get the configured index filename, empty when unset.
    pub fn index_name(&self) -> &str {
        self.index_name.as_deref().unwrap_or("")
    }

    /// Get the configured extension normalized to start with a dot, empty
    /// when unset.
    pub fn extension(&self) -> String {
        match self.extension.as_deref() {
            None | Some("") => String::new(),
            Some(ext) if ext.starts_with('.') => ext.to_string(),
            Some(ext) => format!(".{}", ext),
        }
    }
}
