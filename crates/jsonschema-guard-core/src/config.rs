//! Conversion options.

use serde::{Deserialize, Serialize};

/// Default nesting limit; matches serde_json's own parser recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Schema nodes nested deeper than this become permissive validators.
    pub max_depth: usize,
    /// Record keywords outside the supported subset as conversion notes.
    pub report_ignored_keywords: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            report_ignored_keywords: true,
        }
    }
}
