//! Session-wide settings for the splitter.
//!
//! `SplitterConfig` is deserialized from a plain JavaScript object on the
//! WASM side, so every field has a default and unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;

/// Default upload size limit: 10 MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Default JPEG quality. Exports are full quality unless configured otherwise.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Settings that apply to every split operation in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitterConfig {
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
    /// JPEG quality (1-100) used when exporting JPEG slices.
    pub jpeg_quality: u8,
    /// Filter used when stretching a cell into its slice.
    pub resize_filter: FilterType,
    /// Render cells on the rayon pool when the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            resize_filter: FilterType::default(),
            parallel: true,
        }
    }
}

impl SplitterConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for setting the upload limit in megabytes.
    pub fn with_max_upload_mb(mut self, megabytes: u64) -> Self {
        self.max_upload_bytes = megabytes.saturating_mul(1024 * 1024);
        self
    }
}
