//! Download file names for slices.

/// Extension used when the original name has none.
const DEFAULT_EXTENSION: &str = "jpg";

/// Splits an uploaded file name into a base and extension, then numbers
/// slices as `{base}_{n}.{ext}` with `n` starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceNaming {
    base: String,
    extension: String,
}

impl SliceNaming {
    /// Parse `photo.final.jpg` into base `photo.final` and extension `jpg`.
    ///
    /// Names without a dot, or with nothing after the last dot, get the
    /// default `jpg` extension and keep the whole name as base.
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((base, ext)) if !ext.is_empty() => Self {
                base: base.to_string(),
                extension: ext.to_string(),
            },
            Some((base, _)) => Self::new(base, DEFAULT_EXTENSION),
            None => Self::new(name, DEFAULT_EXTENSION),
        }
    }

    pub fn new(base: &str, extension: &str) -> Self {
        Self {
            base: base.to_string(),
            extension: extension.to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Name for the slice at zero-based `index`.
    pub fn file_name(&self, index: u32) -> String {
        format!("{}_{}.{}", self.base, u64::from(index) + 1, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let naming = SliceNaming::from_file_name("photo.jpg");
        assert_eq!(naming.base(), "photo");
        assert_eq!(naming.extension(), "jpg");
        assert_eq!(naming.file_name(0), "photo_1.jpg");
        assert_eq!(naming.file_name(8), "photo_9.jpg");
    }

    #[test]
    fn test_keeps_inner_dots() {
        let naming = SliceNaming::from_file_name("trip.2024.png");
        assert_eq!(naming.file_name(1), "trip.2024_2.png");
    }

    #[test]
    fn test_missing_extension_defaults_to_jpg() {
        assert_eq!(SliceNaming::from_file_name("scan").file_name(0), "scan_1.jpg");
        assert_eq!(SliceNaming::from_file_name("scan.").file_name(0), "scan_1.jpg");
    }

    #[test]
    fn test_index_does_not_overflow() {
        let naming = SliceNaming::new("a", "webp");
        assert_eq!(naming.file_name(u32::MAX), "a_4294967296.webp");
    }
}
