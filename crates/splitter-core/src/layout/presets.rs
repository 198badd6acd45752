//! Orientation classification and preset split settings.

use serde::{Deserialize, Serialize};

use super::{AspectRatio, LayoutMode};

/// Slice counts offered in the settings panel.
pub const SUPPORTED_COUNTS: [u32; 5] = [1, 2, 4, 6, 9];

/// Width/height at or above which an image counts as landscape.
const LANDSCAPE_THRESHOLD: f64 = 1.2;

/// Width/height at or below which an image counts as portrait.
const PORTRAIT_THRESHOLD: f64 = 0.8;

/// Coarse orientation of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageOrientation {
    Landscape,
    Portrait,
    /// Anything between the landscape and portrait thresholds.
    #[default]
    Square,
}

impl ImageOrientation {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageOrientation::Landscape => "landscape",
            ImageOrientation::Portrait => "portrait",
            ImageOrientation::Square => "square",
        }
    }

    /// Classify by width/height: `>= 1.2` is landscape, `<= 0.8` portrait.
    pub fn classify(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return ImageOrientation::Square;
        }

        let ratio = width as f64 / height as f64;
        if ratio >= LANDSCAPE_THRESHOLD {
            ImageOrientation::Landscape
        } else if ratio <= PORTRAIT_THRESHOLD {
            ImageOrientation::Portrait
        } else {
            ImageOrientation::Square
        }
    }

    /// Layout suggested for this orientation and slice count.
    ///
    /// Two-way splits follow the long edge; everything else is a grid.
    pub fn recommended_layout(self, count: u32) -> LayoutMode {
        if count <= 1 {
            return LayoutMode::Grid;
        }

        match self {
            ImageOrientation::Landscape if count <= 2 => LayoutMode::Horizontal,
            ImageOrientation::Portrait if count <= 2 => LayoutMode::Vertical,
            _ => LayoutMode::Grid,
        }
    }
}

/// Named target platforms with a fixed slice ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetScene {
    /// WeChat Moments: square slices.
    #[default]
    WeChat,
    /// Xiaohongshu: 3:4 portrait slices.
    Xiaohongshu,
    /// User-entered ratio.
    Custom,
}

impl PresetScene {
    /// Parse the names used in settings: `wechat`, `xiaohongshu`, `custom`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "wechat" => Some(PresetScene::WeChat),
            "xiaohongshu" => Some(PresetScene::Xiaohongshu),
            "custom" => Some(PresetScene::Custom),
            _ => None,
        }
    }

    /// The slice ratio for this scene; `custom` is used only for `Custom`.
    pub fn ratio(self, custom: AspectRatio) -> AspectRatio {
        match self {
            PresetScene::WeChat => AspectRatio::SQUARE,
            PresetScene::Xiaohongshu => AspectRatio {
                width: 3.0,
                height: 4.0,
            },
            PresetScene::Custom => custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(ImageOrientation::classify(1200, 1000), ImageOrientation::Landscape);
        assert_eq!(ImageOrientation::classify(1199, 1000), ImageOrientation::Square);
        assert_eq!(ImageOrientation::classify(800, 1000), ImageOrientation::Portrait);
        assert_eq!(ImageOrientation::classify(801, 1000), ImageOrientation::Square);
        assert_eq!(ImageOrientation::classify(1000, 1000), ImageOrientation::Square);
    }

    #[test]
    fn test_classify_degenerate() {
        assert_eq!(ImageOrientation::classify(0, 100), ImageOrientation::Square);
        assert_eq!(ImageOrientation::classify(100, 0), ImageOrientation::Square);
    }

    #[test]
    fn test_recommended_layout() {
        use ImageOrientation::*;

        assert_eq!(Landscape.recommended_layout(1), LayoutMode::Grid);
        assert_eq!(Landscape.recommended_layout(2), LayoutMode::Horizontal);
        assert_eq!(Landscape.recommended_layout(4), LayoutMode::Grid);
        assert_eq!(Portrait.recommended_layout(2), LayoutMode::Vertical);
        assert_eq!(Portrait.recommended_layout(6), LayoutMode::Grid);
        assert_eq!(Square.recommended_layout(2), LayoutMode::Grid);
    }

    #[test]
    fn test_preset_ratios() {
        let custom = AspectRatio::custom(16, 9).unwrap();

        assert_eq!(PresetScene::WeChat.ratio(custom), AspectRatio::SQUARE);
        assert_eq!(PresetScene::Xiaohongshu.ratio(custom).value(), 0.75);
        assert_eq!(PresetScene::Custom.ratio(custom), custom);
    }

    #[test]
    fn test_scene_names() {
        assert_eq!(PresetScene::from_name("WeChat"), Some(PresetScene::WeChat));
        assert_eq!(PresetScene::from_name("xiaohongshu"), Some(PresetScene::Xiaohongshu));
        assert_eq!(PresetScene::from_name("custom"), Some(PresetScene::Custom));
        assert_eq!(PresetScene::from_name("instagram"), None);
        assert_eq!(ImageOrientation::Portrait.as_str(), "portrait");
    }

    #[test]
    fn test_supported_counts_have_presets() {
        for count in SUPPORTED_COUNTS {
            let grid = super::super::calculate_grid(count, true);
            assert_eq!(grid.cell_count(), count);
        }
    }
}
