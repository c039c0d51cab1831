//! Style computation for the About section and banner.

use serde::Serialize;

/// Viewports narrower than this stack their content vertically.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

const SECTION_OFFSET_PX: i32 = 40;
const BANNER_OFFSET_PX: i32 = -60;

/// Stylesheet the About section mounts.
pub const ABOUT_SECTION_CSS: &str = "\
.about-section { display: flex; gap: 2rem; transition: opacity 0.8s ease, transform 0.8s ease; }
.about-section p { line-height: 1.6; }";

/// Stylesheet the About banner mounts.
pub const ABOUT_BANNER_CSS: &str = "\
.about-banner { display: flex; align-items: center; transition: opacity 1s ease, transform 1s ease; }
.about-banner img { border-radius: 12px; object-fit: cover; }";

/// Main-axis direction of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    /// Side by side.
    Row,
    /// Stacked.
    Column,
}

impl FlexDirection {
    fn for_width(width_px: u32) -> Self {
        if width_px < MOBILE_BREAKPOINT_PX {
            Self::Column
        } else {
            Self::Row
        }
    }
}

/// Inline style for the About section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutSectionStyle {
    /// Stacking of the text and image columns.
    pub direction: FlexDirection,
    /// 0 until the section scrolls into view, then 1.
    pub opacity: f32,
    /// Vertical offset; 0 once visible.
    pub translate_y_px: i32,
    /// Padding on every side.
    pub padding_px: u32,
}

/// Inline style for the About banner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutBannerStyle {
    /// Stacking of the heading and image.
    pub direction: FlexDirection,
    /// Heading font size.
    pub heading_font_px: u32,
    /// 0 until the banner scrolls into view, then 1.
    pub opacity: f32,
    /// Horizontal offset; 0 once visible.
    pub translate_x_px: i32,
    /// Image width relative to the banner.
    pub image_width_percent: u8,
}

fn opacity(visible: bool) -> f32 {
    if visible { 1.0 } else { 0.0 }
}

/// Style of the About section for a viewport `width_px` wide.
///
/// The section fades in and slides up once `visible` turns true.
///
/// # Examples
/// ```
/// use frontend::presentation::{FlexDirection, about_section_style};
///
/// let style = about_section_style(375, false);
/// assert_eq!(style.direction, FlexDirection::Column);
/// assert_eq!(style.translate_y_px, 40);
/// ```
pub fn about_section_style(width_px: u32, visible: bool) -> AboutSectionStyle {
    let direction = FlexDirection::for_width(width_px);
    AboutSectionStyle {
        direction,
        opacity: opacity(visible),
        translate_y_px: if visible { 0 } else { SECTION_OFFSET_PX },
        padding_px: match direction {
            FlexDirection::Column => 24,
            FlexDirection::Row => 64,
        },
    }
}

/// Style of the About banner; slides in from the left when visible.
pub fn about_banner_style(width_px: u32, visible: bool) -> AboutBannerStyle {
    let direction = FlexDirection::for_width(width_px);
    let (heading_font_px, image_width_percent) = match direction {
        FlexDirection::Column => (28, 100),
        FlexDirection::Row => (48, 45),
    };
    AboutBannerStyle {
        direction,
        heading_font_px,
        opacity: opacity(visible),
        translate_x_px: if visible { 0 } else { BANNER_OFFSET_PX },
        image_width_percent,
    }
}
