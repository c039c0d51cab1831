//! Presentational components.
//!
//! The About section and its banner derive their inline styles from the
//! viewport width and an intersection flag. Both components inject a
//! stylesheet into the document head while mounted.

mod about;
mod stylesheet;

pub use about::{
    ABOUT_BANNER_CSS, ABOUT_SECTION_CSS, AboutBannerStyle, AboutSectionStyle, FlexDirection,
    MOBILE_BREAKPOINT_PX, about_banner_style, about_section_style,
};
pub use stylesheet::{
    ABOUT_BANNER_STYLESHEET_ID, ABOUT_SECTION_STYLESHEET_ID, MemoryStyleHost, MountedStylesheet,
    StyleHost, mount_about_stylesheets,
};
