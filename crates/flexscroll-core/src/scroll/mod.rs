//! Settle animations for the scroll offset
//!
//! The component changes its model offset instantly and hands the visual
//! transition to an [`OffsetAnimator`]. The embedding layer renders
//! `FlexScroll::presented_offset`, which samples the animator while it runs.
//!
//! - `easing` - Settle curves (linear, cubic and quintic ease-out)
//! - `timing` - Progress and interpolation helpers
//! - `animation` - The animator trait and the default eased implementation

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::{OffsetAnimator, ScrollAnimator};
pub use crate::config::EasingType;
