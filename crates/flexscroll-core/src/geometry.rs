//! Content and viewport geometry
//!
//! Content is modelled as doubled around the center for bidirectional
//! scrolling, so half of the measured extent is what an offset can travel
//! in either direction.

use crate::types::{Axis, Size};

/// Clamp range for the resting offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Bounds for a given half-extent and viewport extent
    ///
    /// `min <= 0 <= max` holds for any non-negative input.
    pub fn new(half_extent: f64, viewport_extent: f64) -> Self {
        let half_viewport = viewport_extent / 2.0;
        Self {
            min: (-half_extent + half_viewport).min(0.0),
            max: (half_extent - half_viewport).max(0.0),
        }
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Result of feeding a content measurement to the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Empty or invalid extent, nothing recorded
    Skipped,
    /// First usable measurement
    Initial { half_extent: f64 },
    /// Content changed size; `delta` is the change of the half-extent
    Resized { half_extent: f64, delta: f64 },
}

/// Tracks the measured content and viewport along one axis
#[derive(Debug, Clone)]
pub struct ContentGeometry {
    axis: Axis,
    half_extent: Option<f64>,
    viewport: Size,
}

impl ContentGeometry {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            half_extent: None,
            viewport: Size::ZERO,
        }
    }

    /// Record a content size
    pub fn measure_content(&mut self, size: Size) -> Measurement {
        let extent = size.along(self.axis);
        if !extent.is_finite() || extent <= 0.0 {
            return Measurement::Skipped;
        }

        let half_extent = extent / 2.0;
        match self.half_extent.replace(half_extent) {
            None => Measurement::Initial { half_extent },
            Some(old) => Measurement::Resized {
                half_extent,
                delta: half_extent - old,
            },
        }
    }

    /// Record a viewport size; negative or non-finite extents count as zero
    pub fn measure_viewport(&mut self, size: Size) {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.viewport = Size::new(sanitize(size.width), sanitize(size.height));
    }

    /// Half of the measured content, `None` until content has been measured
    pub fn half_extent(&self) -> Option<f64> {
        self.half_extent
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport.along(self.axis)
    }

    /// Clamp bounds for the resting offset
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.half_extent.unwrap_or(0.0), self.viewport_extent())
    }

    /// Offset that shows the start edge of the content
    pub fn start_edge_offset(&self) -> Option<f64> {
        self.half_extent.map(|half| half - self.viewport_extent() / 2.0)
    }
}
