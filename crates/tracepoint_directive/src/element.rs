//! Element identity and geometry
//!
//! The host owns its element tree; tracking state is keyed by a stable
//! [`ElementId`] handle instead of attributes stashed on the elements
//! themselves. Geometry is pulled through [`BoundsSource`] whenever a
//! visibility check runs, so bounds are always current at check time.

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle for a host element under instrumentation
    pub struct ElementId;
}

/// Resolved bounds of an element, in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementBounds {
    /// X offset of the left edge from the viewport left
    pub x: f32,
    /// Y offset of the top edge from the viewport top
    pub y: f32,
    /// Computed width
    pub width: f32,
    /// Computed height
    pub height: f32,
}

impl ElementBounds {
    /// Create bounds from position and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge offset from the viewport top
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge offset from the viewport top
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the element lies fully inside a viewport of the given height
    ///
    /// Partial overlap does not count: the view trigger fires only once the
    /// whole element is on screen.
    pub fn fully_visible(&self, viewport_height: f32) -> bool {
        self.top() >= 0.0 && self.bottom() <= viewport_height
    }
}

/// Geometry the host exposes for visibility checks
///
/// Implemented over whatever the host's layout produces. The tracker reads
/// it at view registration and on every admitted scroll notification.
pub trait BoundsSource {
    /// Height of the current viewport
    fn viewport_height(&self) -> f32;

    /// Current bounds for an element, if it is laid out
    fn bounds(&self, element: ElementId) -> Option<ElementBounds>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_on_screen_is_visible() {
        let bounds = ElementBounds::new(0.0, 100.0, 200.0, 50.0);
        assert!(bounds.fully_visible(600.0));
    }

    #[test]
    fn edges_touching_the_viewport_count_as_visible() {
        let at_top = ElementBounds::new(0.0, 0.0, 200.0, 50.0);
        assert!(at_top.fully_visible(600.0));

        let at_bottom = ElementBounds::new(0.0, 550.0, 200.0, 50.0);
        assert!(at_bottom.fully_visible(600.0));
    }

    #[test]
    fn partial_overlap_is_not_visible() {
        let above = ElementBounds::new(0.0, -10.0, 200.0, 50.0);
        assert!(!above.fully_visible(600.0));

        let below = ElementBounds::new(0.0, 580.0, 200.0, 50.0);
        assert!(!below.fully_visible(600.0));
    }

    #[test]
    fn taller_than_viewport_is_never_visible() {
        let tall = ElementBounds::new(0.0, 0.0, 200.0, 800.0);
        assert!(!tall.fully_visible(600.0));
    }
}
