// Geometry provider - measurement seam between the state machine and the
// rendering surface
//
// The transition engine and controls surface never measure anything
// themselves; they ask a GeometryProvider. Production code backs this with
// the widget's resolved dimensions, tests with fixed per-slide widths.
// All values are in abstract layout units, not terminal cells - the
// renderer owns that mapping.

/// Measurements of a scrollable container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerGeometry {
    /// Visible width of the container
    pub client_width: u16,
    /// Total width of the content, including the overflowed part
    pub scroll_width: u16,
}

impl ContainerGeometry {
    /// Whether the content overflows the visible area
    pub fn overflows(&self) -> bool {
        self.scroll_width > self.client_width
    }
}

/// Per-slide and container measurements consumed by the transition engine
pub trait GeometryProvider {
    /// Rendered width of the slide at `index`
    fn slide_width(&self, index: usize) -> u16;

    /// Number of slides in the strip
    fn slide_count(&self) -> usize;

    /// Measurements of the slide strip container
    fn container(&self) -> ContainerGeometry;
}

/// Production geometry: every slide is rendered at the widget width
///
/// Matches the dimension normalization the widget applies at mount - each
/// slide is sized to the configured width, so the strip is `width * count`
/// units wide.
#[derive(Debug, Clone, Copy)]
pub struct UniformGeometry {
    slide_width: u16,
    count: usize,
    viewport_width: u16,
}

impl UniformGeometry {
    pub fn new(slide_width: u16, count: usize, viewport_width: u16) -> Self {
        Self {
            slide_width,
            count,
            viewport_width,
        }
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport_width = width;
    }
}

impl GeometryProvider for UniformGeometry {
    fn slide_width(&self, _index: usize) -> u16 {
        self.slide_width
    }

    fn slide_count(&self) -> usize {
        self.count
    }

    fn container(&self) -> ContainerGeometry {
        ContainerGeometry {
            client_width: self.viewport_width,
            scroll_width: self.slide_width.saturating_mul(self.count as u16),
        }
    }
}

/// Deterministic geometry with explicit per-slide widths
///
/// Used by tests, and the supported path for variable-width slides: the
/// strip transition must accumulate rendered widths, not assume a constant.
#[derive(Debug, Clone)]
pub struct FixedGeometry {
    widths: Vec<u16>,
    client_width: u16,
}

#[allow(dead_code)] // Constructed by unit tests across the crate
impl FixedGeometry {
    pub fn new(widths: Vec<u16>, client_width: u16) -> Self {
        Self {
            widths,
            client_width,
        }
    }
}

impl GeometryProvider for FixedGeometry {
    fn slide_width(&self, index: usize) -> u16 {
        // Missing measurement degrades to zero width for that frame
        self.widths.get(index).copied().unwrap_or(0)
    }

    fn slide_count(&self) -> usize {
        self.widths.len()
    }

    fn container(&self) -> ContainerGeometry {
        ContainerGeometry {
            client_width: self.client_width,
            scroll_width: self.widths.iter().copied().sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_strip_width() {
        let geom = UniformGeometry::new(200, 5, 200);
        let container = geom.container();

        assert_eq!(container.scroll_width, 1000);
        assert!(container.overflows());
        assert_eq!(geom.slide_width(3), 200);
    }

    #[test]
    fn test_fixed_geometry_out_of_range_width_is_zero() {
        let geom = FixedGeometry::new(vec![100, 150], 300);
        assert_eq!(geom.slide_width(7), 0);
        assert!(!geom.container().overflows());
    }
}
