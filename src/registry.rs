// Slide registry - the bounded, ordered list of slide references
//
// Slides are opaque string identifiers (typically image URLs or paths).
// The set is created once when the widget receives its slide list and is
// immutable afterwards. Truncation to the configured cap happens here at
// load time, never later.

use tracing::warn;

/// Maximum number of slides a widget instance will display
pub const DEFAULT_SLIDE_LIMIT: usize = 25;

/// An ordered, capped set of slide references
#[derive(Debug, Clone, Default)]
pub struct SlideSet {
    slides: Vec<String>,
}

impl SlideSet {
    /// Build a slide set from an optional input list.
    ///
    /// Missing input yields an empty set rather than an error - callers
    /// are expected to guard for emptiness before navigating. Inputs
    /// longer than `limit` are truncated, preserving original order.
    pub fn load(slides: Option<&[String]>, limit: usize) -> Self {
        let Some(slides) = slides else {
            return Self::default();
        };

        if slides.len() > limit {
            warn!(
                total = slides.len(),
                limit, "slide list exceeds display limit, truncating"
            );
        }

        Self {
            slides: slides.iter().take(limit).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide reference at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(String::as_str)
    }

    /// Position display string for the counter, e.g. "3/9"
    pub fn counter(&self, current: usize) -> String {
        format!("{}/{}", current + 1, self.slides.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("slide-{i}")).collect()
    }

    #[test]
    fn test_load_preserves_order() {
        let input = numbered(9);
        let set = SlideSet::load(Some(&input), DEFAULT_SLIDE_LIMIT);

        assert_eq!(set.len(), 9);
        assert_eq!(set.get(0), Some("slide-0"));
        assert_eq!(set.get(8), Some("slide-8"));
    }

    #[test]
    fn test_load_truncates_to_limit() {
        let input = numbered(30);
        let set = SlideSet::load(Some(&input), DEFAULT_SLIDE_LIMIT);

        assert_eq!(set.len(), 25);
        // First 25 entries survive in order
        assert_eq!(set.get(0), Some("slide-0"));
        assert_eq!(set.get(24), Some("slide-24"));
        assert_eq!(set.get(25), None);
    }

    #[test]
    fn test_load_missing_input_is_empty() {
        let set = SlideSet::load(None, DEFAULT_SLIDE_LIMIT);
        assert!(set.is_empty());
        assert_eq!(set.get(0), None);
    }

    #[test]
    fn test_counter_is_one_based() {
        let input = numbered(9);
        let set = SlideSet::load(Some(&input), DEFAULT_SLIDE_LIMIT);

        assert_eq!(set.counter(0), "1/9");
        assert_eq!(set.counter(8), "9/9");
    }
}
