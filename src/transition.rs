// Transition engine - pure strategies mapping a navigation step to a
// visual state
//
// Each strategy is a pure function of (from, to, geometry): no hidden
// state, no bounds checks (the navigation coordinator pre-validates both
// indices), and re-invoking with the same inputs yields the same result.
// The produced VisualState is the widget's rendering contract - the TUI
// layer interprets stacking, visibility and markers; it never runs
// transition logic of its own.

use crate::geometry::GeometryProvider;

/// Which transition strategy runs when the current slide changes
///
/// Selected once at configuration time. Unknown names in the config
/// normalize to `Strip` rather than failing the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionKind {
    /// Horizontal strip translated by the summed widths of earlier slides
    #[default]
    Strip,
    /// Outgoing slide stacked above the incoming one and marked active
    Fade,
    /// Everything hidden, then only the target shown. Binary, no cross-fade
    Blackout,
    /// Directional card flip: outgoing beneath, incoming on top
    Cards,
}

impl TransitionKind {
    /// Parse a configured name, falling back to the default strategy
    pub fn parse_or_default(name: &str) -> Self {
        match name {
            "fade" => Self::Fade,
            "blackout" => Self::Blackout,
            "cards" => Self::Cards,
            "strip" => Self::Strip,
            other => {
                tracing::warn!(transition = other, "unknown transition, using strip");
                Self::Strip
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strip => "strip",
            Self::Fade => "fade",
            Self::Blackout => "blackout",
            Self::Cards => "cards",
        }
    }

    /// Run the strategy for a committed navigation step.
    ///
    /// `from` and `to` must both be valid, distinct slide indices; the
    /// coordinator guarantees this before calling.
    pub fn apply(&self, from: usize, to: usize, geom: &dyn GeometryProvider) -> VisualState {
        match self {
            Self::Strip => strip(to, geom),
            Self::Fade => fade(from, to, geom.slide_count()),
            Self::Blackout => blackout(to, geom.slide_count()),
            Self::Cards => cards(from, to, geom.slide_count()),
        }
    }
}

/// Role a slide plays in the current transition, driving its styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Fade: the outgoing slide fading over the incoming one
    Active,
    /// Blackout: the single shown slide
    Visible,
    /// Cards: incoming slide entering from the next direction
    ActiveNext,
    /// Cards: incoming slide entering from the before direction
    ActiveBefore,
}

/// Visual attributes of one slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideVisual {
    /// Stacking order; higher renders on top
    pub stack: i8,
    pub visible: bool,
    pub marker: Option<Marker>,
}

impl Default for SlideVisual {
    fn default() -> Self {
        Self {
            stack: 0,
            visible: true,
            marker: None,
        }
    }
}

/// Complete visual state of the slide strip after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualState {
    /// Horizontal translation of the strip container, in layout units.
    /// Zero or negative: slides before the target push the strip left.
    pub strip_offset: i32,
    pub slides: Vec<SlideVisual>,
}

impl VisualState {
    /// State before any transition has run: strip at origin, all slides
    /// in their default stacking
    pub fn initial(count: usize) -> Self {
        Self {
            strip_offset: 0,
            slides: vec![SlideVisual::default(); count],
        }
    }

    /// Index of the top-most visible slide, for the stacked strategies
    pub fn stacked_top(&self) -> Option<usize> {
        self.slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visible)
            .max_by_key(|(_, s)| s.stack)
            .map(|(i, _)| i)
    }
}

/// Strip: translate by the negative sum of rendered widths of all slides
/// before the target. Uses measured widths so variable-width slides work.
fn strip(to: usize, geom: &dyn GeometryProvider) -> VisualState {
    let offset: i32 = (0..to).map(|i| i32::from(geom.slide_width(i))).sum();

    VisualState {
        strip_offset: -offset,
        slides: vec![SlideVisual::default(); geom.slide_count()],
    }
}

/// Fade: outgoing slide gets top stack priority and the active marker so
/// it fades out over the incoming slide, which sits just beneath.
fn fade(from: usize, to: usize, count: usize) -> VisualState {
    let mut slides = vec![
        SlideVisual {
            stack: -1,
            visible: true,
            marker: None,
        };
        count
    ];

    slides[from].stack = 1;
    slides[from].marker = Some(Marker::Active);
    slides[to].stack = 0;

    VisualState {
        strip_offset: 0,
        slides,
    }
}

/// Blackout: hide every slide, then show only the target.
fn blackout(to: usize, count: usize) -> VisualState {
    let mut slides = vec![
        SlideVisual {
            stack: 0,
            visible: false,
            marker: None,
        };
        count
    ];

    slides[to].visible = true;
    slides[to].marker = Some(Marker::Visible);

    VisualState {
        strip_offset: 0,
        slides,
    }
}

/// Cards: incoming slide lands on top, tagged with its travel direction;
/// the outgoing slide sits directly beneath.
fn cards(from: usize, to: usize, count: usize) -> VisualState {
    let marker = if to > from {
        Marker::ActiveNext
    } else {
        Marker::ActiveBefore
    };

    let mut slides = vec![
        SlideVisual {
            stack: -1,
            visible: true,
            marker: None,
        };
        count
    ];

    slides[from].stack = 0;
    slides[to].stack = 1;
    slides[to].marker = Some(marker);

    VisualState {
        strip_offset: 0,
        slides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FixedGeometry;

    fn uniform(count: usize) -> FixedGeometry {
        FixedGeometry::new(vec![200; count], 200)
    }

    #[test]
    fn test_parse_falls_back_to_strip() {
        assert_eq!(TransitionKind::parse_or_default("fade"), TransitionKind::Fade);
        assert_eq!(
            TransitionKind::parse_or_default("wobble"),
            TransitionKind::Strip
        );
    }

    #[test]
    fn test_strip_sums_widths_before_target() {
        let geom = FixedGeometry::new(vec![100, 250, 80, 200], 200);

        let state = TransitionKind::Strip.apply(0, 2, &geom);
        assert_eq!(state.strip_offset, -350);

        // Variable widths, not index * constant
        let state = TransitionKind::Strip.apply(2, 3, &geom);
        assert_eq!(state.strip_offset, -430);
    }

    #[test]
    fn test_strip_to_first_slide_is_origin() {
        let geom = uniform(5);
        let state = TransitionKind::Strip.apply(3, 0, &geom);
        assert_eq!(state.strip_offset, 0);
    }

    #[test]
    fn test_fade_layers_outgoing_over_incoming() {
        let geom = uniform(4);
        let state = TransitionKind::Fade.apply(1, 3, &geom);

        assert_eq!(state.slides[1].stack, 1);
        assert_eq!(state.slides[1].marker, Some(Marker::Active));
        assert_eq!(state.slides[3].stack, 0);
        assert_eq!(state.slides[3].marker, None);
        assert_eq!(state.slides[0].stack, -1);
        assert_eq!(state.slides[2].stack, -1);
    }

    #[test]
    fn test_fade_is_idempotent() {
        let geom = uniform(4);
        let first = TransitionKind::Fade.apply(1, 3, &geom);
        let second = TransitionKind::Fade.apply(1, 3, &geom);
        assert_eq!(first, second);
    }

    #[test]
    fn test_blackout_shows_exactly_the_target() {
        let geom = uniform(5);
        let state = TransitionKind::Blackout.apply(0, 2, &geom);

        let visible: Vec<usize> = state
            .slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visible)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(visible, vec![2]);
        assert_eq!(state.slides[2].marker, Some(Marker::Visible));
        assert_eq!(state.stacked_top(), Some(2));
    }

    #[test]
    fn test_cards_direction_from_index_order() {
        let geom = uniform(5);

        let forward = TransitionKind::Cards.apply(1, 3, &geom);
        assert_eq!(forward.slides[3].marker, Some(Marker::ActiveNext));
        assert_eq!(forward.slides[3].stack, 1);
        assert_eq!(forward.slides[1].stack, 0);

        let backward = TransitionKind::Cards.apply(3, 1, &geom);
        assert_eq!(backward.slides[1].marker, Some(Marker::ActiveBefore));
        assert_eq!(backward.stacked_top(), Some(1));
    }
}
