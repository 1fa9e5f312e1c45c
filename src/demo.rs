// Demo mode: placeholder slides when no slide list is given
//
// The widget is data-source agnostic; the binary ships a small built-in
// set so every option can be tried without real images.
//
// Run with: cargo run --release -- --autoplay --transition fade

/// Number of placeholder slides in the demo set
const DEMO_SLIDE_COUNT: usize = 9;

/// Generate the placeholder slide references
pub fn placeholder_slides() -> Vec<String> {
    (1..=DEMO_SLIDE_COUNT)
        .map(|i| format!("demo://slide-{i:02}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_set_is_within_display_limit() {
        let slides = placeholder_slides();
        assert_eq!(slides.len(), 9);
        assert_eq!(slides[0], "demo://slide-01");
    }
}
