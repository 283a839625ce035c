//! Entrance animation styles. Transitions themselves live in `style.css`;
//! these helpers produce the inline hidden/visible endpoints and delays.

pub const STAGGER_SECONDS: f64 = 0.1;
pub const REVEAL_OFFSET_PX: f64 = 50.0;

/// Hero entrance timeline: (delay, duration) in seconds.
pub const HERO_PANEL: (f64, f64) = (0.5, 1.0);
pub const HERO_HEADING: (f64, f64) = (0.8, 1.0);
pub const HERO_TAGLINE: (f64, f64) = (1.2, 1.0);
pub const HERO_SUMMARY: (f64, f64) = (1.4, 1.0);

pub fn stagger_delay(index: usize) -> f64 {
    index as f64 * STAGGER_SECONDS
}

pub fn reveal_style(revealed: bool, delay_seconds: f64) -> String {
    let (opacity, offset) = if revealed {
        (1.0, 0.0)
    } else {
        (0.0, REVEAL_OFFSET_PX)
    };
    format!(
        "opacity: {opacity}; transform: translateY({offset}px); transition-delay: {delay_seconds:.2}s;"
    )
}

pub fn entrance_style((delay, duration): (f64, f64)) -> String {
    format!("animation-delay: {delay:.2}s; animation-duration: {duration:.2}s;")
}

/// Filled width of a proficiency bar in percent, 0 until first shown.
pub fn bar_width_percent(fill_fraction: f64, revealed: bool) -> f64 {
    if revealed {
        fill_fraction.clamp(0.0, 1.0) * 100.0
    } else {
        0.0
    }
}

pub fn bar_style(fill_fraction: f64, color: &str, revealed: bool, delay_seconds: f64) -> String {
    format!(
        "width: {:.0}%; background-color: {color}; transition-delay: {delay_seconds:.2}s;",
        bar_width_percent(fill_fraction, revealed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_and_visible_endpoints() {
        assert_eq!(
            reveal_style(false, 0.0),
            "opacity: 0; transform: translateY(50px); transition-delay: 0.00s;"
        );
        assert_eq!(
            reveal_style(true, 0.3),
            "opacity: 1; transform: translateY(0px); transition-delay: 0.30s;"
        );
    }

    #[test]
    fn stagger_grows_by_a_tenth_per_item() {
        assert_eq!(stagger_delay(0), 0.0);
        assert!((stagger_delay(4) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn bar_starts_empty_and_fills_to_fraction() {
        for fill in [0.0, 0.01, 0.5, 0.7, 0.99, 1.0] {
            assert_eq!(bar_width_percent(fill, false), 0.0);
            assert!((bar_width_percent(fill, true) - fill * 100.0).abs() < 1e-9);
        }
        assert_eq!(bar_width_percent(1.5, true), 100.0);
    }

    #[test]
    fn bar_style_carries_color_and_width() {
        assert_eq!(
            bar_style(0.7, "#3776ab", true, 0.1),
            "width: 70%; background-color: #3776ab; transition-delay: 0.10s;"
        );
        assert!(bar_style(0.29, "#000", false, 0.0).starts_with("width: 0%;"));
    }

    #[test]
    fn hero_timeline_is_staged() {
        let delays = [HERO_PANEL.0, HERO_HEADING.0, HERO_TAGLINE.0, HERO_SUMMARY.0];
        assert!(delays.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(
            entrance_style(HERO_HEADING),
            "animation-delay: 0.80s; animation-duration: 1.00s;"
        );
    }
}
