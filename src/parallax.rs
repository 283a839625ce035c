const SCROLL_RANGE: (f64, f64) = (0.0, 300.0);
const HERO_SHIFT_RANGE: (f64, f64) = (0.0, -100.0);

/// Linear map from `input` to `output`, holding the boundary value outside
/// the input domain.
pub fn map_clamped(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in_start, in_end) = input;
    let (out_start, out_end) = output;

    if in_start == in_end {
        return out_start;
    }

    let progress = ((value - in_start) / (in_end - in_start)).clamp(0.0, 1.0);
    out_start + (out_end - out_start) * progress
}

/// Vertical hero translation in pixels for a page scroll offset.
pub fn hero_translation(scroll_y: f64) -> f64 {
    if scroll_y.is_nan() {
        return HERO_SHIFT_RANGE.0;
    }
    map_clamped(scroll_y, SCROLL_RANGE, HERO_SHIFT_RANGE)
}

pub fn translate_style(offset: f64) -> String {
    format!("transform: translateY({offset:.2}px);")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn inside_domain_is_negative_third_of_scroll() {
        for scroll in [0.0, 1.0, 45.0, 150.0, 299.5, 300.0] {
            assert!(close(hero_translation(scroll), -scroll / 3.0), "scroll {scroll}");
        }
    }

    #[test]
    fn outside_domain_holds_boundaries() {
        assert!(close(hero_translation(-40.0), 0.0));
        assert!(close(hero_translation(301.0), -100.0));
        assert!(close(hero_translation(12_000.0), -100.0));
    }

    #[test]
    fn nan_scroll_maps_to_rest_position() {
        assert!(close(hero_translation(f64::NAN), 0.0));
    }

    #[test]
    fn degenerate_input_range_returns_output_start() {
        assert!(close(map_clamped(5.0, (2.0, 2.0), (7.0, 9.0)), 7.0));
    }

    #[test]
    fn transform_style_is_formatted_in_pixels() {
        assert_eq!(
            translate_style(hero_translation(150.0)),
            "transform: translateY(-50.00px);"
        );
        assert_eq!(translate_style(0.0), "transform: translateY(0.00px);");
    }
}
