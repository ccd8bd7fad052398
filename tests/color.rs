mod tests {
    use embassy_time::Instant;
    use lightbars::color::{
        ColorId, Rgb, from_hue, gamma_correct, gamma8, gradient, hsv_to_rgb, hues, partition,
        scale_rgb, with_hue_offset,
    };

    #[test]
    fn test_gradient_endpoints_are_exact() {
        assert_eq!(gradient(0, &[0, 1000], 10), 0);
        assert_eq!(gradient(9, &[0, 1000], 10), 1000);
    }

    #[test]
    fn test_gradient_interpolates_linearly() {
        assert_eq!(gradient(3, &[0, 900], 10), 300);
        assert_eq!(gradient(5, &[1000, 0], 11), 500);
    }

    #[test]
    fn test_gradient_through_three_stops() {
        let stops = [hues::BLUE, hues::MAGENTA, hues::BLUE];
        assert_eq!(gradient(0, &stops, 21), hues::BLUE);
        assert_eq!(gradient(10, &stops, 21), hues::MAGENTA);
        assert_eq!(gradient(20, &stops, 21), hues::BLUE);
    }

    #[test]
    fn test_gradient_degenerate_inputs() {
        assert_eq!(gradient(4, &[], 10), 0);
        assert_eq!(gradient(4, &[123], 10), 123);
        assert_eq!(gradient(0, &[5, 10], 1), 5);
    }

    #[test]
    fn test_partition_bands() {
        let stops = [hues::RED, hues::GREEN, hues::BLUE];
        assert_eq!(partition(0, &stops, 9), hues::RED);
        assert_eq!(partition(2, &stops, 9), hues::RED);
        assert_eq!(partition(3, &stops, 9), hues::GREEN);
        assert_eq!(partition(8, &stops, 9), hues::BLUE);
    }

    #[test]
    fn test_from_hue_wraps() {
        assert_eq!(from_hue(100, -200), 65436);
        assert_eq!(from_hue(65500, 100), 64);
        assert_eq!(from_hue(hues::TEAL, 0), hues::TEAL);
    }

    #[test]
    fn test_hue_offset_rotates_by_256() {
        assert_eq!(with_hue_offset(0, 1), 256);
        assert_eq!(with_hue_offset(65535, 1), 255);
        assert_eq!(with_hue_offset(1000, 0), 1000);
    }

    #[test]
    fn test_hsv_to_rgb_primaries() {
        assert_eq!(hsv_to_rgb(hues::RED), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(hues::GREEN), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(hues::BLUE), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_gamma() {
        assert_eq!(gamma8(0), 0);
        assert_eq!(gamma8(255), 255);
        assert!(gamma8(128) < 128);
        assert_eq!(
            gamma_correct(Rgb::new(255, 0, 255)),
            Rgb::new(255, 0, 255)
        );
    }

    #[test]
    fn test_scale_rgb() {
        assert_eq!(scale_rgb(Rgb::new(255, 128, 0), 255), Rgb::new(255, 128, 0));
        assert_eq!(scale_rgb(Rgb::new(255, 128, 0), 0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_color_registry_round_trip() {
        for (index, color) in ColorId::ALL.iter().enumerate() {
            assert_eq!(usize::from(color.index()), index);
            assert_eq!(ColorId::parse_from_str(color.as_str()), Some(*color));
        }
        assert_eq!(ColorId::COUNT, 25);
        assert_eq!(ColorId::from_raw(25), None);
        assert_eq!(ColorId::parse_from_str("ultraviolet"), None);
    }

    #[test]
    fn test_solid_colors_apply_drift() {
        let now = Instant::from_millis(0);
        assert_eq!(ColorId::Cyan.hue(3, 10, now, 0), hues::CYAN);
        assert_eq!(ColorId::Cyan.hue(3, 10, now, 500), hues::CYAN + 500);
    }

    #[test]
    fn test_gradient_colors_ignore_drift() {
        let now = Instant::from_millis(0);
        assert_eq!(
            ColorId::RedToYellow.hue(0, 10, now, 1500),
            hues::RED
        );
        assert_eq!(
            ColorId::RedToYellow.hue(9, 10, now, -1500),
            hues::YELLOW
        );
        assert_eq!(ColorId::RedGreenBlue.hue(9, 10, now, 700), hues::BLUE);
    }

    #[test]
    fn test_green_cyan_shift_stays_between_stops() {
        for t in (0..200_000).step_by(997) {
            let hue = ColorId::GreenCyanShift.hue(0, 10, Instant::from_millis(t), 0);
            assert!((hues::GREEN..=hues::CYAN).contains(&hue), "{hue} at {t}");
        }
    }
}
