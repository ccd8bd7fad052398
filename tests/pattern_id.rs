mod tests {
    use lightbars::PatternId;

    #[test]
    fn test_pattern_id_registry_order() {
        assert_eq!(PatternId::COUNT, 21);
        assert_eq!(PatternId::from_raw(0), Some(PatternId::Fill));
        assert_eq!(PatternId::from_raw(12), Some(PatternId::FallingRain));
        assert_eq!(PatternId::from_raw(20), Some(PatternId::Life));
        assert_eq!(PatternId::from_raw(21), None);
    }

    #[test]
    fn test_pattern_id_round_trip() {
        for (index, pattern) in PatternId::ALL.iter().enumerate() {
            assert_eq!(usize::from(pattern.index()), index);
            assert_eq!(PatternId::from_raw(pattern.index()), Some(*pattern));
            assert_eq!(PatternId::parse_from_str(pattern.as_str()), Some(*pattern));
        }
    }

    #[test]
    fn test_pattern_id_parse_rising_drift_sparkle_waves() {
        assert_eq!(
            PatternId::parse_from_str("rising_drift_sparkle_waves"),
            Some(PatternId::RisingDriftSparkleWaves)
        );
    }

    #[test]
    fn test_pattern_id_parse_unknown() {
        assert_eq!(PatternId::parse_from_str("aurora"), None);
        assert_eq!(PatternId::parse_from_str(""), None);
    }

    #[test]
    fn test_pattern_id_default_is_first() {
        assert_eq!(PatternId::default(), PatternId::ALL[0]);
    }
}
