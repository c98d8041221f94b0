//! Tests for trend scoring

#[cfg(test)]
mod tests {
    use super::super::{ColorMapper, TrendAnalyzer, Window};
    use crate::types::{GameRecord, Player, RiskColor, StatKey};

    fn player_with_points(points: &[f64]) -> Player {
        Player {
            id: "test_player".to_string(),
            name: "Test Player".to_string(),
            team: Some("Testers".to_string()),
            position: None,
            recent_games: points
                .iter()
                .map(|&p| GameRecord {
                    date: None,
                    points: p,
                    rebounds: 5.0,
                    assists: 4.0,
                    threes: 2.0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_window_name_fallback() {
        assert_eq!(Window::from_name("last_5"), Window::Last5);
        assert_eq!(Window::from_name("last_15"), Window::Last15);
        // Unsupported names resolve to the medium window
        assert_eq!(Window::from_name("last_20"), Window::Last10);
        assert_eq!(Window::from_name(""), Window::Last10);
    }

    #[test]
    fn test_window_from_games() {
        assert_eq!(Window::from_games(5), Some(Window::Last5));
        assert_eq!(Window::from_games(10), Some(Window::Last10));
        assert_eq!(Window::from_games(15), Some(Window::Last15));
        assert_eq!(Window::from_games(7), None);
    }

    #[test]
    fn test_effective_window_shrinks_to_available() {
        let analyzer = TrendAnalyzer::default();
        let player = player_with_points(&[30.0, 28.0, 25.0]);

        let result = analyzer.analyze(&player, StatKey::Points, 24.0, Window::Last10);

        assert_eq!(result.window_size, 3);
        assert_eq!(result.hit_count, 3);
        assert!((result.hit_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ties_count_as_hits() {
        let analyzer = TrendAnalyzer::default();
        let player = player_with_points(&[25.0, 25.0, 24.9, 25.1, 20.0]);

        let result = analyzer.analyze(&player, StatKey::Points, 25.0, Window::Last5);

        assert_eq!(result.hit_count, 3);
    }

    #[test]
    fn test_confidence_in_range() {
        let analyzer = TrendAnalyzer::default();
        let cases: &[&[f64]] = &[
            &[40.0, 42.0, 38.0, 45.0, 41.0],
            &[2.0, 0.0, 1.0, 3.0, 0.0],
            &[0.0; 10],
            &[100.0, 0.0, 100.0, 0.0, 100.0],
        ];
        for points in cases {
            let player = player_with_points(points);
            let result = analyzer.analyze(&player, StatKey::Points, 20.0, Window::Last10);
            assert!(result.confidence <= 100);
            assert!(result.hit_count <= result.window_size);
        }
    }

    #[test]
    fn test_zero_average_takes_max_volatility_penalty() {
        let analyzer = TrendAnalyzer::default();
        let player = player_with_points(&[0.0, 0.0, 0.0, 0.0, 0.0]);

        let result = analyzer.analyze(&player, StatKey::Points, 20.5, Window::Last5);

        // 0 hits, max penalty, cushion penalty: clamps to 0
        assert_eq!(result.hit_count, 0);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.color, RiskColor::Red);
    }

    #[test]
    fn test_empty_record_yields_neutral_zero() {
        let analyzer = TrendAnalyzer::default();
        let player = player_with_points(&[]);

        let result = analyzer.analyze(&player, StatKey::Points, 20.0, Window::Last10);

        assert_eq!(result.window_size, 0);
        assert_eq!(result.hit_count, 0);
        assert_eq!(result.confidence, 0);
        assert!((result.hit_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_color_thresholds_scale_with_window() {
        let analyzer = TrendAnalyzer::default();

        // 4/5 over the line: green at the small window
        let hot = player_with_points(&[30.0, 28.0, 27.0, 26.0, 10.0]);
        let result = analyzer.analyze(&hot, StatKey::Points, 25.0, Window::Last5);
        assert_eq!(result.color, RiskColor::Green);

        // 2/5: orange
        let warm = player_with_points(&[30.0, 28.0, 10.0, 12.0, 10.0]);
        let result = analyzer.analyze(&warm, StatKey::Points, 25.0, Window::Last5);
        assert_eq!(result.color, RiskColor::Orange);

        // 1/5: red
        let cold = player_with_points(&[30.0, 11.0, 10.0, 12.0, 10.0]);
        let result = analyzer.analyze(&cold, StatKey::Points, 25.0, Window::Last5);
        assert_eq!(result.color, RiskColor::Red);
    }

    #[test]
    fn test_missing_table_entry_degrades_to_red() {
        use crate::config::ThresholdConfig;
        use std::collections::BTreeMap;

        // An analyzer can be built from tables that never passed
        // validation; a window with no entry must not panic
        let analyzer = TrendAnalyzer::new(ThresholdConfig {
            windows: BTreeMap::new(),
        });
        let player = player_with_points(&[30.0, 28.0, 27.0, 26.0, 25.0]);

        let result = analyzer.analyze(&player, StatKey::Points, 24.0, Window::Last5);

        assert_eq!(result.color, RiskColor::Red);
        assert_eq!(result.hit_count, 5);
    }

    #[test]
    fn test_cushion_bonus_applies() {
        let analyzer = TrendAnalyzer::default();
        // Steady scorer well above a soft line: bonus pushes score up
        let player = player_with_points(&[30.0, 30.0, 30.0, 30.0, 30.0]);

        let with_cushion = analyzer.analyze(&player, StatKey::Points, 20.0, Window::Last5);
        let at_line = analyzer.analyze(&player, StatKey::Points, 30.0, Window::Last5);

        assert!(with_cushion.confidence >= at_line.confidence);
        assert_eq!(with_cushion.confidence, 100); // 100 + 5 bonus clamps
    }

    #[test]
    fn test_display_string_format() {
        assert_eq!(
            ColorMapper::display_string(RiskColor::Green, 7, 10),
            "7/10 games \u{1F7E2}"
        );
        assert_eq!(
            ColorMapper::display_string(RiskColor::Moonshot, 3, 5),
            "3/5 games \u{1F680}"
        );
    }

    #[test]
    fn test_unknown_color_string_defaults_to_orange() {
        assert_eq!(RiskColor::from_str_lossy("chartreuse"), RiskColor::Orange);
        assert_eq!(RiskColor::from_str_lossy("green"), RiskColor::Green);
    }
}
