//! Tests for core types

#[cfg(test)]
mod tests {
    use super::super::types::*;

    #[test]
    fn test_odds_value_numeric() {
        assert_eq!(OddsValue::Num(125.0).american(), Some(125.0));
        assert_eq!(OddsValue::Num(-110.0).american(), Some(-110.0));
    }

    #[test]
    fn test_odds_value_string_strips_plus() {
        assert_eq!(OddsValue::Text("+125".to_string()).american(), Some(125.0));
        assert_eq!(OddsValue::Text("125".to_string()).american(), Some(125.0));
        assert_eq!(OddsValue::Text("-110".to_string()).american(), Some(-110.0));
        assert_eq!(OddsValue::Text(" +140 ".to_string()).american(), Some(140.0));
    }

    #[test]
    fn test_odds_value_unparseable() {
        assert_eq!(OddsValue::Text("even".to_string()).american(), None);
        assert_eq!(OddsValue::Text("".to_string()).american(), None);
        assert_eq!(OddsValue::Num(f64::NAN).american(), None);
        assert_eq!(OddsValue::Num(f64::INFINITY).american(), None);
    }

    #[test]
    fn test_odds_value_untagged_deserialization() {
        let num: OddsValue = serde_json::from_str("-115").unwrap();
        assert_eq!(num.american(), Some(-115.0));
        let text: OddsValue = serde_json::from_str("\"+125\"").unwrap();
        assert_eq!(text.american(), Some(125.0));
    }

    #[test]
    fn test_stat_key_from_market() {
        assert_eq!(StatKey::from_market("points"), Some(StatKey::Points));
        assert_eq!(StatKey::from_market("player_rebounds"), Some(StatKey::Rebounds));
        assert_eq!(StatKey::from_market("steals"), None);
    }

    #[test]
    fn test_game_record_stat_lookup() {
        let game = GameRecord {
            date: None,
            points: 31.0,
            rebounds: 8.0,
            assists: 5.0,
            threes: 4.0,
        };
        assert_eq!(game.stat(StatKey::Points), 31.0);
        assert_eq!(game.stat(StatKey::Threes), 4.0);
    }

    #[test]
    fn test_player_window_helpers() {
        let player = Player {
            id: "p1".to_string(),
            name: "Test".to_string(),
            team: None,
            position: None,
            recent_games: (0..10)
                .map(|i| GameRecord {
                    date: None,
                    points: 20.0 + i as f64,
                    rebounds: 5.0,
                    assists: 3.0,
                    threes: 1.0,
                })
                .collect(),
        };

        // First 5 games: 20..24
        assert_eq!(player.average_stat(StatKey::Points, 5), 22.0);
        assert_eq!(player.hit_count(StatKey::Points, 22.0, 5), 3);
        // Window larger than history clamps to what exists
        assert_eq!(player.average_stat(StatKey::Points, 50), 24.5);
    }

    #[test]
    fn test_player_deviation_population_formula() {
        let player = Player {
            id: "p1".to_string(),
            name: "Test".to_string(),
            team: None,
            position: None,
            recent_games: [10.0, 20.0]
                .iter()
                .map(|&p| GameRecord {
                    date: None,
                    points: p,
                    rebounds: 0.0,
                    assists: 0.0,
                    threes: 0.0,
                })
                .collect(),
        };
        // mean 15, squared deviations 25 each, population variance 25, sqrt 5
        assert!((player.deviation(StatKey::Points, 2) - 5.0).abs() < 1e-9);
        // Single-game sample has no spread
        assert_eq!(player.deviation(StatKey::Points, 1), 0.0);
    }

    #[test]
    fn test_risk_color_serde_lowercase() {
        assert_eq!(serde_json::to_string(&RiskColor::Green).unwrap(), "\"green\"");
        let color: RiskColor = serde_json::from_str("\"moonshot\"").unwrap();
        assert_eq!(color, RiskColor::Moonshot);
    }
}
