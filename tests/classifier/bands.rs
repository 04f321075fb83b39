use regime_lens::{
    analysis::{RiskIndicators, SentimentLabel},
    classifier::{
        SeverityBand, downside_probability, gauge_rotation_degrees, risk_asymmetry,
        sentiment_label, severity_band,
    },
};

const EPSILON: f64 = 1e-9;

#[test]
fn given_scores_across_range_when_labelled_then_bands_split_at_35_and_65() {
    for step in 0..=1000 {
        let score = f64::from(step) / 10.0;
        let expected = if score < 35.0 {
            SentimentLabel::Bearish
        } else if score < 65.0 {
            SentimentLabel::Neutral
        } else {
            SentimentLabel::Bullish
        };
        assert_eq!(sentiment_label(score), expected, "score {score}");
    }
}

#[test]
fn given_boundary_scores_when_labelled_then_lower_bound_is_inclusive() {
    assert_eq!(sentiment_label(0.0), SentimentLabel::Bearish);
    assert_eq!(sentiment_label(34.9), SentimentLabel::Bearish);
    assert_eq!(sentiment_label(35.0), SentimentLabel::Neutral);
    assert_eq!(sentiment_label(64.9), SentimentLabel::Neutral);
    assert_eq!(sentiment_label(65.0), SentimentLabel::Bullish);
    assert_eq!(sentiment_label(100.0), SentimentLabel::Bullish);
}

#[test]
fn given_boundary_values_when_banded_then_split_at_40_and_70() {
    assert_eq!(severity_band(0.0), SeverityBand::Low);
    assert_eq!(severity_band(39.9), SeverityBand::Low);
    assert_eq!(severity_band(40.0), SeverityBand::Moderate);
    assert_eq!(severity_band(69.9), SeverityBand::Moderate);
    assert_eq!(severity_band(70.0), SeverityBand::High);
    assert_eq!(severity_band(100.0), SeverityBand::High);
}

#[test]
fn given_any_upside_when_downside_derived_then_they_sum_to_100() {
    for upside in 0..=100 {
        let upside = f64::from(upside);
        assert!((downside_probability(upside) + upside - 100.0).abs() < EPSILON);
    }
}

#[test]
fn given_gauge_endpoints_when_rotated_then_needle_spans_half_circle() {
    assert!((gauge_rotation_degrees(0.0) + 90.0).abs() < EPSILON);
    assert!(gauge_rotation_degrees(50.0).abs() < EPSILON);
    assert!((gauge_rotation_degrees(100.0) - 90.0).abs() < EPSILON);
}

#[test]
fn given_upside_30_when_asymmetry_derived_then_downside_70_is_high() {
    let asymmetry = risk_asymmetry(&RiskIndicators {
        bubble_risk: 50.0,
        market_fragility: 50.0,
        upside_probability: 30.0,
    });

    assert_eq!(asymmetry.upside, 30.0);
    assert_eq!(asymmetry.downside, 70.0);
    assert_eq!(asymmetry.downside_band, SeverityBand::High);
}
