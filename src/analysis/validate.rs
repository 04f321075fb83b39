use crate::analysis::{
    error::{AnalysisError, schema_error},
    types::AnalysisResult,
};

const PERCENT_SCALE: (f64, f64) = (0.0, 100.0);
const UNIT_SCALE: (f64, f64) = (0.0, 1.0);

/// Checks every bounded numeric field against its declared range. Values are
/// never clamped; the first violation is reported as a schema error.
pub fn validate_result(result: &AnalysisResult) -> Result<(), AnalysisError> {
    check_range(
        "market_sentiment.score",
        result.market_sentiment.score,
        PERCENT_SCALE,
    )?;
    check_range(
        "crowd_signals.recession_probability",
        result.crowd_signals.recession_probability,
        UNIT_SCALE,
    )?;

    for (ticker, outlook) in &result.asset_outlook {
        if ticker.trim().is_empty() {
            return Err(schema_error("asset_outlook contains an empty ticker key"));
        }
        check_range(
            &format!("asset_outlook.{ticker}.confidence"),
            outlook.confidence,
            UNIT_SCALE,
        )?;
    }

    for (index, stock) in result.top_stocks.iter().enumerate() {
        if stock.ticker.trim().is_empty() {
            return Err(schema_error(format!("top_stocks[{index}].ticker is empty")));
        }
    }

    let indicators = &result.risk_indicators;
    check_range(
        "risk_indicators.bubble_risk",
        indicators.bubble_risk,
        PERCENT_SCALE,
    )?;
    check_range(
        "risk_indicators.market_fragility",
        indicators.market_fragility,
        PERCENT_SCALE,
    )?;
    check_range(
        "risk_indicators.upside_probability",
        indicators.upside_probability,
        PERCENT_SCALE,
    )?;

    Ok(())
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<(), AnalysisError> {
    if !value.is_finite() {
        return Err(schema_error(format!("{field} must be a finite number")));
    }
    if !(min..=max).contains(&value) {
        return Err(schema_error(format!(
            "{field} must be in [{min},{max}], got {value}"
        )));
    }
    Ok(())
}
