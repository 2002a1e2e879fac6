use tracing::debug;

use crate::error::{MealError, Result};
use crate::fusion::constants::DEFAULT_WEIGHT_G;
use crate::models::WeightSource;

/// Effective portion weight and where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedWeight {
    pub grams: f64,
    pub source: WeightSource,
}

#[inline]
fn usable(weight: Option<f64>) -> Option<f64> {
    weight.filter(|w| w.is_finite() && *w > 0.0)
}

/// Pick the portion weight: manual, then last sensor reading, then default.
///
/// Never fails. A non-positive default is replaced by `DEFAULT_WEIGHT_G`.
pub fn resolve_weight(
    manual: Option<f64>,
    last_sensor: Option<f64>,
    default_weight: f64,
) -> ResolvedWeight {
    let resolved = if let Some(grams) = usable(manual) {
        ResolvedWeight {
            grams,
            source: WeightSource::Manual,
        }
    } else if let Some(grams) = usable(last_sensor) {
        ResolvedWeight {
            grams,
            source: WeightSource::Sensor,
        }
    } else {
        ResolvedWeight {
            grams: usable(Some(default_weight)).unwrap_or(DEFAULT_WEIGHT_G),
            source: WeightSource::Default,
        }
    };

    debug!(grams = resolved.grams, source = %resolved.source, "portion weight resolved");
    resolved
}

/// Validate a weight supplied by a caller for `field`.
pub fn validate_weight(field: &str, grams: f64) -> Result<f64> {
    if !grams.is_finite() {
        return Err(MealError::invalid_weight(field, "must be a finite number"));
    }
    if grams <= 0.0 {
        return Err(MealError::invalid_weight(
            field,
            format!("must be greater than 0, got {}", grams),
        ));
    }
    Ok(grams)
}

/// Parse a text weight for `field`. Non-numeric input is an invalid weight.
pub fn parse_weight(field: &str, raw: &str) -> Result<f64> {
    let grams: f64 = raw
        .trim()
        .parse()
        .map_err(|_| MealError::invalid_weight(field, format!("'{}' is not a number", raw.trim())))?;
    validate_weight(field, grams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_wins() {
        let w = resolve_weight(Some(150.0), Some(250.0), 100.0);
        assert_eq!(w.grams, 150.0);
        assert_eq!(w.source, WeightSource::Manual);
    }

    #[test]
    fn test_sensor_over_default() {
        let w = resolve_weight(None, Some(250.0), 100.0);
        assert_eq!(w.grams, 250.0);
        assert_eq!(w.source, WeightSource::Sensor);
    }

    #[test]
    fn test_invalid_candidates_fall_through() {
        let w = resolve_weight(Some(0.0), Some(-3.0), 100.0);
        assert_eq!(w.grams, 100.0);
        assert_eq!(w.source, WeightSource::Default);

        let w = resolve_weight(Some(f64::NAN), Some(f64::INFINITY), 100.0);
        assert_eq!(w.source, WeightSource::Default);

        let w = resolve_weight(Some(-1.0), Some(80.0), 100.0);
        assert_eq!(w.source, WeightSource::Sensor);
    }

    #[test]
    fn test_always_positive() {
        let candidates = [None, Some(0.0), Some(-10.0), Some(f64::NAN), Some(42.0)];
        for manual in candidates {
            for sensor in candidates {
                for default in [100.0, 0.0, -5.0, f64::NAN] {
                    let w = resolve_weight(manual, sensor, default);
                    assert!(w.grams > 0.0, "{:?} {:?} {} -> {:?}", manual, sensor, default, w);
                }
            }
        }
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("weight", " 250 ").unwrap(), 250.0);
        assert!(matches!(
            parse_weight("weight", "abc"),
            Err(MealError::InvalidWeight { ref field, .. }) if field == "weight"
        ));
        assert!(parse_weight("weight", "0").is_err());
        assert!(parse_weight("weight", "-12").is_err());
        assert!(parse_weight("weight", "NaN").is_err());
    }
}
