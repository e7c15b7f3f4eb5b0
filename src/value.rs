//! Metric values observed in profiles and base/current delta helpers

use serde::{Deserialize, Serialize};

/// A single observed metric or top-K member: a number, a string, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Missing,
}

impl MetricValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, MetricValue::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

/// Percentage change from base to current as a display string.
///
/// Equal inputs render the bare `"0"` (no `%` suffix) and a zero base
/// reports the `"N/A"` sentinel instead of dividing by zero. Changes
/// under a tenth of a percent render as `"+ <0.1 %"` / `"- <0.1 %"`
/// with that exact spacing.
pub fn delta_percentage(base: f64, current: f64) -> String {
    if base == current {
        return "0".to_string();
    }
    if base == 0.0 {
        return crate::NA.to_string();
    }

    let pct = ((current - base) / base * 100.0).abs();
    if base < current {
        if pct < 0.1 {
            "+ <0.1 %".to_string()
        } else {
            format!("+{:.1}%", pct)
        }
    } else if base > current {
        if pct < 0.1 {
            "- <0.1 %".to_string()
        } else {
            format!("-{:.1}%", pct)
        }
    } else {
        // Incomparable inputs (NaN on either side)
        crate::NA.to_string()
    }
}
