//! Human-readable value and date formatting helpers.

use chrono::{DateTime, Datelike, Utc};
use runfly_core::ParamValue;

/// Format a run's creation date as "M/D/YYYY", unpadded, matching how
/// the platform's web client prints it (e.g., "5/3/2019").
pub fn fmt_date(at: DateTime<Utc>) -> String {
    format!("{}/{}/{}", at.month(), at.day(), at.year())
}

/// Format a metric value with four decimal places (e.g., "0.9134").
pub fn fmt_metric(value: f64) -> String {
    format!("{value:.4}")
}

/// Format a logged value: numbers at metric precision, text verbatim.
pub fn fmt_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Number(n) => fmt_metric(*n),
        ParamValue::Text(s) => s.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn dates_are_unpadded() {
        let at = Utc.with_ymd_and_hms(2019, 5, 3, 14, 30, 0).unwrap();
        assert_eq!(fmt_date(at), "5/3/2019");
        let december = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(fmt_date(december), "12/25/2024");
    }

    #[test]
    fn metrics_print_four_decimals() {
        assert_eq!(fmt_metric(0.913_42), "0.9134");
        assert_eq!(fmt_metric(1.0), "1.0000");
        assert_eq!(fmt_metric(-0.5), "-0.5000");
    }

    #[test]
    fn values_keep_text_verbatim() {
        assert_eq!(fmt_value(&ParamValue::Text("adam".into())), "adam");
        assert_eq!(fmt_value(&ParamValue::Number(0.25)), "0.2500");
    }
}
