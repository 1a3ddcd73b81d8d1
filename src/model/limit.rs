use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::common::string_or_number;

/// Limit categories accepted by the actual-limits endpoint.
pub const ALL_LIMIT_TYPES: [&str; 6] = [
    "TURNOVER",
    "REFILL",
    "PAYMENTS_P2P",
    "PAYMENTS_PROVIDER_INTERNATIONALS",
    "PAYMENTS_PROVIDER_PAYOUT",
    "WITHDRAW_CASH",
];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LimitInterval {
    pub date_from: Option<DateTime<FixedOffset>>,
    pub date_till: Option<DateTime<FixedOffset>>,
}

/// One wallet limit: how much of `max` is spent and what remains.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Limit {
    #[serde(deserialize_with = "string_or_number")]
    pub currency: String,
    pub rest: f64,
    pub max: f64,
    pub spent: f64,
    pub interval: LimitInterval,
    #[serde(rename = "type")]
    pub limit_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_records;
    use serde_json::json;

    #[test]
    fn test_map_limits() {
        let limits: Vec<Limit> = map_records(json!([{
            "currency": "RUB",
            "rest": 99900,
            "max": 100000,
            "spent": 100,
            "interval": {
                "dateFrom": "2020-01-01T00:00:00+03:00",
                "dateTill": "2020-02-01T00:00:00+03:00"
            },
            "type": "TURNOVER"
        }]))
        .unwrap();
        assert_eq!(limits[0].limit_type, "TURNOVER");
        assert_eq!(limits[0].rest, 99900.0);
        assert!(limits[0].interval.date_till.is_some());
    }

    #[test]
    fn test_limit_without_interval() {
        let limits: Vec<Limit> = map_records(json!({"type": "REFILL"})).unwrap();
        assert_eq!(limits[0].interval, LimitInterval::default());
    }
}
