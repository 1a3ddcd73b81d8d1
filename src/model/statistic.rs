use serde::Deserialize;

use super::common::Sum;

/// Totals of incoming and outgoing payments over a period, one entry per currency.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Statistic {
    pub incoming_total: Vec<Sum>,
    pub outgoing_total: Vec<Sum>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_record;
    use serde_json::json;

    #[test]
    fn test_map_statistic() {
        let stat: Statistic = map_record(json!({
            "incomingTotal": [{"amount": 3500, "currency": 643}],
            "outgoingTotal": [{"amount": 3497.5, "currency": 643}, {"amount": 10, "currency": 840}]
        }))
        .unwrap();
        assert_eq!(stat.incoming_total.len(), 1);
        assert_eq!(stat.outgoing_total[0].amount, 3497.5);
        assert_eq!(stat.outgoing_total[1].currency, "840");
    }

    #[test]
    fn test_statistic_missing_totals() {
        let stat: Statistic = map_record(json!({"incomingTotal": []})).unwrap();
        assert!(stat.outgoing_total.is_empty());
    }
}
