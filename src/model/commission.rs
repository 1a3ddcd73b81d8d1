use serde::{Deserialize, Serialize};

use super::common::{Sum, string_or_number};
use super::payment::{PaymentMethod, TransferSum};

/// Fee quote for a payment through a provider.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Commission {
    #[serde(deserialize_with = "string_or_number")]
    pub provider_id: String,
    pub withdraw_sum: Sum,
    pub enrollment_sum: Sum,
    pub qw_commission: Sum,
    pub funding_source_commission: Sum,
    pub withdraw_to_enrollment_rate: f64,
}

impl Commission {
    /// Total fee charged on top of the enrolled amount.
    pub fn fee(&self) -> f64 {
        self.qw_commission.amount + self.funding_source_commission.amount
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseTotals {
    pub total: TransferSum,
}

/// Body of a commission calculation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionBody {
    pub account: String,
    pub payment_method: PaymentMethod,
    pub purchase_totals: PurchaseTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_record;
    use serde_json::json;

    #[test]
    fn test_map_commission() {
        let commission: Commission = map_record(json!({
            "providerId": 99,
            "withdrawSum": {"amount": 102, "currency": "643"},
            "enrollmentSum": {"amount": 100, "currency": "643"},
            "qwCommission": {"amount": 2, "currency": "643"},
            "fundingSourceCommission": {"amount": 0, "currency": "643"},
            "withdrawToEnrollmentRate": 1
        }))
        .unwrap();
        assert_eq!(commission.provider_id, "99");
        assert_eq!(commission.withdraw_sum.amount, 102.0);
        assert_eq!(commission.fee(), 2.0);
        assert_eq!(commission.withdraw_to_enrollment_rate, 1.0);
    }

    #[test]
    fn test_commission_partial() {
        let commission: Commission =
            map_record(json!({"providerId": "1963", "qwCommission": null})).unwrap();
        assert_eq!(commission.provider_id, "1963");
        assert_eq!(commission.qw_commission, Sum::default());
        assert_eq!(commission.fee(), 0.0);
    }
}
