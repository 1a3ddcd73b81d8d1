use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Amount of a P2P bill; the API carries the value as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillAmount {
    pub currency: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BillStatus {
    pub value: String,
    pub changed_date_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub account: Option<String>,
}

/// A P2P bill issued through the billing API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bill {
    pub site_id: String,
    pub bill_id: String,
    pub amount: BillAmount,
    pub status: BillStatus,
    pub customer: Option<Customer>,
    pub custom_fields: BTreeMap<String, Value>,
    pub comment: Option<String>,
    pub creation_date_time: Option<DateTime<FixedOffset>>,
    pub expiration_date_time: Option<DateTime<FixedOffset>>,
    pub pay_url: Option<String>,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        self.status.value == "PAID"
    }
}

/// A refund issued against a paid P2P bill.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefundBill {
    pub amount: BillAmount,
    pub datetime: Option<DateTime<FixedOffset>>,
    pub refund_id: String,
    pub status: String,
}

impl RefundBill {
    pub fn is_completed(&self) -> bool {
        self.status == "SUCCESS"
    }
}

/// Payment methods a P2P bill can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaySource {
    Qiwi,
    Card,
    Mobile,
}

impl PaySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qiwi => "qw",
            Self::Card => "card",
            Self::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCustomFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_sources_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_code: Option<String>,
}

impl BillCustomFields {
    pub fn is_empty(&self) -> bool {
        self.pay_sources_filter.is_none() && self.theme_code.is_none()
    }
}

/// Body of the bill creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillBody {
    pub amount: BillAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub expiration_date_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<BillCustomFields>,
}

/// Body of a refund request.
#[derive(Debug, Clone, Serialize)]
pub struct RefundBody {
    pub amount: BillAmount,
}
