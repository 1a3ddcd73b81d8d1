use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::common::Sum;

/// Direction filter for payment-history queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    In,
    Out,
    QiwiCard,
    #[default]
    All,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::QiwiCard => "QIWI_CARD",
            Self::All => "ALL",
        }
    }
}

/// Payment source filter for payment-history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    QwRub,
    QwUsd,
    QwEur,
    Card,
    Mk,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QwRub => "QW_RUB",
            Self::QwUsd => "QW_USD",
            Self::QwEur => "QW_EUR",
            Self::Card => "CARD",
            Self::Mk => "MK",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Provider {
    pub id: i64,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub keys: Option<String>,
    pub site_url: Option<String>,
}

/// One entry of the wallet payment history.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "txnId")]
    pub transaction_id: i64,
    pub person_id: i64,
    pub date: Option<DateTime<FixedOffset>>,
    pub error_code: i64,
    pub error: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub status_text: String,
    #[serde(rename = "trmTxnId")]
    pub trm_transaction_id: Option<String>,
    pub account: String,
    pub sum: Sum,
    pub commission: Sum,
    pub total: Sum,
    pub provider: Provider,
    pub comment: Option<String>,
    pub currency_rate: f64,
}
