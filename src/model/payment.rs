use serde::{Deserialize, Serialize};

use super::common::Sum;

/// Provider id of a transfer to another QIWI wallet.
pub const WALLET_TRANSFER_PROVIDER: &str = "99";

/// ISO 4217 numeric code of the rouble.
pub const RUB_CURRENCY_CODE: &str = "643";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransactionState {
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentTransaction {
    pub id: String,
    pub state: TransactionState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentFields {
    pub account: String,
}

/// Result of a money transfer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentInfo {
    pub id: String,
    pub terms: String,
    pub fields: PaymentFields,
    pub sum: Sum,
    pub source: String,
    pub comment: Option<String>,
    pub transaction: PaymentTransaction,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferSum {
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub method_type: String,
    pub account_id: String,
}

/// Body of a wallet-to-wallet transfer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub id: String,
    pub sum: TransferSum,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub fields: PaymentFields,
}
