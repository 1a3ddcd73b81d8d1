use serde::Deserialize;

use super::common::Sum;

/// Status of a QIWI Master virtual-card order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderDetails {
    pub id: String,
    pub card_alias: String,
    pub status: String,
    pub price: Option<Sum>,
    pub card_id: Option<String>,
}
