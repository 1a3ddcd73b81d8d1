use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::common::{number_or_string, string_or_number};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Balance {
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccountType {
    pub id: String,
    pub title: String,
}

/// One funding source (balance) of the wallet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    pub alias: String,
    pub fs_alias: String,
    pub bank_alias: String,
    pub title: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub has_balance: bool,
    pub balance: Option<Balance>,
    #[serde(deserialize_with = "string_or_number")]
    pub currency: String,
    pub default_account: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthInfo {
    pub person_id: i64,
    pub registration_date: Option<DateTime<FixedOffset>>,
    pub bound_email: Option<String>,
    pub ip: Option<String>,
    pub last_login_date: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentificationLevel {
    pub bank_alias: String,
    pub identification_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractInfo {
    pub contract_id: i64,
    pub creation_date: Option<DateTime<FixedOffset>>,
    pub blocked: bool,
    pub identification_info: Vec<IdentificationLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub default_pay_currency: String,
    pub language: String,
    pub operator: String,
    pub phone_hash: String,
}

/// Profile of the wallet owner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountInfo {
    pub auth_info: Option<AuthInfo>,
    pub contract_info: Option<ContractInfo>,
    pub user_info: Option<UserInfo>,
}

/// Restriction currently imposed on the wallet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Restriction {
    pub restriction_code: String,
    pub restriction_description: String,
}
