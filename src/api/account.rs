use std::collections::BTreeMap;

use crate::client::QiwiClient;
use crate::error::QiwiError;
use crate::mapper::{map_record, map_records, shape_of, take_collection};
use crate::method::{ApiMethod, HttpMethod, Payload};
use crate::model::account::{Account, AccountInfo, Balance, Restriction};
use crate::model::limit::{ALL_LIMIT_TYPES, Limit};

/// Funding sources (balances) of the wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchAccounts;

impl ApiMethod for FetchAccounts {
    type Output = Vec<Account>;

    const PATH: &'static str = "/funding-sources/v2/persons/{phone_number}/accounts";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn parse_response(&self, payload: Payload) -> Result<Vec<Account>, QiwiError> {
        map_records(take_collection(payload.into_json()?, "accounts")?)
    }
}

/// Balance of the default funding source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchBalance;

impl ApiMethod for FetchBalance {
    type Output = Balance;

    const PATH: &'static str = FetchAccounts::PATH;
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn parse_response(&self, payload: Payload) -> Result<Balance, QiwiError> {
        let json = payload.into_json()?;
        let shape = shape_of(&json);
        let accounts = FetchAccounts.parse_response(Payload::Json(json))?;
        default_balance(accounts).ok_or_else(|| QiwiError::Mapping {
            expected: "account with a balance",
            shape,
            reason: "no funding source carries a balance".into(),
        })
    }
}

/// The default account's balance, else the first account that has one.
fn default_balance(accounts: Vec<Account>) -> Option<Balance> {
    let mut fallback = None;
    for account in accounts {
        match (account.default_account, account.balance) {
            (true, Some(balance)) => return Some(balance),
            (false, Some(balance)) if fallback.is_none() => fallback = Some(balance),
            _ => {}
        }
    }
    fallback
}

/// Profile of the token owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchAccountInfo;

impl ApiMethod for FetchAccountInfo {
    type Output = AccountInfo;

    const PATH: &'static str = "/person-profile/v1/profile/current";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("authInfoEnabled".to_string(), "true".to_string()),
            ("contractInfoEnabled".to_string(), "true".to_string()),
            ("userInfoEnabled".to_string(), "true".to_string()),
        ])
    }

    fn parse_response(&self, payload: Payload) -> Result<AccountInfo, QiwiError> {
        map_record(payload.into_json()?)
    }
}

/// Restrictions currently imposed on the wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchRestrictions;

impl ApiMethod for FetchRestrictions {
    type Output = Vec<Restriction>;

    const PATH: &'static str = "/person-profile/v1/persons/{phone_number}/status/restrictions";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn parse_response(&self, payload: Payload) -> Result<Vec<Restriction>, QiwiError> {
        map_records(payload.into_json()?)
    }
}

/// Actual wallet limits for the requested categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchLimits {
    types: Vec<String>,
}

impl FetchLimits {
    /// Every known limit category.
    pub fn all() -> Self {
        Self {
            types: ALL_LIMIT_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn new<S: Into<String>>(types: impl IntoIterator<Item = S>) -> Result<Self, QiwiError> {
        let types: Vec<String> = types.into_iter().map(Into::into).collect();
        if types.is_empty() {
            return Err(QiwiError::Validation(
                "at least one limit type is required".into(),
            ));
        }
        if let Some(unknown) = types.iter().find(|t| !ALL_LIMIT_TYPES.contains(&t.as_str())) {
            return Err(QiwiError::Validation(format!(
                "unknown limit type {unknown}"
            )));
        }
        Ok(Self { types })
    }
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self::all()
    }
}

impl ApiMethod for FetchLimits {
    type Output = Vec<Limit>;

    const PATH: &'static str = "/qw-limits/v1/persons/{phone_number}/actual-limits";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn params(&self) -> BTreeMap<String, String> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (format!("types[{i}]"), t.clone()))
            .collect()
    }

    /// Limits come grouped by country code; groups are flattened in key order.
    fn parse_response(&self, payload: Payload) -> Result<Vec<Limit>, QiwiError> {
        match take_collection(payload.into_json()?, "limits")? {
            serde_json::Value::Object(by_country) => {
                let mut limits = Vec::new();
                for (_, group) in by_country {
                    limits.extend(map_records::<Limit>(group)?);
                }
                Ok(limits)
            }
            other => map_records(other),
        }
    }
}

impl QiwiClient {
    /// GET /funding-sources/v2/persons/{phone_number}/accounts
    pub async fn get_accounts(&self) -> Result<Vec<Account>, QiwiError> {
        self.execute(&FetchAccounts).await
    }

    /// Balance of the default account.
    pub async fn get_balance(&self) -> Result<Balance, QiwiError> {
        self.execute(&FetchBalance).await
    }

    /// GET /person-profile/v1/profile/current
    pub async fn get_account_info(&self) -> Result<AccountInfo, QiwiError> {
        self.execute(&FetchAccountInfo).await
    }

    /// GET /person-profile/v1/persons/{phone_number}/status/restrictions
    pub async fn get_restrictions(&self) -> Result<Vec<Restriction>, QiwiError> {
        self.execute(&FetchRestrictions).await
    }

    /// GET /qw-limits/v1/persons/{phone_number}/actual-limits
    pub async fn get_limits(&self) -> Result<Vec<Limit>, QiwiError> {
        self.execute(&FetchLimits::all()).await
    }
}
