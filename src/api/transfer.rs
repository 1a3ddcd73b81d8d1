use chrono::Utc;
use serde_json::Value;

use crate::client::QiwiClient;
use crate::error::QiwiError;
use crate::format::{MAX_COMMENT_CHARS, format_amount, format_comment};
use crate::mapper::map_record;
use crate::method::{ApiMethod, HttpMethod, Payload, to_body};
use crate::model::commission::{Commission, CommissionBody, PurchaseTotals};
use crate::model::payment::{
    PaymentFields, PaymentInfo, PaymentMethod, RUB_CURRENCY_CODE, TransferBody, TransferSum,
    WALLET_TRANSFER_PROVIDER,
};
use crate::validation::{check_amount, check_max_chars, require, require_non_empty};

/// Wallet-to-wallet transfer in rubles.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferToWallet {
    id: String,
    to_account: String,
    amount: f64,
    comment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TransferToWalletBuilder {
    to_account: Option<String>,
    amount: Option<f64>,
    comment: Option<String>,
    id: Option<String>,
}

impl TransferToWallet {
    pub fn builder() -> TransferToWalletBuilder {
        TransferToWalletBuilder::default()
    }

    /// Client-side transaction id sent with the payment.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl TransferToWalletBuilder {
    /// Recipient wallet number, e.g. `+79001234567`.
    pub fn to_account(mut self, account: impl Into<String>) -> Self {
        self.to_account = Some(account.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Override the generated transaction id (milliseconds since the epoch by default).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn build(self) -> Result<TransferToWallet, QiwiError> {
        let to_account = require(self.to_account, "to_account")?;
        require_non_empty(&to_account, "to_account")?;
        let amount = require(self.amount, "amount")?;
        check_amount(amount)?;
        if let Some(comment) = &self.comment {
            check_max_chars(comment.trim(), MAX_COMMENT_CHARS, "comment")?;
        }
        let id = match self.id {
            Some(id) => {
                require_non_empty(&id, "id")?;
                id
            }
            None => Utc::now().timestamp_millis().to_string(),
        };

        Ok(TransferToWallet {
            id,
            to_account,
            amount,
            comment: self.comment.as_deref().map(format_comment),
        })
    }
}

impl ApiMethod for TransferToWallet {
    type Output = PaymentInfo;

    const PATH: &'static str = "/sinap/api/v2/terms/{provider_id}/payments";
    const HTTP_METHOD: HttpMethod = HttpMethod::Post;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("provider_id", WALLET_TRANSFER_PROVIDER.to_string())]
    }

    fn body(&self) -> Result<Option<Value>, QiwiError> {
        to_body(&TransferBody {
            id: self.id.clone(),
            sum: TransferSum {
                amount: format_amount(self.amount),
                currency: RUB_CURRENCY_CODE.to_string(),
            },
            payment_method: PaymentMethod {
                method_type: "Account".to_string(),
                account_id: RUB_CURRENCY_CODE.to_string(),
            },
            comment: self.comment.clone(),
            fields: PaymentFields {
                account: self.to_account.clone(),
            },
        })
    }

    fn parse_response(&self, payload: Payload) -> Result<PaymentInfo, QiwiError> {
        map_record(payload.into_json()?)
    }
}

/// Fee quote for paying `amount` roubles to an account through a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCommission {
    provider_id: String,
    to_account: String,
    amount: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FetchCommissionBuilder {
    provider_id: Option<String>,
    to_account: Option<String>,
    amount: Option<f64>,
}

impl FetchCommission {
    pub fn builder() -> FetchCommissionBuilder {
        FetchCommissionBuilder::default()
    }
}

impl FetchCommissionBuilder {
    /// Defaults to the wallet transfer provider (`99`).
    pub fn provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    pub fn to_account(mut self, account: impl Into<String>) -> Self {
        self.to_account = Some(account.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn build(self) -> Result<FetchCommission, QiwiError> {
        let to_account = require(self.to_account, "to_account")?;
        require_non_empty(&to_account, "to_account")?;
        let amount = require(self.amount, "amount")?;
        check_amount(amount)?;
        let provider_id = self
            .provider_id
            .unwrap_or_else(|| WALLET_TRANSFER_PROVIDER.to_string());
        require_non_empty(&provider_id, "provider_id")?;

        Ok(FetchCommission {
            provider_id,
            to_account,
            amount,
        })
    }
}

impl ApiMethod for FetchCommission {
    type Output = Commission;

    const PATH: &'static str = "/sinap/providers/{provider_id}/onlineCommission";
    const HTTP_METHOD: HttpMethod = HttpMethod::Post;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("provider_id", self.provider_id.clone())]
    }

    fn body(&self) -> Result<Option<Value>, QiwiError> {
        to_body(&CommissionBody {
            account: self.to_account.clone(),
            payment_method: PaymentMethod {
                method_type: "Account".to_string(),
                account_id: RUB_CURRENCY_CODE.to_string(),
            },
            purchase_totals: PurchaseTotals {
                total: TransferSum {
                    amount: format_amount(self.amount),
                    currency: RUB_CURRENCY_CODE.to_string(),
                },
            },
        })
    }

    fn parse_response(&self, payload: Payload) -> Result<Commission, QiwiError> {
        map_record(payload.into_json()?)
    }
}

impl QiwiClient {
    /// POST /sinap/api/v2/terms/99/payments
    pub async fn transfer_money(&self, req: &TransferToWallet) -> Result<PaymentInfo, QiwiError> {
        self.execute(req).await
    }

    /// POST /sinap/providers/{provider_id}/onlineCommission
    pub async fn calc_commission(&self, req: &FetchCommission) -> Result<Commission, QiwiError> {
        self.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::PathParams;
    use serde_json::json;

    #[test]
    fn test_transfer_request() {
        let req = TransferToWallet::builder()
            .to_account("+79001234567")
            .amount(1.5)
            .comment("  thanks  ")
            .id("1681129345000")
            .build()
            .unwrap();
        let request = req.build_request(&PathParams::new()).unwrap();
        assert_eq!(request.endpoint, "/sinap/api/v2/terms/99/payments");
        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(
            request.body.unwrap(),
            json!({
                "id": "1681129345000",
                "sum": {"amount": "1.5", "currency": "643"},
                "paymentMethod": {"type": "Account", "accountId": "643"},
                "comment": "thanks",
                "fields": {"account": "+79001234567"}
            })
        );
    }

    #[test]
    fn test_transfer_generates_id() {
        let req = TransferToWallet::builder()
            .to_account("+79001234567")
            .amount(10.0)
            .build()
            .unwrap();
        assert!(req.id().parse::<i64>().unwrap() > 0);
        let body = req.body().unwrap().unwrap();
        assert_eq!(body["sum"]["amount"], "10");
        assert!(body.get("comment").is_none());
    }

    #[test]
    fn test_transfer_validation() {
        assert!(TransferToWallet::builder().amount(1.0).build().is_err());
        assert!(
            TransferToWallet::builder()
                .to_account("+79001234567")
                .amount(-1.0)
                .build()
                .is_err()
        );
        assert!(
            TransferToWallet::builder()
                .to_account("+79001234567")
                .amount(1.0)
                .comment("x".repeat(256))
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_commission_request() {
        let req = FetchCommission::builder()
            .to_account("+79001234567")
            .amount(100.0)
            .build()
            .unwrap();
        let request = req.build_request(&PathParams::new()).unwrap();
        assert_eq!(request.endpoint, "/sinap/providers/99/onlineCommission");
        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(
            request.body.unwrap(),
            json!({
                "account": "+79001234567",
                "paymentMethod": {"type": "Account", "accountId": "643"},
                "purchaseTotals": {"total": {"amount": "100", "currency": "643"}}
            })
        );
    }

    #[test]
    fn test_commission_provider_and_validation() {
        let req = FetchCommission::builder()
            .provider_id("1963")
            .to_account("4256000000000000")
            .amount(5.25)
            .build()
            .unwrap();
        let request = req.build_request(&PathParams::new()).unwrap();
        assert_eq!(request.endpoint, "/sinap/providers/1963/onlineCommission");

        assert!(FetchCommission::builder().amount(1.0).build().is_err());
        assert!(
            FetchCommission::builder()
                .to_account("+79001234567")
                .build()
                .is_err()
        );
        assert!(
            FetchCommission::builder()
                .provider_id("")
                .to_account("+79001234567")
                .amount(1.0)
                .build()
                .is_err()
        );
    }
}
