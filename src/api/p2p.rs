//! P2P billing: invoices paid through the QIWI payment form.
//!
//! These methods target the P2P host and are authorized with the P2P
//! secret key instead of the wallet token.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::client::QiwiClient;
use crate::error::QiwiError;
use crate::format::{MAX_COMMENT_CHARS, format_amount, format_comment, format_datetime};
use crate::mapper::map_record;
use crate::method::{ApiMethod, HttpMethod, Payload, Service, to_body};
use crate::model::bill::{
    Bill, BillAmount, BillCustomFields, CreateBillBody, PaySource, RefundBill, RefundBody,
};
use crate::validation::{
    check_amount, check_exclusive, check_max_chars, require, require_non_empty,
};

/// Bill lifetime used when neither an expiry nor a lifetime is given.
pub const DEFAULT_BILL_LIFETIME_DAYS: i64 = 2;

const MAX_BILL_ID_CHARS: usize = 200;

const BILL_PATH: &str = "/partner/bill/v1/bills/{bill_id}";

fn check_bill_id(bill_id: &str) -> Result<(), QiwiError> {
    require_non_empty(bill_id, "bill_id")?;
    check_max_chars(bill_id, MAX_BILL_ID_CHARS, "bill_id")
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateP2PBill {
    bill_id: String,
    amount: f64,
    currency: String,
    comment: Option<String>,
    expiration: DateTime<Utc>,
    custom_fields: BillCustomFields,
}

#[derive(Debug, Clone, Default)]
pub struct CreateP2PBillBuilder {
    bill_id: Option<String>,
    amount: Option<f64>,
    currency: Option<String>,
    comment: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    lifetime: Option<TimeDelta>,
    pay_sources: Vec<PaySource>,
    theme_code: Option<String>,
}

impl CreateP2PBill {
    pub fn builder() -> CreateP2PBillBuilder {
        CreateP2PBillBuilder::default()
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }
}

impl CreateP2PBillBuilder {
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Merchant-side bill id. A random UUID is used when unset.
    pub fn bill_id(mut self, bill_id: impl Into<String>) -> Self {
        self.bill_id = Some(bill_id.into());
        self
    }

    /// Defaults to `RUB`.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Absolute expiry. Cannot be combined with [`lifetime`](Self::lifetime).
    pub fn expires_at(mut self, at: impl Into<DateTime<Utc>>) -> Self {
        self.expires_at = Some(at.into());
        self
    }

    /// Expiry relative to the moment the bill is built.
    pub fn lifetime(mut self, lifetime: TimeDelta) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Restrict the payment form to a source; may be called repeatedly.
    pub fn pay_source(mut self, source: PaySource) -> Self {
        if !self.pay_sources.contains(&source) {
            self.pay_sources.push(source);
        }
        self
    }

    /// Payment form styling code from the P2P merchant settings.
    pub fn theme_code(mut self, code: impl Into<String>) -> Self {
        self.theme_code = Some(code.into());
        self
    }

    pub fn build(self) -> Result<CreateP2PBill, QiwiError> {
        let amount = require(self.amount, "amount")?;
        check_amount(amount)?;
        check_exclusive(&self.expires_at, "expires_at", &self.lifetime, "lifetime")?;
        if let Some(comment) = &self.comment {
            check_max_chars(comment.trim(), MAX_COMMENT_CHARS, "comment")?;
        }

        let bill_id = self
            .bill_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        check_bill_id(&bill_id)?;

        let now = Utc::now();
        let expiration = match (self.expires_at, self.lifetime) {
            (Some(at), _) => at,
            (None, lifetime) => {
                let lifetime =
                    lifetime.unwrap_or_else(|| TimeDelta::days(DEFAULT_BILL_LIFETIME_DAYS));
                now.checked_add_signed(lifetime).ok_or_else(|| {
                    QiwiError::Validation(format!(
                        "bill lifetime of {} days is out of range",
                        lifetime.num_days()
                    ))
                })?
            }
        };
        if expiration <= now {
            return Err(QiwiError::Validation(format!(
                "bill lifetime must end in the future, got {}",
                format_datetime(Some(&expiration))
            )));
        }

        let currency = self.currency.unwrap_or_else(|| "RUB".to_string());
        require_non_empty(&currency, "currency")?;

        let pay_sources_filter = (!self.pay_sources.is_empty()).then(|| {
            self.pay_sources
                .iter()
                .map(PaySource::as_str)
                .collect::<Vec<_>>()
                .join(",")
        });

        Ok(CreateP2PBill {
            bill_id,
            amount,
            currency,
            comment: self.comment.as_deref().map(format_comment),
            expiration,
            custom_fields: BillCustomFields {
                pay_sources_filter,
                theme_code: self.theme_code,
            },
        })
    }
}

impl ApiMethod for CreateP2PBill {
    type Output = Bill;

    const PATH: &'static str = BILL_PATH;
    const HTTP_METHOD: HttpMethod = HttpMethod::Put;
    const SERVICE: Service = Service::P2P;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("bill_id", self.bill_id.clone())]
    }

    fn body(&self) -> Result<Option<Value>, QiwiError> {
        let custom_fields =
            (!self.custom_fields.is_empty()).then(|| self.custom_fields.clone());
        to_body(&CreateBillBody {
            amount: BillAmount {
                currency: self.currency.clone(),
                value: format_amount(self.amount),
            },
            comment: self.comment.clone(),
            expiration_date_time: format_datetime(Some(&self.expiration)),
            custom_fields,
        })
    }

    fn parse_response(&self, payload: Payload) -> Result<Bill, QiwiError> {
        map_record(payload.into_json()?)
    }
}

/// Current state of a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckP2PBill {
    bill_id: String,
}

impl CheckP2PBill {
    pub fn new(bill_id: impl Into<String>) -> Result<Self, QiwiError> {
        let bill_id = bill_id.into();
        check_bill_id(&bill_id)?;
        Ok(Self { bill_id })
    }
}

impl ApiMethod for CheckP2PBill {
    type Output = Bill;

    const PATH: &'static str = BILL_PATH;
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;
    const SERVICE: Service = Service::P2P;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("bill_id", self.bill_id.clone())]
    }

    fn parse_response(&self, payload: Payload) -> Result<Bill, QiwiError> {
        map_record(payload.into_json()?)
    }
}

/// Cancel an unpaid bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectP2PBill {
    bill_id: String,
}

impl RejectP2PBill {
    pub fn new(bill_id: impl Into<String>) -> Result<Self, QiwiError> {
        let bill_id = bill_id.into();
        check_bill_id(&bill_id)?;
        Ok(Self { bill_id })
    }
}

impl ApiMethod for RejectP2PBill {
    type Output = Bill;

    const PATH: &'static str = "/partner/bill/v1/bills/{bill_id}/reject";
    const HTTP_METHOD: HttpMethod = HttpMethod::Post;
    const SERVICE: Service = Service::P2P;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("bill_id", self.bill_id.clone())]
    }

    fn parse_response(&self, payload: Payload) -> Result<Bill, QiwiError> {
        map_record(payload.into_json()?)
    }
}

/// Return money of a paid bill, in full or in part.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundP2PBill {
    bill_id: String,
    refund_id: String,
    amount: f64,
    currency: String,
}

#[derive(Debug, Clone, Default)]
pub struct RefundP2PBillBuilder {
    bill_id: Option<String>,
    refund_id: Option<String>,
    amount: Option<f64>,
    currency: Option<String>,
}

impl RefundP2PBill {
    pub fn builder() -> RefundP2PBillBuilder {
        RefundP2PBillBuilder::default()
    }

    pub fn refund_id(&self) -> &str {
        &self.refund_id
    }
}

impl RefundP2PBillBuilder {
    pub fn bill_id(mut self, bill_id: impl Into<String>) -> Self {
        self.bill_id = Some(bill_id.into());
        self
    }

    /// Merchant-side refund id. A random UUID is used when unset.
    pub fn refund_id(mut self, refund_id: impl Into<String>) -> Self {
        self.refund_id = Some(refund_id.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Defaults to `RUB`.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn build(self) -> Result<RefundP2PBill, QiwiError> {
        let bill_id = require(self.bill_id, "bill_id")?;
        check_bill_id(&bill_id)?;
        let amount = require(self.amount, "amount")?;
        check_amount(amount)?;

        let refund_id = self
            .refund_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        require_non_empty(&refund_id, "refund_id")?;
        check_max_chars(&refund_id, MAX_BILL_ID_CHARS, "refund_id")?;

        let currency = self.currency.unwrap_or_else(|| "RUB".to_string());
        require_non_empty(&currency, "currency")?;

        Ok(RefundP2PBill {
            bill_id,
            refund_id,
            amount,
            currency,
        })
    }
}

impl ApiMethod for RefundP2PBill {
    type Output = RefundBill;

    const PATH: &'static str = "/partner/bill/v1/bills/{bill_id}/refunds/{refund_id}";
    const HTTP_METHOD: HttpMethod = HttpMethod::Put;
    const SERVICE: Service = Service::P2P;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("bill_id", self.bill_id.clone()),
            ("refund_id", self.refund_id.clone()),
        ]
    }

    fn body(&self) -> Result<Option<Value>, QiwiError> {
        to_body(&RefundBody {
            amount: BillAmount {
                currency: self.currency.clone(),
                value: format_amount(self.amount),
            },
        })
    }

    fn parse_response(&self, payload: Payload) -> Result<RefundBill, QiwiError> {
        map_record(payload.into_json()?)
    }
}

impl QiwiClient {
    /// PUT /partner/bill/v1/bills/{bill_id}
    pub async fn create_p2p_bill(&self, req: &CreateP2PBill) -> Result<Bill, QiwiError> {
        self.execute(req).await
    }

    /// GET /partner/bill/v1/bills/{bill_id}
    pub async fn check_p2p_bill(&self, bill_id: impl Into<String>) -> Result<Bill, QiwiError> {
        self.execute(&CheckP2PBill::new(bill_id)?).await
    }

    /// POST /partner/bill/v1/bills/{bill_id}/reject
    pub async fn reject_p2p_bill(&self, bill_id: impl Into<String>) -> Result<Bill, QiwiError> {
        self.execute(&RejectP2PBill::new(bill_id)?).await
    }

    /// PUT /partner/bill/v1/bills/{bill_id}/refunds/{refund_id}
    pub async fn refund_p2p_bill(&self, req: &RefundP2PBill) -> Result<RefundBill, QiwiError> {
        self.execute(req).await
    }
}
