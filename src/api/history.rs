use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};

use crate::client::QiwiClient;
use crate::error::QiwiError;
use crate::format::{format_datetime, join_sources};
use crate::mapper::{map_record, map_records, take_collection};
use crate::method::{ApiMethod, HttpMethod, Payload};
use crate::model::statistic::Statistic;
use crate::model::transaction::{Source, Transaction, TransactionType};
use crate::validation::{MAX_HISTORY_SPAN_DAYS, check_date_span, check_paired, check_range};

const MAX_HISTORY_ROWS: u32 = 50;

/// Resolve an optional window against "now", defaulting to the last 90 days.
fn resolve_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), QiwiError> {
    let span = TimeDelta::days(MAX_HISTORY_SPAN_DAYS);
    let window_before = |end: DateTime<Utc>| {
        end.checked_sub_signed(span)
            .map(|start| (start, end))
            .ok_or_else(|| {
                QiwiError::Validation(format!(
                    "end_date {end} leaves no room for a {MAX_HISTORY_SPAN_DAYS}-day window"
                ))
            })
    };
    match (start, end) {
        (Some(s), Some(e)) => Ok((s, e)),
        (Some(s), None) => Ok((s, Utc::now())),
        (None, Some(e)) => window_before(e),
        (None, None) => window_before(Utc::now()),
    }
}

fn source_names(sources: &[Source]) -> String {
    join_sources(&sources.iter().map(Source::as_str).collect::<Vec<_>>())
}

// ---- Statistics ----

/// Payment totals over a period of at most 90 days.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchStatistics {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    operation: TransactionType,
    sources: Vec<Source>,
}

#[derive(Debug, Clone, Default)]
pub struct FetchStatisticsBuilder {
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    operation: TransactionType,
    sources: Vec<Source>,
}

impl FetchStatistics {
    pub fn builder() -> FetchStatisticsBuilder {
        FetchStatisticsBuilder::default()
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }
}

impl FetchStatisticsBuilder {
    pub fn start_date(mut self, date: impl Into<DateTime<Utc>>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn end_date(mut self, date: impl Into<DateTime<Utc>>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    pub fn operation(mut self, operation: TransactionType) -> Self {
        self.operation = operation;
        self
    }

    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn build(self) -> Result<FetchStatistics, QiwiError> {
        let (start_date, end_date) = resolve_window(self.start_date, self.end_date)?;
        check_date_span(&start_date, &end_date)?;
        Ok(FetchStatistics {
            start_date,
            end_date,
            operation: self.operation,
            sources: self.sources,
        })
    }
}

impl ApiMethod for FetchStatistics {
    type Output = Statistic;

    const PATH: &'static str = "/payment-history/v2/persons/{phone_number}/payments/total";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::from([
            ("startDate".to_string(), format_datetime(Some(&self.start_date))),
            ("endDate".to_string(), format_datetime(Some(&self.end_date))),
            ("operation".to_string(), self.operation.as_str().to_string()),
        ]);
        if !self.sources.is_empty() {
            params.insert("sources".to_string(), source_names(&self.sources));
        }
        params
    }

    fn parse_response(&self, payload: Payload) -> Result<Statistic, QiwiError> {
        map_record(payload.into_json()?)
    }
}

// ---- History ----

/// One page of the wallet payment history.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionHistory {
    rows: u32,
    operation: TransactionType,
    sources: Vec<Source>,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    next_txn: Option<(DateTime<Utc>, i64)>,
}

#[derive(Debug, Clone)]
pub struct TransactionHistoryBuilder {
    rows: u32,
    operation: TransactionType,
    sources: Vec<Source>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    next_txn_date: Option<DateTime<Utc>>,
    next_txn_id: Option<i64>,
}

impl Default for TransactionHistoryBuilder {
    fn default() -> Self {
        Self {
            rows: MAX_HISTORY_ROWS,
            operation: TransactionType::All,
            sources: Vec::new(),
            start_date: None,
            end_date: None,
            next_txn_date: None,
            next_txn_id: None,
        }
    }
}

impl TransactionHistory {
    pub fn builder() -> TransactionHistoryBuilder {
        TransactionHistoryBuilder::default()
    }
}

impl TransactionHistoryBuilder {
    /// Page size, 1 to 50.
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    pub fn operation(mut self, operation: TransactionType) -> Self {
        self.operation = operation;
        self
    }

    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn start_date(mut self, date: impl Into<DateTime<Utc>>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn end_date(mut self, date: impl Into<DateTime<Utc>>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Continue from the last transaction of a previous page.
    pub fn next_page(mut self, txn_date: impl Into<DateTime<Utc>>, txn_id: i64) -> Self {
        self.next_txn_date = Some(txn_date.into());
        self.next_txn_id = Some(txn_id);
        self
    }

    pub fn next_txn_date(mut self, date: impl Into<DateTime<Utc>>) -> Self {
        self.next_txn_date = Some(date.into());
        self
    }

    pub fn next_txn_id(mut self, id: i64) -> Self {
        self.next_txn_id = Some(id);
        self
    }

    pub fn build(self) -> Result<TransactionHistory, QiwiError> {
        check_range(self.rows, 1, MAX_HISTORY_ROWS, "rows")?;
        check_paired(&self.start_date, "start_date", &self.end_date, "end_date")?;
        check_paired(
            &self.next_txn_date,
            "next_txn_date",
            &self.next_txn_id,
            "next_txn_id",
        )?;

        let window = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                check_date_span(&start, &end)?;
                Some((start, end))
            }
            _ => None,
        };

        Ok(TransactionHistory {
            rows: self.rows,
            operation: self.operation,
            sources: self.sources,
            window,
            next_txn: self.next_txn_date.zip(self.next_txn_id),
        })
    }
}

impl ApiMethod for TransactionHistory {
    type Output = Vec<Transaction>;

    const PATH: &'static str = "/payment-history/v2/persons/{phone_number}/payments";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::from([
            ("rows".to_string(), self.rows.to_string()),
            ("operation".to_string(), self.operation.as_str().to_string()),
        ]);
        if !self.sources.is_empty() {
            params.insert("sources".to_string(), source_names(&self.sources));
        }
        if let Some((start, end)) = &self.window {
            params.insert("startDate".to_string(), format_datetime(Some(start)));
            params.insert("endDate".to_string(), format_datetime(Some(end)));
        }
        if let Some((date, id)) = &self.next_txn {
            params.insert("nextTxnDate".to_string(), format_datetime(Some(date)));
            params.insert("nextTxnId".to_string(), id.to_string());
        }
        params
    }

    fn parse_response(&self, payload: Payload) -> Result<Vec<Transaction>, QiwiError> {
        map_records(take_collection(payload.into_json()?, "data")?)
    }
}

// ---- Single transaction ----

fn check_direction(transaction_type: TransactionType) -> Result<(), QiwiError> {
    match transaction_type {
        TransactionType::In | TransactionType::Out => Ok(()),
        other => Err(QiwiError::Validation(format!(
            "transaction type must be IN or OUT, got {}",
            other.as_str()
        ))),
    }
}

/// Details of a single transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInfo {
    transaction_id: i64,
    transaction_type: TransactionType,
}

impl TransactionInfo {
    pub fn new(transaction_id: i64, transaction_type: TransactionType) -> Result<Self, QiwiError> {
        check_direction(transaction_type)?;
        Ok(Self {
            transaction_id,
            transaction_type,
        })
    }
}

impl ApiMethod for TransactionInfo {
    type Output = Transaction;

    const PATH: &'static str = "/payment-history/v2/transactions/{transaction_id}";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("transaction_id", self.transaction_id.to_string())]
    }

    fn params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            "type".to_string(),
            self.transaction_type.as_str().to_string(),
        )])
    }

    fn parse_response(&self, payload: Payload) -> Result<Transaction, QiwiError> {
        map_record(payload.into_json()?)
    }
}

// ---- Receipt ----

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReceiptFormat {
    #[default]
    Pdf,
    Jpeg,
}

impl ReceiptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Jpeg => "JPEG",
        }
    }
}

/// Receipt file of a transaction, returned as raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReceipt {
    transaction_id: i64,
    transaction_type: TransactionType,
    format: ReceiptFormat,
}

impl FetchReceipt {
    pub fn new(
        transaction_id: i64,
        transaction_type: TransactionType,
        format: ReceiptFormat,
    ) -> Result<Self, QiwiError> {
        check_direction(transaction_type)?;
        Ok(Self {
            transaction_id,
            transaction_type,
            format,
        })
    }
}

impl ApiMethod for FetchReceipt {
    type Output = bytes::Bytes;

    const PATH: &'static str = "/payment-history/v1/transactions/{transaction_id}/cheque/file";
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn path_params(&self) -> Vec<(&'static str, String)> {
        vec![("transaction_id", self.transaction_id.to_string())]
    }

    fn params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("type".to_string(), self.transaction_type.as_str().to_string()),
            ("format".to_string(), self.format.as_str().to_string()),
        ])
    }

    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("Accept".to_string(), "*/*".to_string())])
    }

    fn parse_response(&self, payload: Payload) -> Result<bytes::Bytes, QiwiError> {
        payload.into_bytes()
    }
}

impl QiwiClient {
    /// Payment totals for a period.
    ///
    /// GET /payment-history/v2/persons/{phone_number}/payments/total
    pub async fn fetch_statistics(&self, req: &FetchStatistics) -> Result<Statistic, QiwiError> {
        self.execute(req).await
    }

    /// One page of payment history.
    ///
    /// GET /payment-history/v2/persons/{phone_number}/payments
    pub async fn transaction_history(
        &self,
        req: &TransactionHistory,
    ) -> Result<Vec<Transaction>, QiwiError> {
        self.execute(req).await
    }

    /// GET /payment-history/v2/transactions/{transaction_id}?type=IN|OUT
    pub async fn transaction_info(
        &self,
        transaction_id: i64,
        transaction_type: TransactionType,
    ) -> Result<Transaction, QiwiError> {
        self.execute(&TransactionInfo::new(transaction_id, transaction_type)?)
            .await
    }

    /// GET /payment-history/v1/transactions/{transaction_id}/cheque/file
    pub async fn get_receipt(
        &self,
        transaction_id: i64,
        transaction_type: TransactionType,
        format: ReceiptFormat,
    ) -> Result<bytes::Bytes, QiwiError> {
        self.execute(&FetchReceipt::new(transaction_id, transaction_type, format)?)
            .await
    }

    /// Download a receipt and write it to `dest`. Returns the number of bytes written.
    pub async fn save_receipt(
        &self,
        transaction_id: i64,
        transaction_type: TransactionType,
        format: ReceiptFormat,
        dest: impl AsRef<Path>,
    ) -> Result<usize, QiwiError> {
        let data = self
            .get_receipt(transaction_id, transaction_type, format)
            .await?;
        tokio::fs::write(dest.as_ref(), &data)
            .await
            .map_err(|e| QiwiError::Resource {
                path: dest.as_ref().display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(data.len())
    }
}
