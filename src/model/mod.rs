pub mod account;
pub mod bill;
pub mod commission;
pub mod common;
pub mod identification;
pub mod limit;
pub mod order;
pub mod payment;
pub mod statistic;
pub mod transaction;

pub use account::{Account, AccountInfo, Balance, Restriction};
pub use bill::{Bill, RefundBill};
pub use commission::Commission;
pub use common::Sum;
pub use identification::Identification;
pub use limit::Limit;
pub use order::OrderDetails;
pub use payment::PaymentInfo;
pub use statistic::Statistic;
pub use transaction::Transaction;
