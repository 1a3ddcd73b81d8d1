pub mod account;
pub mod history;
pub mod identification;
pub mod master;
pub mod p2p;
pub mod transfer;

pub use account::{FetchAccountInfo, FetchAccounts, FetchBalance, FetchLimits, FetchRestrictions};
pub use history::{FetchReceipt, FetchStatistics, ReceiptFormat, TransactionHistory, TransactionInfo};
pub use identification::{Authenticate, FetchIdentification};
pub use master::FetchOrderDetails;
pub use p2p::{CheckP2PBill, CreateP2PBill, RefundP2PBill, RejectP2PBill};
pub use transfer::{FetchCommission, TransferToWallet};
