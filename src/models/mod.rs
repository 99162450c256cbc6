mod account;
mod errors;
mod fixed_deposit;
mod request;
mod transaction;

pub use account::{Account, AccountSnapshot};
pub use errors::TransactionError;
pub use fixed_deposit::{FixedDeposit, FixedDepositStatus};
pub use request::{OpenAccountRequest, RequestMetadata, TransactionRequest};
pub use transaction::{
    BillPaymentDetails, BillType, FixedDepositTerms, InternationalTransferDetails, TaxPaymentDetails, TaxType,
    Transaction, TransactionKind, TransactionStatus, TransactionType
};
