mod errors;
mod monetary;

use uuid::Uuid;

pub use monetary::Monetary;

pub type AccountId = Uuid;
pub type TransactionId = Uuid;
