mod applicator;
mod bank_engine;
mod batch;
mod locks;
mod validator;

pub use bank_engine::BankEngine;
pub use batch::BatchReplay;
