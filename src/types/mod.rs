pub mod account;
pub mod bank;
