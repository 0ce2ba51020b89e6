use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Display;

// the only error kind in the domain core, raised by debit when the
// post-debit balance would drop below zero
#[derive(Debug)]
pub struct InsufficientFunds;

impl Display for InsufficientFunds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Insufficient funds")
    }
}

impl Error for InsufficientFunds {}

// main struct for modelling a single bank account: who owns it and how much is in it
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Account {
    owner: String,
    // exact decimal, never binary floating point: repeated debits/credits
    // of fractional amounts must not drift
    balance: Decimal,
    // name of the bank this account was added to; a label, not ownership
    #[serde(default)]
    bank: Option<String>,
}

impl Account {
    pub fn new(owner: impl Into<String>, balance: Decimal) -> Account {
        Account {
            owner: owner.into(),
            balance,
            bank: None,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn bank(&self) -> Option<&str> {
        self.bank.as_deref()
    }

    pub(crate) fn set_bank(&mut self, bank: String) {
        self.bank = Some(bank);
    }

    /// Subtracts `amount` from the balance. Fails with [`InsufficientFunds`]
    /// when the result would be negative, in which case the balance is left
    /// untouched; a result of exactly zero is fine.
    ///
    /// `amount` itself is not validated: a negative amount silently grows
    /// the balance. Known gap, kept as-is.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), InsufficientFunds> {
        let new_balance = self.balance - amount;
        if new_balance < Decimal::ZERO {
            return Err(InsufficientFunds);
        }
        self.balance = new_balance;
        Ok(())
    }

    /// Adds `amount` to the balance, unconditionally. No upper bound, and
    /// the same missing negative-amount validation as [`Account::debit`].
    pub fn credit(&mut self, amount: Decimal) {
        self.balance = self.balance + amount;
    }
}

// value equality over owner and balance only; the bank relation doesn't count
impl PartialEq for Account {
    fn eq(&self, other: &Account) -> bool {
        self.owner == other.owner && self.balance == other.balance
    }
}
