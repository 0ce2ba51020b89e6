use crate::types::account::{Account, InsufficientFunds};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// position of an account inside a bank's collection, handed out by add_account;
// accounts are never removed, so an id stays valid for the bank's lifetime
pub type AccountId = usize;

// main struct for modelling a bank: a named, ordered collection of accounts
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Bank {
    name: String,
    accounts: Vec<Account>,
}

impl Bank {
    pub fn new(name: impl Into<String>) -> Bank {
        Bank {
            name: name.into(),
            accounts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Appends the account in insertion order (duplicates allowed) and links
    /// it back to this bank by name.
    pub fn add_account(&mut self, mut account: Account) -> AccountId {
        account.set_bank(self.name.clone());
        self.accounts.push(account);
        self.accounts.len() - 1
    }

    /// Debits `source`, then credits `destination` only if the debit went
    /// through, so a failed transfer leaves both accounts untouched. There
    /// is no atomicity beyond that ordering.
    ///
    /// Both ids must have been handed out by [`Bank::add_account`].
    pub fn transfer(
        &mut self,
        source: AccountId,
        destination: AccountId,
        amount: Decimal,
    ) -> Result<(), InsufficientFunds> {
        self.accounts[source].debit(amount)?;
        self.accounts[destination].credit(amount);
        Ok(())
    }
}
