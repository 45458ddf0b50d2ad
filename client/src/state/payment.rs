//! Payment history shown on the profile page.

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

use social::format::{format_currency, format_short_date};
use social::model::Transaction;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaymentState {
    pub history: Vec<Transaction>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

/// Display strings for one history row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
    pub id: String,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub status: String,
}

impl From<&Transaction> for HistoryRow {
    fn from(tx: &Transaction) -> Self {
        let description = if tx.description.is_empty() { "Payment".to_owned() } else { tx.description.clone() };
        Self {
            id: tx.id.clone(),
            description,
            amount: format_currency(tx.amount, &tx.currency),
            date: format_short_date(tx.created),
            status: tx.status.clone(),
        }
    }
}

impl PaymentState {
    pub fn rows(&self) -> Vec<HistoryRow> {
        self.history.iter().map(HistoryRow::from).collect()
    }
}
