//! Dataset statistics
//!
//! Read-only summary of a generated (or re-loaded) dataset: count, date
//! range, revenue, average order value, and the most frequent item and
//! payment method.
//!
//! "Date range" reports the first and last transaction in dataset order,
//! not the chronological minimum and maximum.

use crate::types::{GeneratorError, PaymentMethod, Transaction};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counter that remembers first-seen order
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` occurrences of `key`
    pub fn add(&mut self, key: K, amount: u64) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    /// Counts in first-seen order
    pub fn entries(&self) -> &[(K, u64)] {
        &self.entries
    }

    pub fn get(&self, key: &K) -> u64 {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    /// The highest count, scanning in first-seen order
    ///
    /// A later entry replaces the current leader unless the leader's count
    /// is strictly greater, so among equal counts the last seen wins.
    pub fn most_frequent(&self) -> Option<(&K, u64)> {
        self.entries
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(key, count)| (key, *count))
    }
}

/// Summary statistics of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub transaction_count: usize,

    /// Date of the first transaction in dataset order
    pub first_date: NaiveDate,

    /// Date of the last transaction in dataset order
    pub last_date: NaiveDate,

    /// Sum of all order totals
    pub total_revenue: Decimal,

    /// `total_revenue / transaction_count`, rounded to two decimals
    pub average_transaction_value: Decimal,

    /// Item appearing in the most orders, with its order count
    ///
    /// `None` only when no transaction lists any item.
    pub most_popular_item: Option<(String, u64)>,

    /// Most used payment method with its transaction count
    pub most_used_payment_method: (PaymentMethod, u64),
}

/// Compute summary statistics
///
/// # Errors
///
/// Returns `GeneratorError::EmptyDataset` for an empty slice.
pub fn compute_stats(transactions: &[Transaction]) -> Result<DatasetStats, GeneratorError> {
    let (first, last) = match (transactions.first(), transactions.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(GeneratorError::EmptyDataset),
    };

    let total_revenue: Decimal = transactions.iter().map(|tx| tx.total_price).sum();
    let average_transaction_value = (total_revenue / Decimal::from(transactions.len()))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    // Menu names never contain the list separator, so each entry of
    // `tx.items` is one token of the joined `Items Purchased` field
    let mut items = Tally::new();
    let mut payments = Tally::new();
    for tx in transactions {
        for item in &tx.items {
            items.add(item.as_str(), 1);
        }
        payments.add(tx.payment_method, 1);
    }

    let most_popular_item = items
        .most_frequent()
        .map(|(name, count)| (name.to_string(), count));
    let most_used_payment_method = payments
        .most_frequent()
        .map(|(method, count)| (*method, count))
        .ok_or(GeneratorError::EmptyDataset)?;

    Ok(DatasetStats {
        transaction_count: transactions.len(),
        first_date: first.date,
        last_date: last.date,
        total_revenue,
        average_transaction_value,
        most_popular_item,
        most_used_payment_method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rstest::rstest;

    fn tx(id: u32, day: u32, items: &[&str], total_cents: i64, method: PaymentMethod) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2023, 5, day).unwrap(),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            items: items.iter().map(|s| s.to_string()).collect(),
            quantities: vec![1; items.len()],
            total_price: Decimal::new(total_cents, 2),
            payment_method: method,
        }
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        assert_eq!(compute_stats(&[]), Err(GeneratorError::EmptyDataset));
    }

    #[test]
    fn test_basic_statistics() {
        let transactions = vec![
            tx(1, 20, &["Espresso", "Croissant"], 18000, PaymentMethod::Card),
            tx(2, 3, &["Latte"], 15000, PaymentMethod::Upi),
            tx(3, 11, &["Espresso"], 10001, PaymentMethod::Card),
        ];

        let stats = compute_stats(&transactions).unwrap();

        assert_eq!(stats.transaction_count, 3);
        // Dataset order, not chronological
        assert_eq!(stats.first_date, NaiveDate::from_ymd_opt(2023, 5, 20).unwrap());
        assert_eq!(stats.last_date, NaiveDate::from_ymd_opt(2023, 5, 11).unwrap());
        assert_eq!(stats.total_revenue, Decimal::new(43001, 2));
        assert_eq!(stats.average_transaction_value, Decimal::new(14334, 2));
        assert_eq!(stats.most_popular_item, Some(("Espresso".to_string(), 2)));
        assert_eq!(stats.most_used_payment_method, (PaymentMethod::Card, 2));
    }

    #[test]
    fn test_single_transaction_average_equals_total() {
        let stats = compute_stats(&[tx(1, 1, &["Espresso"], 10000, PaymentMethod::Cash)]).unwrap();
        assert_eq!(stats.total_revenue, stats.average_transaction_value);
        assert_eq!(stats.first_date, stats.last_date);
    }

    #[rstest]
    #[case::tie_goes_to_last_seen(&["Espresso", "Latte", "Mocha"], "Mocha")]
    #[case::strict_leader_kept(&["Espresso", "Latte", "Espresso", "Mocha"], "Espresso")]
    #[case::later_leader_wins(&["Espresso", "Latte", "Latte"], "Latte")]
    fn test_most_frequent_tie_break(#[case] keys: &[&str], #[case] expected: &str) {
        let mut tally = Tally::new();
        for key in keys {
            tally.add(*key, 1);
        }
        assert_eq!(tally.most_frequent().map(|(k, _)| *k), Some(expected));
    }

    #[test]
    fn test_payment_tie_break_uses_first_seen_order() {
        // Cash seen first, Card second; both used twice
        let transactions = vec![
            tx(1, 1, &["Espresso"], 100, PaymentMethod::Cash),
            tx(2, 1, &["Espresso"], 100, PaymentMethod::Card),
            tx(3, 1, &["Espresso"], 100, PaymentMethod::Card),
            tx(4, 1, &["Espresso"], 100, PaymentMethod::Cash),
        ];
        let stats = compute_stats(&transactions).unwrap();
        assert_eq!(stats.most_used_payment_method, (PaymentMethod::Card, 2));
    }

    #[test]
    fn test_tally_counts_and_order() {
        let mut tally = Tally::new();
        tally.add("b", 2);
        tally.add("a", 1);
        tally.add("b", 3);

        assert_eq!(tally.entries(), &[("b", 5), ("a", 1)]);
        assert_eq!(tally.get(&"b"), 5);
        assert_eq!(tally.get(&"z"), 0);
        assert!(Tally::<&str>::new().most_frequent().is_none());
    }
}
