//! Sales breakdowns
//!
//! Views printed after the summary statistics: payment method shares,
//! best-selling items by quantity, revenue per week and per calendar month,
//! and market basket analysis over item pairs.
//!
//! Basket analysis treats each transaction as a set of item names, so an
//! item counts once per order however often it is listed.

use crate::core::stats::Tally;
use crate::types::{PaymentMethod, Transaction};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Default minimum share of transactions for a frequent item pair
pub const DEFAULT_MIN_SUPPORT: f64 = 0.01;

/// Default minimum confidence of an association rule
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.1;

/// Usage of one payment method
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentShare {
    pub method: PaymentMethod,
    pub count: u64,
    /// Percentage of all transactions, 0.0 for an empty dataset
    pub percent: f64,
}

/// Units sold of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSales {
    pub name: String,
    pub quantity: u64,
    /// Number of orders containing the item
    pub orders: u64,
}

/// Revenue of one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub revenue: Decimal,
    pub transactions: u64,
}

impl MonthlyRevenue {
    /// Month as `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Revenue of one week, Monday through Sunday
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyRevenue {
    /// Sunday closing the week
    pub week_ending: NaiveDate,
    pub revenue: Decimal,
    pub transactions: u64,
}

/// Two items bought together
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPair {
    /// Item names in lexicographic order
    pub items: (String, String),
    /// Transactions containing both items
    pub count: u64,
    /// `count` as a fraction of all transactions
    pub support: f64,
}

/// "Orders with `antecedent` also contain `consequent`"
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: String,
    pub consequent: String,
    /// Fraction of all transactions containing both items
    pub support: f64,
    /// Fraction of transactions with `antecedent` that also hold `consequent`
    pub confidence: f64,
    /// `confidence` over the support of `consequent`; above 1.0 means the
    /// items sell together more often than chance
    pub lift: f64,
}

/// Count and share of every payment method, in `PaymentMethod::ALL` order
pub fn payment_distribution(transactions: &[Transaction]) -> Vec<PaymentShare> {
    let mut tally = Tally::new();
    for tx in transactions {
        tally.add(tx.payment_method, 1);
    }

    let total = transactions.len() as f64;
    PaymentMethod::ALL
        .into_iter()
        .map(|method| {
            let count = tally.get(&method);
            let percent = if total > 0.0 {
                count as f64 * 100.0 / total
            } else {
                0.0
            };
            PaymentShare {
                method,
                count,
                percent,
            }
        })
        .collect()
}

/// The `limit` best-selling items by total quantity
///
/// Items with equal quantity keep first-seen order.
pub fn top_items_by_quantity(transactions: &[Transaction], limit: usize) -> Vec<ItemSales> {
    let mut quantities = Tally::new();
    let mut orders = Tally::new();
    for tx in transactions {
        for (name, quantity) in tx.items.iter().zip(&tx.quantities) {
            quantities.add(name.as_str(), u64::from(*quantity));
            orders.add(name.as_str(), 1);
        }
    }

    let mut sales: Vec<ItemSales> = quantities
        .entries()
        .iter()
        .map(|(name, quantity)| ItemSales {
            name: name.to_string(),
            quantity: *quantity,
            orders: orders.get(name),
        })
        .collect();

    // Stable sort keeps first-seen order among ties
    sales.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    sales.truncate(limit);
    sales
}

/// Revenue per calendar month, in chronological order
pub fn monthly_revenue(transactions: &[Transaction]) -> Vec<MonthlyRevenue> {
    let mut months: BTreeMap<(i32, u32), (Decimal, u64)> = BTreeMap::new();
    for tx in transactions {
        let entry = months
            .entry((tx.date.year(), tx.date.month()))
            .or_insert((Decimal::ZERO, 0));
        entry.0 += tx.total_price;
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (revenue, transactions))| MonthlyRevenue {
            year,
            month,
            revenue,
            transactions,
        })
        .collect()
}

/// Sunday closing the week that contains `date`
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    date + Duration::days(6 - i64::from(date.weekday().num_days_from_monday()))
}

/// Revenue per week, in chronological order
///
/// Weeks without transactions between the first and last week are listed
/// with zero revenue.
pub fn weekly_revenue(transactions: &[Transaction]) -> Vec<WeeklyRevenue> {
    let mut weeks: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();
    for tx in transactions {
        let entry = weeks
            .entry(week_ending(tx.date))
            .or_insert((Decimal::ZERO, 0));
        entry.0 += tx.total_price;
        entry.1 += 1;
    }

    let (first, last) = match (weeks.keys().next(), weeks.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut result = Vec::new();
    let mut week = first;
    while week <= last {
        let (revenue, transactions) = weeks.get(&week).copied().unwrap_or((Decimal::ZERO, 0));
        result.push(WeeklyRevenue {
            week_ending: week,
            revenue,
            transactions,
        });
        week = week + Duration::days(7);
    }
    result
}

/// Per-item and per-pair transaction counts over deduplicated baskets
struct BasketCounts<'a> {
    transactions: u64,
    items: BTreeMap<&'a str, u64>,
    pairs: BTreeMap<(&'a str, &'a str), u64>,
}

impl<'a> BasketCounts<'a> {
    fn from_transactions(transactions: &'a [Transaction]) -> Self {
        let mut counts = BasketCounts {
            transactions: transactions.len() as u64,
            items: BTreeMap::new(),
            pairs: BTreeMap::new(),
        };

        for tx in transactions {
            let mut basket: Vec<&str> = tx.items.iter().map(String::as_str).collect();
            basket.sort_unstable();
            basket.dedup();

            for (i, &first) in basket.iter().enumerate() {
                *counts.items.entry(first).or_insert(0) += 1;
                for &second in &basket[i + 1..] {
                    *counts.pairs.entry((first, second)).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    fn support(&self, count: u64) -> f64 {
        if self.transactions == 0 {
            0.0
        } else {
            count as f64 / self.transactions as f64
        }
    }

    /// Pairs reaching `min_support`, most frequent first
    fn frequent_pairs(&self, min_support: f64) -> Vec<((&'a str, &'a str), u64)> {
        let mut pairs: Vec<_> = self
            .pairs
            .iter()
            .filter(|(_, &count)| self.support(count) >= min_support)
            .map(|(&pair, &count)| (pair, count))
            .collect();
        // Stable sort keeps lexicographic order among ties
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

/// Item pairs bought together in at least `min_support` of all transactions
///
/// Sorted by descending support; ties are in lexicographic order.
pub fn frequent_item_pairs(transactions: &[Transaction], min_support: f64) -> Vec<ItemPair> {
    let counts = BasketCounts::from_transactions(transactions);
    counts
        .frequent_pairs(min_support)
        .into_iter()
        .map(|((first, second), count)| ItemPair {
            items: (first.to_string(), second.to_string()),
            count,
            support: counts.support(count),
        })
        .collect()
}

/// One-to-one association rules derived from the frequent item pairs
///
/// Every frequent pair yields a rule in each direction; rules below
/// `min_confidence` are dropped. Sorted by descending lift, then confidence.
pub fn association_rules(
    transactions: &[Transaction],
    min_support: f64,
    min_confidence: f64,
) -> Vec<AssociationRule> {
    let counts = BasketCounts::from_transactions(transactions);
    let item_count = |name: &str| counts.items.get(name).copied().unwrap_or(0);

    let mut rules = Vec::new();
    for ((first, second), count) in counts.frequent_pairs(min_support) {
        for (antecedent, consequent) in [(first, second), (second, first)] {
            let antecedent_count = item_count(antecedent);
            let consequent_support = counts.support(item_count(consequent));
            if antecedent_count == 0 || consequent_support == 0.0 {
                continue;
            }

            let confidence = count as f64 / antecedent_count as f64;
            if confidence < min_confidence {
                continue;
            }
            rules.push(AssociationRule {
                antecedent: antecedent.to_string(),
                consequent: consequent.to_string(),
                support: counts.support(count),
                confidence,
                lift: confidence / consequent_support,
            });
        }
    }

    rules.sort_by(|a, b| {
        b.lift
            .total_cmp(&a.lift)
            .then(b.confidence.total_cmp(&a.confidence))
    });
    rules
}
