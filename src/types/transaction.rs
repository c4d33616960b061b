//! Transaction-related types for the cafe dataset generator
//!
//! This module defines the synthesized purchase record and the payment
//! methods a purchase can be settled with.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Separator of the multi-valued `Items Purchased` and `Quantities` fields
///
/// Item names must not contain it, or the joined field cannot be split back.
pub const LIST_SEPARATOR: &str = ", ";

/// Transaction identifier
///
/// 1-based and sequential in generation order.
pub type TransactionId = u32;

/// Payment methods accepted at the till
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Card,
    Cash,
    Upi,
    MobileWallet,
}

impl PaymentMethod {
    /// Every payment method, in the order they are drawn from
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Cash,
        PaymentMethod::Upi,
        PaymentMethod::MobileWallet,
    ];

    /// Label used in the CSV output and the report
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::MobileWallet => "Mobile Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s.trim())
            .ok_or_else(|| format!("Invalid payment method: '{}'", s))
    }
}

/// One synthesized purchase
///
/// `items` and `quantities` are parallel: `quantities[i]` units of `items[i]`
/// were bought. `total_price` is the sum of unit price times quantity,
/// rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Sequential identifier starting at 1
    pub id: TransactionId,

    /// Calendar date of the purchase
    pub date: NaiveDate,

    /// Clock time of the purchase, minute resolution
    pub time: NaiveTime,

    /// Item names, in the order they were added to the order
    pub items: Vec<String>,

    /// Quantity of each item, parallel to `items`
    pub quantities: Vec<u32>,

    /// Order total in INR, two fraction digits
    pub total_price: Decimal,

    pub payment_method: PaymentMethod,
}

impl Transaction {
    /// Date as `YYYY-MM-DD`
    pub fn formatted_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Time as zero-padded `HH:MM`
    pub fn formatted_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Item names joined with `", "`
    pub fn joined_items(&self) -> String {
        self.items.join(LIST_SEPARATOR)
    }

    /// Quantities joined with `", "`
    pub fn joined_quantities(&self) -> String {
        self.quantities
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR)
    }

    /// Total formatted with exactly two fraction digits
    pub fn formatted_total(&self) -> String {
        format!("{:.2}", self.total_price)
    }
}
