//! Human-readable dataset report
//!
//! Informational output only; nothing downstream parses it.

use crate::core::analytics::{
    association_rules, frequent_item_pairs, monthly_revenue, payment_distribution,
    top_items_by_quantity, weekly_revenue, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_SUPPORT,
};
use crate::core::stats::DatasetStats;
use crate::types::{GeneratorError, Transaction};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::{self, Write};

/// What the report shows
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// First line of the report
    pub title: String,
    /// Number of leading transactions printed as a sample
    pub sample_size: usize,
    /// Number of rows in the best-sellers, item pair and rule tables
    pub top_items: usize,
    /// Minimum share of transactions for an item pair to be listed
    pub min_support: f64,
    /// Minimum confidence for an association rule to be listed
    pub min_confidence: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Dataset generated successfully.".to_string(),
            sample_size: 5,
            top_items: 10,
            min_support: DEFAULT_MIN_SUPPORT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Format an amount as rupees with thousands separators, e.g. `₹1,234.50`
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}₹{}.{}", sign, grouped, fraction)
}

/// Write the full report
pub fn render_report(
    out: &mut dyn Write,
    transactions: &[Transaction],
    stats: &DatasetStats,
    options: &ReportOptions,
) -> Result<(), GeneratorError> {
    write_report(out, transactions, stats, options)
        .map_err(|e| GeneratorError::write_error("report output", e))
}

fn write_report(
    out: &mut dyn Write,
    transactions: &[Transaction],
    stats: &DatasetStats,
    options: &ReportOptions,
) -> io::Result<()> {
    let sample = &transactions[..options.sample_size.min(transactions.len())];
    if sample.is_empty() {
        writeln!(out, "{}", options.title)?;
    } else {
        writeln!(
            out,
            "{} Sample of first {} transactions:",
            options.title,
            sample.len()
        )?;
        write_sample(out, sample)?;
    }

    writeln!(out)?;
    writeln!(out, "Dataset statistics:")?;
    writeln!(out, "Total transactions: {}", stats.transaction_count)?;
    writeln!(
        out,
        "Date range: {} to {}",
        stats.first_date.format("%Y-%m-%d"),
        stats.last_date.format("%Y-%m-%d")
    )?;
    writeln!(out, "Total revenue: {}", format_inr(stats.total_revenue))?;
    writeln!(
        out,
        "Average transaction value: {}",
        format_inr(stats.average_transaction_value)
    )?;
    match &stats.most_popular_item {
        Some((name, count)) => writeln!(out, "Most popular item: {} ({} times)", name, count)?,
        None => writeln!(out, "Most popular item: none")?,
    }
    let (method, count) = stats.most_used_payment_method;
    writeln!(out, "Most used payment method: {} ({} times)", method, count)?;

    writeln!(out)?;
    writeln!(out, "Payment method distribution:")?;
    for share in payment_distribution(transactions) {
        writeln!(
            out,
            "  {:<14} {:>8}  {:>5.1}%",
            share.method.as_str(),
            share.count,
            share.percent
        )?;
    }

    let top = top_items_by_quantity(transactions, options.top_items);
    if !top.is_empty() {
        writeln!(out)?;
        writeln!(out, "Top {} items by quantity sold:", top.len())?;
        for (rank, item) in top.iter().enumerate() {
            writeln!(
                out,
                "  {:>2}. {:<28} {:>8} units in {} orders",
                rank + 1,
                item.name,
                item.quantity,
                item.orders
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Weekly revenue:")?;
    for week in weekly_revenue(transactions) {
        writeln!(
            out,
            "  week ending {}  {:>16}  ({} transactions)",
            week.week_ending.format("%Y-%m-%d"),
            format_inr(week.revenue),
            week.transactions
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Monthly revenue:")?;
    for month in monthly_revenue(transactions) {
        writeln!(
            out,
            "  {}  {:>16}  ({} transactions)",
            month.label(),
            format_inr(month.revenue),
            month.transactions
        )?;
    }

    write_basket_analysis(out, transactions, options)
}

fn write_basket_analysis(
    out: &mut dyn Write,
    transactions: &[Transaction],
    options: &ReportOptions,
) -> io::Result<()> {
    let pairs = frequent_item_pairs(transactions, options.min_support);
    writeln!(out)?;
    writeln!(
        out,
        "Frequently bought together (support >= {:.2}):",
        options.min_support
    )?;
    if pairs.is_empty() {
        writeln!(out, "  none")?;
    }
    for pair in pairs.iter().take(options.top_items) {
        writeln!(
            out,
            "  {} + {}  support {:.3} ({} orders)",
            pair.items.0, pair.items.1, pair.support, pair.count
        )?;
    }

    let rules = association_rules(transactions, options.min_support, options.min_confidence);
    writeln!(out)?;
    writeln!(
        out,
        "Association rules (confidence >= {:.2}):",
        options.min_confidence
    )?;
    if rules.is_empty() {
        writeln!(out, "  none")?;
    }
    for rule in rules.iter().take(options.top_items) {
        writeln!(
            out,
            "  {} -> {}  support {:.3}  confidence {:.3}  lift {:.2}",
            rule.antecedent, rule.consequent, rule.support, rule.confidence, rule.lift
        )?;
    }

    Ok(())
}

fn write_sample(out: &mut dyn Write, sample: &[Transaction]) -> io::Result<()> {
    writeln!(
        out,
        "  {:>6}  {:<10}  {:<5}  {:>11}  {:<13}  Items",
        "ID", "Date", "Time", "Total (INR)", "Payment"
    )?;
    for tx in sample {
        let items = tx
            .items
            .iter()
            .zip(&tx.quantities)
            .map(|(name, qty)| format!("{} x{}", name, qty))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "  {:>6}  {:<10}  {:<5}  {:>11}  {:<13}  {}",
            tx.id,
            tx.formatted_date(),
            tx.formatted_time(),
            tx.formatted_total(),
            tx.payment_method.as_str(),
            items
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::compute_stats;
    use crate::types::PaymentMethod;
    use chrono::{NaiveDate, NaiveTime};
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::new(0, 0), "₹0.00")]
    #[case(Decimal::new(99999, 2), "₹999.99")]
    #[case(Decimal::new(100000, 2), "₹1,000.00")]
    #[case(Decimal::new(123456789, 2), "₹1,234,567.89")]
    #[case(Decimal::new(1234567895, 3), "₹1,234,567.90")]
    #[case(Decimal::new(-150050, 2), "-₹1,500.50")]
    fn test_format_inr(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_inr(amount), expected);
    }

    fn sample_transactions() -> Vec<Transaction> {
        (1..=7)
            .map(|id| Transaction {
                id,
                date: NaiveDate::from_ymd_opt(2023, id, 1).unwrap(),
                time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                items: vec!["Espresso".to_string(), "Croissant".to_string()],
                quantities: vec![2, 1],
                total_price: Decimal::new(28000, 2),
                payment_method: PaymentMethod::Upi,
            })
            .collect()
    }

    #[test]
    fn test_report_contains_summary_lines() {
        let transactions = sample_transactions();
        let stats = compute_stats(&transactions).unwrap();
        let mut output = Vec::new();

        render_report(&mut output, &transactions, &stats, &ReportOptions::default()).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("Dataset generated successfully. Sample of first 5 transactions:"));
        assert!(text.contains("Total transactions: 7"));
        assert!(text.contains("Date range: 2023-01-01 to 2023-07-01"));
        assert!(text.contains("Total revenue: ₹1,960.00"));
        assert!(text.contains("Average transaction value: ₹280.00"));
        assert!(text.contains("Most popular item: Croissant (7 times)"));
        assert!(text.contains("Most used payment method: UPI (7 times)"));
        assert!(text.contains("Espresso x2, Croissant x1"));
        assert!(text.contains("2023-07"));
        assert!(text.contains("Weekly revenue:"));
        assert!(text.contains("week ending 2023-01-01"));
        assert!(text.contains("Croissant + Espresso  support 1.000 (7 orders)"));
        assert!(text.contains("Espresso -> Croissant  support 1.000  confidence 1.000  lift 1.00"));
    }

    #[test]
    fn test_report_sample_size_is_respected() {
        let transactions = sample_transactions();
        let stats = compute_stats(&transactions).unwrap();
        let options = ReportOptions {
            sample_size: 2,
            ..ReportOptions::default()
        };
        let mut output = Vec::new();

        render_report(&mut output, &transactions, &stats, &options).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("Sample of first 2 transactions:"));
        let sample_rows = text
            .lines()
            .filter(|line| line.contains("Espresso x2"))
            .count();
        assert_eq!(sample_rows, 2);
    }

    #[test]
    fn test_report_without_sample() {
        let transactions = sample_transactions();
        let stats = compute_stats(&transactions).unwrap();
        let options = ReportOptions {
            title: "Summary of cafe_transactions.csv".to_string(),
            sample_size: 0,
            top_items: 1,
            min_support: 0.5,
            min_confidence: 0.5,
        };
        let mut output = Vec::new();

        render_report(&mut output, &transactions, &stats, &options).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("Summary of cafe_transactions.csv\n"));
        assert!(!text.contains("Sample of first"));
        assert!(text.contains("Top 1 items by quantity sold:"));
        let rule_rows = text.lines().filter(|line| line.contains(" -> ")).count();
        assert_eq!(rule_rows, 1);
    }

    #[test]
    fn test_report_without_frequent_pairs() {
        let transactions: Vec<_> = sample_transactions()
            .into_iter()
            .map(|tx| Transaction {
                items: vec!["Espresso".to_string()],
                quantities: vec![1],
                ..tx
            })
            .collect();
        let stats = compute_stats(&transactions).unwrap();
        let mut output = Vec::new();

        render_report(&mut output, &transactions, &stats, &ReportOptions::default()).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("Frequently bought together (support >= 0.01):\n  none"));
        assert!(text.contains("Association rules (confidence >= 0.10):\n  none"));
    }
}
