//! CSV format handling for generated transactions
//!
//! Writes the transaction dataset with the columns
//! `Transaction ID,Date,Time,Items Purchased,Quantities,Total Price (INR),Payment Method`
//! and reads the same format back (for `--summarize` and round-trip checks).
//!
//! Multi-valued fields are joined with `", "`, so they are quoted by the
//! CSV writer whenever they hold more than one value.

use crate::types::{GeneratorError, PaymentMethod, Transaction, TransactionId, LIST_SEPARATOR};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Output column names, in order
pub const TRANSACTION_HEADERS: [&str; 7] = [
    "Transaction ID",
    "Date",
    "Time",
    "Items Purchased",
    "Quantities",
    "Total Price (INR)",
    "Payment Method",
];

/// One transaction row with every field already formatted
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TransactionCsvRecord {
    #[serde(rename = "Transaction ID")]
    pub id: TransactionId,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Items Purchased")]
    pub items: String,
    #[serde(rename = "Quantities")]
    pub quantities: String,
    #[serde(rename = "Total Price (INR)")]
    pub total_price: String,
    #[serde(rename = "Payment Method")]
    pub payment_method: String,
}

impl From<&Transaction> for TransactionCsvRecord {
    fn from(tx: &Transaction) -> Self {
        TransactionCsvRecord {
            id: tx.id,
            date: tx.formatted_date(),
            time: tx.formatted_time(),
            items: tx.joined_items(),
            quantities: tx.joined_quantities(),
            total_price: tx.formatted_total(),
            payment_method: tx.payment_method.to_string(),
        }
    }
}

/// Convert a TransactionCsvRecord back into a Transaction
///
/// # Returns
///
/// * `Ok(Transaction)` if every field parses
/// * `Err(String)` describing the first field that does not
pub fn convert_transaction_record(record: TransactionCsvRecord) -> Result<Transaction, String> {
    let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}' for tx {}", record.date, record.id))?;
    let time = NaiveTime::parse_from_str(&record.time, "%H:%M")
        .map_err(|_| format!("Invalid time '{}' for tx {}", record.time, record.id))?;

    let items: Vec<String> = split_list(&record.items).map(str::to_string).collect();
    let quantities = split_list(&record.quantities)
        .map(|q| {
            q.parse::<u32>()
                .map_err(|_| format!("Invalid quantity '{}' for tx {}", q, record.id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if items.len() != quantities.len() {
        return Err(format!(
            "Tx {} lists {} items but {} quantities",
            record.id,
            items.len(),
            quantities.len()
        ));
    }

    let total_price = Decimal::from_str(&record.total_price).map_err(|_| {
        format!(
            "Invalid total price '{}' for tx {}",
            record.total_price, record.id
        )
    })?;
    let payment_method = PaymentMethod::from_str(&record.payment_method)
        .map_err(|e| format!("{} for tx {}", e, record.id))?;

    Ok(Transaction {
        id: record.id,
        date,
        time,
        items,
        quantities,
        total_price,
        payment_method,
    })
}

fn split_list(joined: &str) -> impl Iterator<Item = &str> {
    joined
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// Write transactions as CSV to any writer
///
/// `destination` only labels errors.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
    destination: &str,
) -> Result<(), GeneratorError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    // Written explicitly so an empty dataset still gets a header row
    writer
        .write_record(TRANSACTION_HEADERS)
        .map_err(|e| GeneratorError::write_error(destination, e))?;

    for tx in transactions {
        writer
            .serialize(TransactionCsvRecord::from(tx))
            .map_err(|e| GeneratorError::write_error(destination, e))?;
    }

    writer
        .flush()
        .map_err(|e| GeneratorError::write_error(destination, e))?;

    Ok(())
}

/// Write transactions to a file, replacing any existing file at `path`
pub fn write_transactions_file(
    transactions: &[Transaction],
    path: &Path,
) -> Result<(), GeneratorError> {
    let destination = path.display().to_string();
    let mut file =
        File::create(path).map_err(|e| GeneratorError::write_error(&destination, e))?;
    write_transactions_csv(transactions, &mut file, &destination)
}

/// Read transactions in the output format back from any reader
pub fn read_transactions_csv<R: Read>(input: R) -> Result<Vec<Transaction>, GeneratorError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let headers = reader.headers()?.clone();

    let mut transactions = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line());

        let csv_record: TransactionCsvRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| GeneratorError::parse_error(line, e))?;
        let tx = convert_transaction_record(csv_record)
            .map_err(|e| GeneratorError::parse_error(line, e))?;
        transactions.push(tx);
    }

    Ok(transactions)
}

/// Read a transactions file produced by `write_transactions_file`
pub fn read_transactions_file(path: &Path) -> Result<Vec<Transaction>, GeneratorError> {
    let file = File::open(path).map_err(|e| {
        GeneratorError::source_unavailable(&path.display().to_string(), e)
    })?;
    read_transactions_csv(file)
}
