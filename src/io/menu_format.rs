//! CSV format handling for the cafe menu
//!
//! This module centralizes menu format concerns:
//! - MenuCsvRecord structure for deserialization
//! - Conversion from CSV records to validated MenuItems
//! - Grouping of parsed items into a MenuByCategory
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{GeneratorError, MenuByCategory, MenuItem, LIST_SEPARATOR};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the menu columns: Category, Item, Price (INR).
/// Any extra columns in the source are ignored.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MenuCsvRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Price (INR)")]
    pub price: String,
}

/// Convert a MenuCsvRecord to a MenuItem
///
/// Rejects empty names or categories, names containing the `", "` list
/// separator of the transaction output, and prices that are not a
/// non-negative decimal number.
pub fn convert_menu_record(record: MenuCsvRecord) -> Result<MenuItem, String> {
    let category = record.category.trim();
    let name = record.item.trim();
    let price_str = record.price.trim();

    if category.is_empty() {
        return Err(format!("Item '{}' has an empty category", name));
    }
    if name.is_empty() {
        return Err(format!("Empty item name in category '{}'", category));
    }
    if name.contains(LIST_SEPARATOR) {
        return Err(format!(
            "Item name '{}' contains the list separator '{}'",
            name, LIST_SEPARATOR
        ));
    }

    let price = Decimal::from_str(price_str)
        .map_err(|_| format!("Invalid price '{}' for item '{}'", price_str, name))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(format!("Negative price '{}' for item '{}'", price_str, name));
    }

    Ok(MenuItem::new(name, category, price))
}

/// Parse raw menu CSV text into an ordered list of items
///
/// Blank lines are skipped and fields are trimmed. The first malformed
/// row aborts parsing with a `ParseError` carrying its line number.
pub fn parse_menu_items(data: &str) -> Result<Vec<MenuItem>, GeneratorError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    let mut items = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line());

        let csv_record: MenuCsvRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| GeneratorError::parse_error(line, e))?;

        let item = convert_menu_record(csv_record)
            .map_err(|e| GeneratorError::parse_error(line, e))?;
        items.push(item);
    }

    Ok(items)
}

/// Parse raw menu CSV text and group it by category
pub fn parse_menu(data: &str) -> Result<MenuByCategory, GeneratorError> {
    parse_menu_items(data).map(MenuByCategory::from_items)
}
