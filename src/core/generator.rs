//! Transaction generation
//!
//! Builds synthetic orders by random selection over an in-memory menu.
//! The random source is always passed in, so a seeded `StdRng` makes runs
//! reproducible.
//!
//! For each transaction the generator draws, in order:
//! 1. a date, uniform over the millisecond window between the start and end
//!    dates, truncated to the calendar day
//! 2. an hour in `opening_hour..=last_order_hour` and a minute in `0..=59`
//! 3. a main item count in `1..=max_items_per_order`
//! 4. per main item: a category (add-ons excluded), an item, a quantity
//! 5. with `add_on_probability`, one add-on at quantity 1
//! 6. a payment method

use crate::types::{
    GeneratorError, MenuByCategory, MenuItem, PaymentMethod, Transaction, TransactionId,
    ADD_ON_CATEGORY,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Parameters of the order model
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// First possible transaction date
    pub start_date: NaiveDate,
    /// Last possible transaction date
    pub end_date: NaiveDate,
    /// Earliest hour of a transaction
    pub opening_hour: u32,
    /// Latest hour of a transaction (minutes still range over 0..=59)
    pub last_order_hour: u32,
    /// Upper bound of main items per order (at least 1)
    pub max_items_per_order: u32,
    /// Upper bound of the quantity per main item (at least 1)
    pub max_quantity: u32,
    /// Chance of appending one add-on to an order
    pub add_on_probability: f64,
    /// Category excluded from main selection and used for add-ons
    pub add_on_category: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        // Calendar year 2023
        let start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
        let end_date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or(start_date);

        Self {
            start_date,
            end_date,
            opening_hour: 8,
            last_order_hour: 20,
            max_items_per_order: 3,
            max_quantity: 2,
            add_on_probability: 0.5,
            add_on_category: ADD_ON_CATEGORY.to_string(),
        }
    }
}

impl GenerationConfig {
    // Keeps every range non-empty and the probability inside [0, 1]
    fn normalized(mut self) -> Self {
        if self.end_date < self.start_date {
            self.end_date = self.start_date;
        }
        self.last_order_hour = self.last_order_hour.min(23);
        self.opening_hour = self.opening_hour.min(self.last_order_hour);
        self.max_items_per_order = self.max_items_per_order.max(1);
        self.max_quantity = self.max_quantity.max(1);
        self.add_on_probability = if self.add_on_probability.is_nan() {
            0.0
        } else {
            self.add_on_probability.clamp(0.0, 1.0)
        };
        self
    }
}

/// Random transaction generator over a fixed menu
#[derive(Debug, Clone)]
pub struct TransactionGenerator<'a> {
    menu: &'a MenuByCategory,
    config: GenerationConfig,
    main_categories: Vec<&'a str>,
    add_ons: &'a [MenuItem],
}

impl<'a> TransactionGenerator<'a> {
    /// Create a generator for `menu`
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::EmptyMenu` if no category other than the
    /// add-on category holds an item.
    pub fn new(menu: &'a MenuByCategory, config: GenerationConfig) -> Result<Self, GeneratorError> {
        let config = config.normalized();
        let main_categories = menu.main_categories(&config.add_on_category);

        if main_categories
            .iter()
            .all(|category| menu.items(category).is_empty())
        {
            return Err(GeneratorError::EmptyMenu {
                add_on_category: config.add_on_category,
            });
        }

        let add_ons = menu.add_ons(&config.add_on_category);

        Ok(Self {
            menu,
            config,
            main_categories,
            add_ons,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate `count` transactions with ids `1..=count`
    pub fn generate<R: Rng + ?Sized>(&self, count: u32, rng: &mut R) -> Vec<Transaction> {
        (1..=count).map(|id| self.generate_one(id, rng)).collect()
    }

    /// Generate a single transaction with the given id
    pub fn generate_one<R: Rng + ?Sized>(&self, id: TransactionId, rng: &mut R) -> Transaction {
        let date = self.random_date(rng);
        let time = self.random_time(rng);

        let item_count = rng.gen_range(1..=self.config.max_items_per_order);
        let mut items = Vec::with_capacity(item_count as usize + 1);
        let mut quantities = Vec::with_capacity(item_count as usize + 1);
        let mut total = Decimal::ZERO;

        for _ in 0..item_count {
            let category = self.main_categories[rng.gen_range(0..self.main_categories.len())];
            let candidates = self.menu.items(category);
            // An empty category contributes nothing to this slot
            if candidates.is_empty() {
                continue;
            }

            let item = &candidates[rng.gen_range(0..candidates.len())];
            let quantity = rng.gen_range(1..=self.config.max_quantity);
            items.push(item.name.clone());
            quantities.push(quantity);
            total += item.price * Decimal::from(quantity);
        }

        if rng.gen_bool(self.config.add_on_probability) && !self.add_ons.is_empty() {
            let add_on = &self.add_ons[rng.gen_range(0..self.add_ons.len())];
            items.push(add_on.name.clone());
            quantities.push(1);
            total += add_on.price;
        }

        let payment_method = PaymentMethod::ALL[rng.gen_range(0..PaymentMethod::ALL.len())];

        Transaction {
            id,
            date,
            time,
            items,
            quantities,
            total_price: total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            payment_method,
        }
    }

    fn random_date<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        let span_ms = (self.config.end_date - self.config.start_date).num_milliseconds();
        let offset_ms = rng.gen_range(0..=span_ms);
        self.config.start_date + Duration::days(offset_ms / MILLIS_PER_DAY)
    }

    fn random_time<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveTime {
        let hour = rng.gen_range(self.config.opening_hour..=self.config.last_order_hour);
        let minute = rng.gen_range(0..60u32);
        NaiveTime::default() + Duration::minutes(i64::from(hour * 60 + minute))
    }
}

/// Generate `count` transactions over `menu` with the default order model
pub fn generate<R: Rng + ?Sized>(
    menu: &MenuByCategory,
    count: u32,
    rng: &mut R,
) -> Result<Vec<Transaction>, GeneratorError> {
    let generator = TransactionGenerator::new(menu, GenerationConfig::default())?;
    Ok(generator.generate(count, rng))
}
