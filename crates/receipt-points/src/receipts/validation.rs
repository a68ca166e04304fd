use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use super::domain::{Amount, ItemSubmission, ReceiptSubmission, ValidatedItem, ValidatedReceipt};

const RETAILER_PATTERN: &str = r"^[A-Za-z0-9_ \-&]+$";
const SHORT_DESCRIPTION_PATTERN: &str = r"^[A-Za-z0-9_ \-]+$";
const AMOUNT_PATTERN: &str = r"^[0-9]+\.[0-9]{2}$";
const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
const TIME_PATTERN: &str = r"^[0-9]{2}:[0-9]{2}$";

/// Field-level rejection reasons. The rendered message names the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing {0}")]
    MissingField(&'static str),
    #[error("Invalid retailer name")]
    InvalidRetailer,
    #[error("Invalid total format")]
    InvalidTotal,
    #[error("Receipt must list at least one item")]
    NoItems,
    #[error("Missing {field} on items[{index}]")]
    MissingItemField { index: usize, field: &'static str },
    #[error("Invalid short description format on items[{index}]")]
    InvalidShortDescription { index: usize },
    #[error("Item price invalid format on items[{index}]")]
    InvalidItemPrice { index: usize },
    #[error("Invalid purchase date")]
    InvalidPurchaseDate,
    #[error("Invalid purchase time")]
    InvalidPurchaseTime,
}

impl ValidationError {
    /// Client-facing description carried in the 400 response body.
    pub fn description(&self) -> String {
        format!("The receipt is invalid. {self}")
    }
}

/// Holds the compiled field patterns; build once and share.
#[derive(Debug, Clone)]
pub struct ReceiptValidator {
    retailer: Regex,
    short_description: Regex,
    amount: Regex,
    date: Regex,
    time: Regex,
}

impl Default for ReceiptValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptValidator {
    pub fn new() -> Self {
        Self {
            retailer: Regex::new(RETAILER_PATTERN).expect("Invalid retailer regex"),
            short_description: Regex::new(SHORT_DESCRIPTION_PATTERN)
                .expect("Invalid short description regex"),
            amount: Regex::new(AMOUNT_PATTERN).expect("Invalid amount regex"),
            date: Regex::new(DATE_PATTERN).expect("Invalid date regex"),
            time: Regex::new(TIME_PATTERN).expect("Invalid time regex"),
        }
    }

    /// Check presence first, then each field's format; the first failure wins.
    pub fn validate(
        &self,
        submission: &ReceiptSubmission,
    ) -> Result<ValidatedReceipt, ValidationError> {
        let retailer = required(&submission.retailer, "retailer")?;
        let purchase_date = required(&submission.purchase_date, "purchaseDate")?;
        let purchase_time = required(&submission.purchase_time, "purchaseTime")?;
        let items = submission
            .items
            .as_ref()
            .ok_or(ValidationError::MissingField("items"))?;
        let total = required(&submission.total, "total")?;

        if !self.is_text_match(&self.retailer, retailer) {
            return Err(ValidationError::InvalidRetailer);
        }

        let total = self.parse_amount(total).ok_or(ValidationError::InvalidTotal)?;

        if items.is_empty() {
            return Err(ValidationError::NoItems);
        }

        let items = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.validate_item(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        let purchased_at = self.parse_purchase_instant(purchase_date, purchase_time)?;

        Ok(ValidatedReceipt {
            retailer: retailer.to_string(),
            purchased_at,
            items,
            total,
        })
    }

    fn validate_item(
        &self,
        index: usize,
        item: &ItemSubmission,
    ) -> Result<ValidatedItem, ValidationError> {
        let short_description = item.short_description.as_deref().ok_or(
            ValidationError::MissingItemField {
                index,
                field: "shortDescription",
            },
        )?;
        if !self.is_text_match(&self.short_description, short_description) {
            return Err(ValidationError::InvalidShortDescription { index });
        }

        let price = item
            .price
            .as_deref()
            .ok_or(ValidationError::MissingItemField {
                index,
                field: "price",
            })?;
        let price = self
            .parse_amount(price)
            .ok_or(ValidationError::InvalidItemPrice { index })?;

        Ok(ValidatedItem {
            short_description: short_description.to_string(),
            price,
        })
    }

    /// Charset match plus at least one non-whitespace character.
    fn is_text_match(&self, pattern: &Regex, value: &str) -> bool {
        pattern.is_match(value) && !value.trim().is_empty()
    }

    fn parse_amount(&self, raw: &str) -> Option<Amount> {
        if !self.amount.is_match(raw) {
            return None;
        }
        Amount::from_text(raw)
    }

    fn parse_purchase_instant(
        &self,
        date: &str,
        time: &str,
    ) -> Result<NaiveDateTime, ValidationError> {
        if !self.date.is_match(date) {
            return Err(ValidationError::InvalidPurchaseDate);
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidPurchaseDate)?;

        if !self.time.is_match(time) {
            return Err(ValidationError::InvalidPurchaseTime);
        }
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| ValidationError::InvalidPurchaseTime)?;

        Ok(NaiveDateTime::new(date, time))
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    value.as_deref().ok_or(ValidationError::MissingField(field))
}
