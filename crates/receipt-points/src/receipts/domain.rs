use std::borrow::Borrow;
use std::fmt;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Inbound receipt payload exactly as the client sent it.
///
/// Every field is optional at the binding layer so that a missing or `null`
/// field surfaces as a named validation failure instead of a generic decode
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSubmission {
    pub retailer: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_time: Option<String>,
    pub items: Option<Vec<ItemSubmission>>,
    pub total: Option<String>,
}

/// One line of an inbound receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSubmission {
    pub short_description: Option<String>,
    pub price: Option<String>,
}

/// Monetary amount as submitted, with its two cents digits parsed exactly.
///
/// The whole-cents value saturates at `u64::MAX`; the text keeps any size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    text: String,
    cents: u64,
    cents_part: u64,
}

impl Amount {
    /// Parse `digits "." two-digits`. Anything else is `None`; magnitude is
    /// never a reason to reject.
    pub(crate) fn from_text(raw: &str) -> Option<Self> {
        let (dollars, cents) = raw.split_once('.')?;
        if dollars.is_empty()
            || cents.len() != 2
            || !dollars.bytes().all(|b| b.is_ascii_digit())
            || !cents.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let cents_part = cents.parse::<u64>().ok()?;
        let whole = dollars.bytes().fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        });
        Some(Self {
            text: raw.to_string(),
            cents: whole.saturating_mul(100).saturating_add(cents_part),
            cents_part,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whole value in cents, saturating at `u64::MAX`.
    pub fn total_cents(&self) -> u64 {
        self.cents
    }

    /// The two digits after the decimal point.
    pub fn cents_part(&self) -> u64 {
        self.cents_part
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Receipt line that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedItem {
    pub(crate) short_description: String,
    pub(crate) price: Amount,
}

impl ValidatedItem {
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn price(&self) -> &Amount {
        &self.price
    }
}

/// Receipt that passed every field rule; the only input the scorer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReceipt {
    pub(crate) retailer: String,
    pub(crate) purchased_at: NaiveDateTime,
    pub(crate) items: Vec<ValidatedItem>,
    pub(crate) total: Amount,
}

impl ValidatedReceipt {
    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    pub fn purchased_at(&self) -> NaiveDateTime {
        self.purchased_at
    }

    pub fn purchase_day(&self) -> u32 {
        self.purchased_at.date().day()
    }

    pub fn purchase_time(&self) -> NaiveTime {
        self.purchased_at.time()
    }

    pub fn purchase_minute_of_day(&self) -> u32 {
        let time = self.purchase_time();
        time.hour() * 60 + time.minute()
    }

    pub fn items(&self) -> &[ValidatedItem] {
        &self.items
    }

    pub fn total(&self) -> &Amount {
        &self.total
    }
}

/// Server-minted opaque handle for a stored score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// Lowercase hyphenated RFC 4122 v4 identifier.
    pub(crate) fn mint() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ReceiptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored association between a minted identifier and its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    pub id: ReceiptId,
    pub points: u64,
}
