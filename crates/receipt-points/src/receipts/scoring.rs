use serde::Serialize;

use super::domain::{ValidatedItem, ValidatedReceipt};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_DOLLAR_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

/// Open interval (14:00, 16:00) expressed in minutes past midnight.
const AFTERNOON_OPENS: u32 = 14 * 60;
const AFTERNOON_CLOSES: u32 = 16 * 60;

/// Point rules applied to every validated receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    RetailerAlphanumerics,
    RoundDollarTotal,
    QuarterDollarTotal,
    ItemPairs,
    TrimmedDescription,
    OddPurchaseDay,
    AfternoonWindow,
}

impl ScoreRule {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreRule::RetailerAlphanumerics => "retailer alphanumerics",
            ScoreRule::RoundDollarTotal => "round dollar total",
            ScoreRule::QuarterDollarTotal => "quarter dollar total",
            ScoreRule::ItemPairs => "item pairs",
            ScoreRule::TrimmedDescription => "trimmed description",
            ScoreRule::OddPurchaseDay => "odd purchase day",
            ScoreRule::AfternoonWindow => "afternoon window",
        }
    }
}

/// Discrete contribution to a receipt score, kept for audit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub rule: ScoreRule,
    pub points: u64,
    pub notes: String,
}

/// Total points plus the rules that contributed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub total_points: u64,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    fn push(&mut self, rule: ScoreRule, points: u64, notes: String) {
        if points == 0 {
            return;
        }
        self.total_points = self.total_points.saturating_add(points);
        self.components.push(ScoreComponent {
            rule,
            points,
            notes,
        });
    }

    pub fn points_for(&self, rule: ScoreRule) -> u64 {
        self.components
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.points)
            .sum()
    }
}

/// Stateless scorer; every call on the same receipt yields the same breakdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, receipt: &ValidatedReceipt) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown {
            total_points: 0,
            components: Vec::new(),
        };

        let alphanumerics = receipt
            .retailer()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .count() as u64;
        breakdown.push(
            ScoreRule::RetailerAlphanumerics,
            alphanumerics,
            format!("{alphanumerics} alphanumeric characters in '{}'", receipt.retailer()),
        );

        let total = receipt.total();
        let cents = total.cents_part();
        if cents == 0 {
            breakdown.push(
                ScoreRule::RoundDollarTotal,
                ROUND_DOLLAR_POINTS,
                format!("total {total} is a round dollar amount"),
            );
        }
        if cents % 25 == 0 {
            breakdown.push(
                ScoreRule::QuarterDollarTotal,
                QUARTER_DOLLAR_POINTS,
                format!("total {total} is a multiple of 0.25"),
            );
        }

        let item_count = receipt.items().len() as u64;
        let pairs = item_count / 2;
        breakdown.push(
            ScoreRule::ItemPairs,
            pairs.saturating_mul(ITEM_PAIR_POINTS),
            format!("{pairs} complete pairs across {item_count} items"),
        );

        for (index, item) in receipt.items().iter().enumerate() {
            if let Some(points) = trimmed_description_points(item) {
                breakdown.push(
                    ScoreRule::TrimmedDescription,
                    points,
                    format!(
                        "items[{index}] '{}' trims to a multiple of 3; price {}",
                        item.short_description().trim(),
                        item.price()
                    ),
                );
            }
        }

        let day = receipt.purchase_day();
        if day % 2 == 1 {
            breakdown.push(
                ScoreRule::OddPurchaseDay,
                ODD_DAY_POINTS,
                format!("purchased on odd day {day}"),
            );
        }

        let minute = receipt.purchase_minute_of_day();
        if minute > AFTERNOON_OPENS && minute < AFTERNOON_CLOSES {
            breakdown.push(
                ScoreRule::AfternoonWindow,
                AFTERNOON_POINTS,
                format!(
                    "purchased at {} between 14:00 and 16:00",
                    receipt.purchase_time().format("%H:%M")
                ),
            );
        }

        breakdown
    }
}

/// `ceil(price * 0.2)` in exact integer cents when the trimmed description
/// length is a positive multiple of three.
fn trimmed_description_points(item: &ValidatedItem) -> Option<u64> {
    let trimmed = item.short_description().trim().chars().count();
    if trimmed == 0 || trimmed % 3 != 0 {
        return None;
    }
    let cents = item.price().total_cents();
    Some(cents / 500 + u64::from(cents % 500 != 0))
}
