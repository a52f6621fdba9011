use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Signed percentage change against a comparison period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub change_pct: Decimal,
    /// "yesterday", "past week", ...
    pub period: String,
}

impl Trend {
    pub fn direction(&self) -> TrendDirection {
        if self.change_pct > Decimal::ZERO {
            TrendDirection::Up
        } else if self.change_pct < Decimal::ZERO {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }

    /// "8.5% Up from yesterday"
    pub fn describe(&self) -> String {
        let word = match self.direction() {
            TrendDirection::Up => "Up",
            TrendDirection::Down => "Down",
            TrendDirection::Flat => "Unchanged",
        };
        format!("{}% {} from {}", self.change_pct.abs().normalize(), word, self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: u64,
    pub trend: Trend,
}

impl StatCard {
    pub fn new(label: impl Into<String>, value: u64, change_pct: Decimal, period: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            trend: Trend {
                change_pct,
                period: period.into(),
            },
        }
    }
}
