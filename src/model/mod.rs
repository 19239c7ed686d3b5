//! Trade records and input validation
//!
//! A `TradeRecord` is a single manually entered trade. Records are immutable
//! once stored; all derived numbers (percentage returns, win/loss outcomes)
//! are recomputed from them on every report run.


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Long,
    Short,
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "long" => Ok(Position::Long),
            "short" => Ok(Position::Short),
            other => Err(Error::InvalidInput(format!(
                "position must be 'long' or 'short', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Long => write!(f, "long"),
            Position::Short => write!(f, "short"),
        }
    }
}

/// Whether a trade was taken with real funds or on a demo account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeMode {
    Real,
    Demo,
}

impl FromStr for TradeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "real" => Ok(TradeMode::Real),
            "demo" => Ok(TradeMode::Demo),
            other => Err(Error::InvalidInput(format!(
                "mode must be 'real' or 'demo', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TradeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeMode::Real => write!(f, "real"),
            TradeMode::Demo => write!(f, "demo"),
        }
    }
}

/// A single recorded trade.
///
/// `coin` is lowercased at the input boundary so grouping by coin is
/// case-insensitive. `date` is zero-padded `YYYY-MM-DD` text and is compared
/// as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub coin: String,
    pub position: Position,
    pub leverage: f64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub mode: TradeMode,
    pub date: String,
}

impl TradeRecord {
    /// Validates and normalizes raw field values into a record.
    ///
    /// A zero entry price is accepted: such a trade still counts toward
    /// totals, its percentage return is simply undefined.
    pub fn new(
        coin: &str,
        position: Position,
        leverage: f64,
        entry_price: f64,
        exit_price: f64,
        mode: TradeMode,
        date: &str,
    ) -> Result<Self> {
        let coin = coin.trim().to_lowercase();
        if coin.is_empty() {
            return Err(Error::InvalidInput("coin name must not be empty".into()));
        }
        // negated comparisons so NaN fails the numeric checks too
        if !(leverage > 0.0) {
            return Err(Error::InvalidInput(format!(
                "leverage must be a positive number, got {leverage}"
            )));
        }
        if !(entry_price >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "entry price must not be negative, got {entry_price}"
            )));
        }
        if !(exit_price >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "exit price must not be negative, got {exit_price}"
            )));
        }
        let date = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| Error::InvalidInput(format!("date must be YYYY-MM-DD, got '{date}'")))?
            .format("%Y-%m-%d")
            .to_string();

        Ok(Self {
            coin,
            position,
            leverage,
            entry_price,
            exit_price,
            mode,
            date,
        })
    }

    /// Leverage-scaled percentage return.
    ///
    /// `None` when the entry price is zero: the return is undefined and the
    /// trade is excluded from every PnL-based aggregate.
    pub fn leveraged_pnl(&self) -> Option<f64> {
        self.pnl_at(self.leverage)
    }

    /// Percentage return as if the trade had been taken at 1x, isolating
    /// price direction from leverage amplification.
    pub fn spot_pnl(&self) -> Option<f64> {
        self.pnl_at(1.0)
    }

    fn pnl_at(&self, leverage: f64) -> Option<f64> {
        if self.entry_price == 0.0 {
            return None;
        }
        let moved = match self.position {
            Position::Long => self.exit_price - self.entry_price,
            Position::Short => self.entry_price - self.exit_price,
        };
        Some(moved / self.entry_price * 100.0 * leverage)
    }

    /// Leverage tier split used by the detailed analysis. The boundary is
    /// inclusive on the low side: 5x is still low leverage.
    pub fn is_low_leverage(&self) -> bool {
        self.leverage <= 5.0
    }
}
