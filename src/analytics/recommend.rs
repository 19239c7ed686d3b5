//! Heuristic recommendations derived from the detailed breakdown
//!
//! This stage only consumes what `segments::analyze` already computed; it
//! never iterates the trades again.

use crate::analytics::segments::TradeBreakdown;
use serde::Serialize;
use std::cmp::Ordering;

/// A coin together with its pooled success rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinRating {
    pub coin: String,
    pub success_rate: f64,
    pub trades: usize,
}

/// Verdict of the long-vs-short comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionAdvice {
    FavorLong,
    FavorShort,
    /// Rates are exactly equal (including the no-data 0-vs-0 case).
    Inconclusive,
}

/// Verdict of the low-vs-high leverage comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeverageAdvice {
    FavorLow,
    FavorHigh,
    Inconclusive,
}

/// Ranked coin lists and the two binary preference verdicts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    /// Up to five coins with the highest success rate, best first.
    pub focus_coins: Vec<CoinRating>,
    /// Up to five coins with the lowest success rate, still ordered best
    /// first; overlaps `focus_coins` when ten or fewer coins were traded.
    pub avoid_coins: Vec<CoinRating>,
    pub long_success_rate: f64,
    pub short_success_rate: f64,
    pub position_advice: PositionAdvice,
    pub low_leverage_success_rate: f64,
    pub high_leverage_success_rate: f64,
    pub leverage_advice: LeverageAdvice,
}

/// Ranks coins by success rate and compares the directional and leverage
/// buckets.
///
/// Both verdicts use strictly-greater comparison: exact equality is reported
/// as inconclusive rather than silently favoring a side.
pub fn recommend(breakdown: &TradeBreakdown) -> Recommendations {
    let mut rated: Vec<CoinRating> = breakdown
        .coin_success
        .iter()
        .filter(|c| c.total > 0)
        .map(|c| CoinRating {
            coin: c.coin.clone(),
            success_rate: c.wins as f64 / c.total as f64,
            trades: c.total,
        })
        .collect();
    // Stable: coins with equal rates keep their first-seen order.
    rated.sort_by(|a, b| {
        b.success_rate
            .partial_cmp(&a.success_rate)
            .unwrap_or(Ordering::Equal)
    });

    let focus_coins: Vec<CoinRating> = rated.iter().take(5).cloned().collect();
    let avoid_coins: Vec<CoinRating> = rated[rated.len().saturating_sub(5)..].to_vec();

    let long_success_rate = breakdown.long.success_ratio();
    let short_success_rate = breakdown.short.success_ratio();
    let position_advice = if long_success_rate > short_success_rate {
        PositionAdvice::FavorLong
    } else if short_success_rate > long_success_rate {
        PositionAdvice::FavorShort
    } else {
        PositionAdvice::Inconclusive
    };

    let low_leverage_success_rate = breakdown.low_leverage.success_ratio();
    let high_leverage_success_rate = breakdown.high_leverage.success_ratio();
    let leverage_advice = if low_leverage_success_rate > high_leverage_success_rate {
        LeverageAdvice::FavorLow
    } else if high_leverage_success_rate > low_leverage_success_rate {
        LeverageAdvice::FavorHigh
    } else {
        LeverageAdvice::Inconclusive
    };

    Recommendations {
        focus_coins,
        avoid_coins,
        long_success_rate,
        short_success_rate,
        position_advice,
        low_leverage_success_rate,
        high_leverage_success_rate,
        leverage_advice,
    }
}
