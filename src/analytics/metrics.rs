//! Headline statistics over a set of trades
//!
//! The same computation serves the all-time section and the daily section of
//! the report; the daily variant is simply fed the subset of trades dated
//! today.

use crate::model::{Position, TradeRecord};
use serde::Serialize;

/// Scalar summary of a set of trades.
///
/// `Default` is the canonical neutral summary: it is what an empty trade set
/// produces, by contract rather than by accident of guarded arithmetic.
/// Winners that do not exist (no trades, or no trade with a defined return)
/// stay `None` and render as "None" downstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TradeSummary {
    pub total_trades: usize,
    /// Most frequently traded coin, earliest-seen coin on a tie.
    pub top_coin: Option<String>,
    pub top_coin_trades: usize,
    pub top_position: Option<Position>,
    pub top_leverage: Option<f64>,
    /// Coin with the highest mean return across its valid-return trades.
    pub best_coin: Option<String>,
    pub best_coin_avg_pnl: f64,
    pub worst_coin: Option<String>,
    pub worst_coin_avg_pnl: f64,
    pub max_pnl: f64,
    pub min_pnl: f64,
    pub net_pnl: f64,
}

/// Derives the headline statistics for an arbitrary set of trades.
///
/// Trades with a zero entry price count toward `total_trades` and the
/// frequency winners but are excluded from every PnL aggregate.
pub fn summarize(trades: &[TradeRecord]) -> TradeSummary {
    if trades.is_empty() {
        return TradeSummary::default();
    }

    let mut summary = TradeSummary {
        total_trades: trades.len(),
        ..TradeSummary::default()
    };

    if let Some((coin, count)) = most_frequent(trades.iter().map(|t| t.coin.as_str())) {
        summary.top_coin = Some(coin.to_string());
        summary.top_coin_trades = count;
    }
    if let Some((position, _)) = most_frequent(trades.iter().map(|t| t.position)) {
        summary.top_position = Some(position);
    }
    if let Some((leverage, _)) = most_frequent(trades.iter().map(|t| t.leverage)) {
        summary.top_leverage = Some(leverage);
    }

    // Per-coin returns, grouped in first-seen coin order.
    let mut coin_pnls: Vec<(&str, Vec<f64>)> = Vec::new();
    let mut defined = 0usize;
    let mut max_pnl = f64::NEG_INFINITY;
    let mut min_pnl = f64::INFINITY;
    let mut net_pnl = 0.0;

    for trade in trades {
        let pnl = match trade.leveraged_pnl() {
            Some(pnl) => pnl,
            None => continue,
        };
        defined += 1;
        net_pnl += pnl;
        if pnl > max_pnl {
            max_pnl = pnl;
        }
        if pnl < min_pnl {
            min_pnl = pnl;
        }
        match coin_pnls.iter_mut().find(|(coin, _)| *coin == trade.coin) {
            Some((_, pnls)) => pnls.push(pnl),
            None => coin_pnls.push((trade.coin.as_str(), vec![pnl])),
        }
    }

    if defined > 0 {
        summary.max_pnl = max_pnl;
        summary.min_pnl = min_pnl;
        summary.net_pnl = net_pnl;
    }

    // Strict comparisons against running extrema: on equal averages the
    // earliest-seen coin keeps the title.
    let mut best_avg = f64::NEG_INFINITY;
    let mut worst_avg = f64::INFINITY;
    for (coin, pnls) in &coin_pnls {
        let avg = pnls.iter().sum::<f64>() / pnls.len() as f64;
        if avg > best_avg {
            best_avg = avg;
            summary.best_coin = Some(coin.to_string());
            summary.best_coin_avg_pnl = avg;
        }
        if avg < worst_avg {
            worst_avg = avg;
            summary.worst_coin = Some(coin.to_string());
            summary.worst_coin_avg_pnl = avg;
        }
    }

    summary
}

/// Insertion-ordered frequency count.
///
/// Counts are accumulated in first-seen order and the winner is replaced only
/// on a strictly higher count, so ties always resolve to the value seen
/// first. This must not be swapped for a map-based counter with unspecified
/// tie order.
fn most_frequent<T: PartialEq>(values: impl Iterator<Item = T>) -> Option<(T, usize)> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        let improved = match &best {
            Some((_, best_count)) => count > *best_count,
            None => true,
        };
        if improved {
            best = Some((value, count));
        }
    }
    best
}
