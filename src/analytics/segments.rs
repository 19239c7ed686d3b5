//! Segmentation, per-coin success tracking and trade rankings
//!
//! One pass over the full history partitions trades along three independent
//! axes (account mode, direction, leverage tier), pools win/total counts per
//! coin, and collects the per-direction candidates that the rankings are
//! carved from.

use crate::model::{Position, TradeMode, TradeRecord};
use serde::Serialize;
use std::cmp::Ordering;

/// Win/loss tally for one segment of the trade history.
///
/// `count` includes break-even trades; a trade is a win only above zero and
/// a loss only below, so `wins + losses <= count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SegmentStats {
    pub count: usize,
    pub wins: usize,
    pub losses: usize,
}

impl SegmentStats {
    fn record(&mut self, pnl: f64) {
        self.count += 1;
        if pnl > 0.0 {
            self.wins += 1;
        } else if pnl < 0.0 {
            self.losses += 1;
        }
    }

    /// wins / count, or 0 for an empty segment.
    pub fn success_ratio(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.wins as f64 / self.count as f64
    }
}

/// Per-coin outcome tally pooled across mode and direction, kept in
/// first-seen coin order.
///
/// A coin whose trades all have undefined returns keeps `total == 0` and is
/// skipped by the recommendation ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinSuccess {
    pub coin: String,
    pub wins: usize,
    pub total: usize,
}

/// One trade as it appears in the best/worst rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTrade {
    pub coin: String,
    pub pnl: f64,
    pub entry_price: f64,
    pub exit_price: f64,
}

/// Everything the detailed-analysis and recommendation sections are built
/// from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TradeBreakdown {
    pub real: SegmentStats,
    pub demo: SegmentStats,
    pub long: SegmentStats,
    pub short: SegmentStats,
    pub low_leverage: SegmentStats,
    pub high_leverage: SegmentStats,
    pub coin_success: Vec<CoinSuccess>,
    pub best_long: Vec<RankedTrade>,
    pub worst_long: Vec<RankedTrade>,
    pub best_short: Vec<RankedTrade>,
    pub worst_short: Vec<RankedTrade>,
    pub avg_spot_pnl: f64,
    pub avg_leveraged_pnl: f64,
}

/// Partitions and ranks the full trade history.
///
/// Only trades with a defined leveraged return enter the segment buckets,
/// coin tallies and rankings; every coin still gets a (possibly zero)
/// `CoinSuccess` entry so first-seen ordering covers the whole input.
pub fn analyze(trades: &[TradeRecord]) -> TradeBreakdown {
    let mut breakdown = TradeBreakdown::default();
    let mut long_trades: Vec<RankedTrade> = Vec::new();
    let mut short_trades: Vec<RankedTrade> = Vec::new();
    let mut spot_sum = 0.0;
    let mut leveraged_sum = 0.0;
    let mut defined = 0usize;

    for trade in trades {
        if !breakdown.coin_success.iter().any(|c| c.coin == trade.coin) {
            breakdown.coin_success.push(CoinSuccess {
                coin: trade.coin.clone(),
                wins: 0,
                total: 0,
            });
        }

        let pnl = match trade.leveraged_pnl() {
            Some(pnl) => pnl,
            None => continue,
        };
        let spot = match trade.spot_pnl() {
            Some(spot) => spot,
            None => continue,
        };
        defined += 1;
        leveraged_sum += pnl;
        spot_sum += spot;

        match trade.mode {
            TradeMode::Real => breakdown.real.record(pnl),
            TradeMode::Demo => breakdown.demo.record(pnl),
        }

        if let Some(entry) = breakdown
            .coin_success
            .iter_mut()
            .find(|c| c.coin == trade.coin)
        {
            entry.total += 1;
            if pnl > 0.0 {
                entry.wins += 1;
            }
        }

        let ranked = RankedTrade {
            coin: trade.coin.clone(),
            pnl,
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
        };
        match trade.position {
            Position::Long => {
                breakdown.long.record(pnl);
                long_trades.push(ranked);
            }
            Position::Short => {
                breakdown.short.record(pnl);
                short_trades.push(ranked);
            }
        }

        if trade.is_low_leverage() {
            breakdown.low_leverage.record(pnl);
        } else {
            breakdown.high_leverage.record(pnl);
        }
    }

    let (best_long, worst_long) = rank(long_trades);
    breakdown.best_long = best_long;
    breakdown.worst_long = worst_long;
    let (best_short, worst_short) = rank(short_trades);
    breakdown.best_short = best_short;
    breakdown.worst_short = worst_short;

    if defined > 0 {
        breakdown.avg_spot_pnl = spot_sum / defined as f64;
        breakdown.avg_leveraged_pnl = leveraged_sum / defined as f64;
    }

    breakdown
}

/// Stable sort descending by PnL, then the first and last three.
///
/// With fewer than six trades the two lists overlap; that is the defined
/// behavior, not an error. The bottom list stays in descending order.
fn rank(mut trades: Vec<RankedTrade>) -> (Vec<RankedTrade>, Vec<RankedTrade>) {
    trades.sort_by(|a, b| b.pnl.partial_cmp(&a.pnl).unwrap_or(Ordering::Equal));
    let top = trades.iter().take(3).cloned().collect();
    let bottom = trades[trades.len().saturating_sub(3)..].to_vec();
    (top, bottom)
}
