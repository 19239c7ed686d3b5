//! Report payload assembly
//!
//! `build_report` runs the analytics pipeline and lays the results out as an
//! ordered list of named sections of typed lines. It is a pure function; the
//! side-effecting half (persisting the artifact) lives in [`writer`], which
//! just walks the structure. Section order and the line order within each
//! section are part of the report's contract.

pub mod writer;

#[cfg(test)]
mod tests;

use crate::analytics::{
    self, LeverageAdvice, PositionAdvice, RankedTrade, Recommendations, SegmentStats,
    TradeBreakdown, TradeSummary,
};
use crate::model::TradeRecord;
use serde::Serialize;

/// One line of a report section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReportLine {
    /// `label: value`
    Field { label: String, value: String },
    /// A heading followed by indented items; renderers show a placeholder
    /// when `items` is empty.
    Group { label: String, items: Vec<String> },
    /// A free-standing sentence.
    Note(String),
}

/// A titled, ordered run of lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

/// The complete report payload for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub date: String,
    pub sections: Vec<ReportSection>,
}

/// Builds the full report payload from a trade snapshot.
///
/// `daily_trades` is the subset of `trades` dated `today`, fetched (or
/// filtered) by the caller; the daily section is the same summary
/// computation applied to that subset, not a separate algorithm.
pub fn build_report(trades: &[TradeRecord], daily_trades: &[TradeRecord], today: &str) -> Report {
    let all_time = analytics::summarize(trades);
    let daily = analytics::summarize(daily_trades);
    let breakdown = analytics::analyze(trades);
    let recommendations = analytics::recommend(&breakdown);

    Report {
        title: "CRYPTO TRADING REPORT".to_string(),
        date: today.to_string(),
        sections: vec![
            general_section(&all_time),
            daily_section(&daily, today),
            detailed_section(&breakdown),
            comparison_section(&breakdown),
            recommendation_section(&recommendations),
        ],
    }
}

fn general_section(summary: &TradeSummary) -> ReportSection {
    ReportSection {
        title: "[GENERAL REPORT]".to_string(),
        lines: summary_lines(summary),
    }
}

fn daily_section(summary: &TradeSummary, today: &str) -> ReportSection {
    let mut lines = vec![field("Total Trades", summary.total_trades.to_string())];
    if summary.total_trades > 0 {
        // Same field run as the general section, minus the duplicate total.
        lines.extend(summary_lines(summary).into_iter().skip(1));
    } else {
        lines.push(ReportLine::Note("No trades recorded today.".to_string()));
    }
    ReportSection {
        title: format!("[DAILY REPORT] - Date: {today}"),
        lines,
    }
}

fn summary_lines(summary: &TradeSummary) -> Vec<ReportLine> {
    vec![
        field("Total Trades", summary.total_trades.to_string()),
        field(
            "Most Traded Coin",
            format!(
                "{} ({} trades)",
                summary.top_coin.as_deref().unwrap_or("None"),
                summary.top_coin_trades
            ),
        ),
        field(
            "Most Used Position",
            summary
                .top_position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "None".to_string()),
        ),
        field(
            "Most Used Leverage",
            fmt_leverage(summary.top_leverage.unwrap_or(0.0)),
        ),
        field(
            "Best Performing Coin (Average PnL)",
            format!(
                "{} ({})",
                summary.best_coin.as_deref().unwrap_or("None"),
                fmt_pct(summary.best_coin_avg_pnl)
            ),
        ),
        field(
            "Worst Performing Coin (Average PnL)",
            format!(
                "{} ({})",
                summary.worst_coin.as_deref().unwrap_or("None"),
                fmt_pct(summary.worst_coin_avg_pnl)
            ),
        ),
        field("Highest Single Trade PnL", fmt_pct(summary.max_pnl)),
        field("Lowest Single Trade PnL", fmt_pct(summary.min_pnl)),
        field("Net PnL (Total)", fmt_pct(summary.net_pnl)),
    ]
}

fn detailed_section(breakdown: &TradeBreakdown) -> ReportSection {
    ReportSection {
        title: "[DETAILED ANALYSIS]".to_string(),
        lines: vec![
            field("Real Trades", fmt_segment(&breakdown.real)),
            field("Demo Trades", fmt_segment(&breakdown.demo)),
            field("Long Trades", fmt_segment(&breakdown.long)),
            field("Short Trades", fmt_segment(&breakdown.short)),
            ranked_group("Top 3 Long Trades", &breakdown.best_long),
            ranked_group("Worst 3 Long Trades", &breakdown.worst_long),
            ranked_group("Top 3 Short Trades", &breakdown.best_short),
            ranked_group("Worst 3 Short Trades", &breakdown.worst_short),
            field("Low Leverage (1-5x)", fmt_segment(&breakdown.low_leverage)),
            field("High Leverage (5x+)", fmt_segment(&breakdown.high_leverage)),
        ],
    }
}

fn comparison_section(breakdown: &TradeBreakdown) -> ReportSection {
    let mut lines = vec![
        field("Average Spot PnL", fmt_pct(breakdown.avg_spot_pnl)),
        field("Average Leveraged PnL", fmt_pct(breakdown.avg_leveraged_pnl)),
    ];
    // The amplification ratio is meaningless against a zero spot baseline.
    if breakdown.avg_spot_pnl != 0.0 {
        lines.push(field(
            "Leverage/Spot Ratio",
            format!(
                "{:.2}x",
                breakdown.avg_leveraged_pnl / breakdown.avg_spot_pnl
            ),
        ));
    }
    ReportSection {
        title: "[SPOT (1x) vs LEVERAGED PnL COMPARISON]".to_string(),
        lines,
    }
}

fn recommendation_section(recommendations: &Recommendations) -> ReportSection {
    let mut lines = vec![ReportLine::Note(
        "Which coins should be focused on / avoided?".to_string(),
    )];

    if recommendations.focus_coins.is_empty() {
        lines.push(ReportLine::Note(
            "No recommendations due to lack of trade data.".to_string(),
        ));
    } else {
        lines.push(ReportLine::Group {
            label: "Top Performing Coins (Success Rate)".to_string(),
            items: recommendations
                .focus_coins
                .iter()
                .map(|c| format!("{}: {:.2} (Total {} trades)", c.coin, c.success_rate, c.trades))
                .collect(),
        });
        lines.push(ReportLine::Group {
            label: "Worst Performing Coins (Success Rate)".to_string(),
            items: recommendations
                .avoid_coins
                .iter()
                .map(|c| format!("{}: {:.2} (Total {} trades)", c.coin, c.success_rate, c.trades))
                .collect(),
        });
    }

    lines.push(ReportLine::Note(
        "Which position type should be preferred?".to_string(),
    ));
    lines.push(field(
        "Long Success Rate",
        format!("{:.2}", recommendations.long_success_rate),
    ));
    lines.push(field(
        "Short Success Rate",
        format!("{:.2}", recommendations.short_success_rate),
    ));
    lines.push(field(
        "Recommendation",
        match recommendations.position_advice {
            PositionAdvice::FavorLong => "Long positions seem more successful.",
            PositionAdvice::FavorShort => "Short positions seem more successful.",
            PositionAdvice::Inconclusive => {
                "Long and Short positions are similar or data is insufficient."
            }
        }
        .to_string(),
    ));

    lines.push(ReportLine::Note(
        "Which leverage level should be preferred?".to_string(),
    ));
    lines.push(field(
        "Low Leverage (1-5x) Success Rate",
        format!("{:.2}", recommendations.low_leverage_success_rate),
    ));
    lines.push(field(
        "High Leverage (5x+) Success Rate",
        format!("{:.2}", recommendations.high_leverage_success_rate),
    ));
    lines.push(field(
        "Recommendation",
        match recommendations.leverage_advice {
            LeverageAdvice::FavorLow => "Low leverage seems more successful.",
            LeverageAdvice::FavorHigh => "High leverage seems more successful.",
            LeverageAdvice::Inconclusive => {
                "Leverage comparison is inconclusive or data is insufficient."
            }
        }
        .to_string(),
    ));

    ReportSection {
        title: "[RECOMMENDATION SECTION]".to_string(),
        lines,
    }
}

fn field(label: &str, value: String) -> ReportLine {
    ReportLine::Field {
        label: label.to_string(),
        value,
    }
}

fn ranked_group(label: &str, trades: &[RankedTrade]) -> ReportLine {
    ReportLine::Group {
        label: label.to_string(),
        items: trades
            .iter()
            .map(|t| format!("{} -> {}", t.coin, fmt_pct(t.pnl)))
            .collect(),
    }
}

fn fmt_segment(stats: &SegmentStats) -> String {
    format!(
        "{} (Wins: {}, Losses: {})",
        stats.count, stats.wins, stats.losses
    )
}

fn fmt_pct(value: f64) -> String {
    format!("{value:.2}%")
}

fn fmt_leverage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}x")
    } else {
        format!("{value}x")
    }
}
