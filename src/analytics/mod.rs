//! Report analytics pipeline
//!
//! A pure, stateless batch transform over one snapshot of the trade history.
//! Three ordered stages, each feeding the next:
//!
//! ```text
//! trades ──▶ metrics::summarize ──▶ TradeSummary      (headline numbers)
//!        ──▶ segments::analyze  ──▶ TradeBreakdown    (buckets + rankings)
//!                                          │
//!                                          ▼
//!                    recommend::recommend ──▶ Recommendations
//! ```
//!
//! None of the stages perform I/O or hold state between calls; the report
//! layer owns fetching the snapshot and laying the results out.

pub mod metrics;
pub mod recommend;
pub mod segments;


pub use metrics::{summarize, TradeSummary};
pub use recommend::{recommend, CoinRating, LeverageAdvice, PositionAdvice, Recommendations};
pub use segments::{analyze, CoinSuccess, RankedTrade, SegmentStats, TradeBreakdown};
