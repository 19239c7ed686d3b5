//! Unit tests for report assembly and rendering

#[cfg(test)]
mod tests {
    use super::super::writer::{render, ReportWriter};
    use super::super::*;
    use crate::model::{Position, TradeMode, TradeRecord};

    const TODAY: &str = "2026-02-03";

    fn trade(coin: &str, leverage: f64, entry: f64, exit: f64, date: &str) -> TradeRecord {
        TradeRecord {
            coin: coin.to_string(),
            position: Position::Long,
            leverage,
            entry_price: entry,
            exit_price: exit,
            mode: TradeMode::Real,
            date: date.to_string(),
        }
    }

    fn daily_subset(trades: &[TradeRecord]) -> Vec<TradeRecord> {
        trades.iter().filter(|t| t.date == TODAY).cloned().collect()
    }

    #[test]
    fn test_sections_come_in_fixed_order() {
        let trades = vec![trade("btc", 10.0, 100.0, 110.0, TODAY)];
        let report = build_report(&trades, &daily_subset(&trades), TODAY);

        assert_eq!(report.title, "CRYPTO TRADING REPORT");
        assert_eq!(report.date, TODAY);
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "[GENERAL REPORT]",
                "[DAILY REPORT] - Date: 2026-02-03",
                "[DETAILED ANALYSIS]",
                "[SPOT (1x) vs LEVERAGED PnL COMPARISON]",
                "[RECOMMENDATION SECTION]",
            ]
        );
    }

    #[test]
    fn test_general_section_field_order_and_formatting() {
        let trades = vec![trade("btc", 10.0, 100.0, 110.0, TODAY)];
        let report = build_report(&trades, &daily_subset(&trades), TODAY);

        let lines = &report.sections[0].lines;
        let labels: Vec<String> = lines
            .iter()
            .map(|l| match l {
                ReportLine::Field { label, .. } => label.clone(),
                other => panic!("unexpected line {other:?}"),
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                "Total Trades",
                "Most Traded Coin",
                "Most Used Position",
                "Most Used Leverage",
                "Best Performing Coin (Average PnL)",
                "Worst Performing Coin (Average PnL)",
                "Highest Single Trade PnL",
                "Lowest Single Trade PnL",
                "Net PnL (Total)",
            ]
        );
        assert_eq!(
            lines[1],
            ReportLine::Field {
                label: "Most Traded Coin".to_string(),
                value: "btc (1 trades)".to_string(),
            }
        );
        assert_eq!(
            lines[3],
            ReportLine::Field {
                label: "Most Used Leverage".to_string(),
                value: "10x".to_string(),
            }
        );
        assert_eq!(
            lines[8],
            ReportLine::Field {
                label: "Net PnL (Total)".to_string(),
                value: "100.00%".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_history_renders_neutral_values() {
        let report = build_report(&[], &[], TODAY);
        let rendered = render(&report);

        assert!(rendered.contains("Total Trades: 0"));
        assert!(rendered.contains("Most Traded Coin: None (0 trades)"));
        assert!(rendered.contains("Most Used Position: None"));
        assert!(rendered.contains("Most Used Leverage: 0x"));
        assert!(rendered.contains("No trades recorded today."));
        assert!(rendered.contains("No recommendations due to lack of trade data."));
    }

    #[test]
    fn test_daily_section_uses_only_the_daily_subset() {
        let trades = vec![
            trade("btc", 2.0, 100.0, 110.0, "2026-02-02"),
            trade("btc", 2.0, 100.0, 110.0, "2026-02-02"),
            trade("eth", 2.0, 100.0, 120.0, TODAY),
        ];
        let report = build_report(&trades, &daily_subset(&trades), TODAY);

        let daily = &report.sections[1];
        assert_eq!(
            daily.lines[0],
            ReportLine::Field {
                label: "Total Trades".to_string(),
                value: "1".to_string(),
            }
        );
        assert_eq!(
            daily.lines[1],
            ReportLine::Field {
                label: "Most Traded Coin".to_string(),
                value: "eth (1 trades)".to_string(),
            }
        );
    }

    #[test]
    fn test_quiet_day_gets_a_placeholder_while_general_still_reports() {
        let trades = vec![
            trade("btc", 2.0, 100.0, 110.0, "2026-02-02"),
            trade("btc", 2.0, 100.0, 90.0, "2026-02-02"),
            trade("eth", 2.0, 100.0, 105.0, "2026-02-02"),
        ];
        let report = build_report(&trades, &daily_subset(&trades), TODAY);

        let daily = &report.sections[1];
        assert_eq!(daily.lines.len(), 2);
        assert_eq!(
            daily.lines[1],
            ReportLine::Note("No trades recorded today.".to_string())
        );

        let general = &report.sections[0];
        assert_eq!(
            general.lines[0],
            ReportLine::Field {
                label: "Total Trades".to_string(),
                value: "3".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_rankings_render_a_no_data_placeholder() {
        let report = build_report(&[], &[], TODAY);
        let rendered = render(&report);
        assert!(rendered.contains("Top 3 Long Trades:\n  No data."));
        assert!(rendered.contains("Worst 3 Short Trades:\n  No data."));
    }

    #[test]
    fn test_ranked_trades_render_indented_with_percentages() {
        let trades = vec![trade("btc", 10.0, 100.0, 110.0, TODAY)];
        let report = build_report(&trades, &daily_subset(&trades), TODAY);
        let rendered = render(&report);
        assert!(rendered.contains("Top 3 Long Trades:\n  btc -> 100.00%"));
    }

    #[test]
    fn test_ratio_line_is_omitted_for_a_zero_spot_baseline() {
        // no valid returns at all: both averages are zero
        let report = build_report(&[], &[], TODAY);
        assert_eq!(report.sections[3].lines.len(), 2);

        let trades = vec![trade("btc", 10.0, 100.0, 110.0, TODAY)];
        let report = build_report(&trades, &daily_subset(&trades), TODAY);
        assert_eq!(
            report.sections[3].lines[2],
            ReportLine::Field {
                label: "Leverage/Spot Ratio".to_string(),
                value: "10.00x".to_string(),
            }
        );
    }

    #[test]
    fn test_recommendation_section_carries_rates_and_verdicts() {
        let trades = vec![
            trade("btc", 2.0, 100.0, 110.0, TODAY),
            trade("eth", 10.0, 100.0, 90.0, TODAY),
        ];
        let report = build_report(&trades, &daily_subset(&trades), TODAY);
        let rendered = render(&report);

        assert!(rendered.contains("Top Performing Coins (Success Rate):\n  btc: 1.00 (Total 1 trades)"));
        assert!(rendered.contains("Long Success Rate: 0.50"));
        assert!(rendered.contains("Short Success Rate: 0.00"));
        assert!(rendered.contains("Recommendation: Long positions seem more successful."));
        assert!(rendered.contains("Low Leverage (1-5x) Success Rate: 1.00"));
        assert!(rendered.contains("Recommendation: Low leverage seems more successful."));
    }

    #[test]
    fn test_writer_persists_one_artifact_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("reports");
        let writer = ReportWriter::new(&output_dir);

        let trades = vec![trade("btc", 10.0, 100.0, 110.0, TODAY)];
        let report = build_report(&trades, &daily_subset(&trades), TODAY);
        let path = writer.write(&report).unwrap();

        assert_eq!(path, output_dir.join("report_2026-02-03.txt"));
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("CRYPTO TRADING REPORT\n"));
        assert!(body.contains("[GENERAL REPORT]"));
        assert!(body.contains("[RECOMMENDATION SECTION]"));

        // a rerun on the same day replaces the artifact
        let rerun = build_report(&[], &[], TODAY);
        let path2 = writer.write(&rerun).unwrap();
        assert_eq!(path, path2);
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("Total Trades: 0"));
    }
}
