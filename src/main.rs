//! Crypto Trade Tracker CLI
//!
//! Thin glue over the library: record trades, keep notes, and generate the
//! daily report artifact.

use clap::{Parser, Subcommand};
use trade_tracker::{
    config::Config,
    model::{Position, TradeMode, TradeRecord},
    report::{build_report, writer::ReportWriter},
    storage::{Database, TradeStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "trade-tracker")]
#[command(about = "Personal crypto trade logging and reporting tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a trade
    Add {
        /// Coin ticker, e.g. btc
        coin: String,
        /// Direction: long or short
        position: String,
        /// Leverage multiplier
        leverage: f64,
        /// Entry price
        entry_price: f64,
        /// Exit price
        exit_price: f64,
        /// Account mode: real or demo
        #[arg(long, default_value = "real")]
        mode: String,
        /// Trade date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Generate today's report artifact
    Report,
    /// Manage free-text notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    /// Save a new note
    Add { title: String, content: String },
    /// List note titles, newest first
    List,
    /// Print a note
    Show { title: String },
    /// Replace a note's content, optionally renaming it
    Edit {
        title: String,
        content: String,
        #[arg(long)]
        rename: Option<String>,
    },
    /// Delete a note
    Rm { title: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let db = Database::connect(&config.database.path).await?;

    match cli.command {
        Commands::Add {
            coin,
            position,
            leverage,
            entry_price,
            exit_price,
            mode,
            date,
        } => {
            add_trade(
                &db,
                &coin,
                &position,
                leverage,
                entry_price,
                exit_price,
                &mode,
                date,
            )
            .await
        }
        Commands::Report => generate_report(&db, &config).await,
        Commands::Note { action } => handle_note(&db, action).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn add_trade(
    db: &Database,
    coin: &str,
    position: &str,
    leverage: f64,
    entry_price: f64,
    exit_price: f64,
    mode: &str,
    date: Option<String>,
) -> anyhow::Result<()> {
    let position: Position = position.parse()?;
    let mode: TradeMode = mode.parse()?;
    let date = date.unwrap_or_else(today);

    let trade = TradeRecord::new(coin, position, leverage, entry_price, exit_price, mode, &date)?;
    let id = db.append(&trade).await?;

    println!(
        "Trade #{id} recorded: {} {} {}x {} -> {} ({}, {})",
        trade.coin, trade.position, trade.leverage, trade.entry_price, trade.exit_price,
        trade.mode, trade.date
    );
    Ok(())
}

async fn generate_report(db: &Database, config: &Config) -> anyhow::Result<()> {
    let today = today();
    let trades = db.fetch_all().await?;
    let daily_trades = db.fetch_by_date(&today).await?;
    tracing::info!(total = trades.len(), today = daily_trades.len(), "generating report");

    let report = build_report(&trades, &daily_trades, &today);
    let writer = ReportWriter::new(&config.report.output_dir);
    let path = writer.write(&report)?;

    println!("Report generated: {}", path.display());
    Ok(())
}

async fn handle_note(db: &Database, action: NoteAction) -> anyhow::Result<()> {
    match action {
        NoteAction::Add { title, content } => {
            db.add_note(&title, &content).await?;
            println!("Note '{title}' saved.");
        }
        NoteAction::List => {
            let notes = db.list_notes().await?;
            if notes.is_empty() {
                println!("No notes.");
            }
            for note in notes {
                println!("- {} ({})", note.title, note.date);
            }
        }
        NoteAction::Show { title } => match db.get_note(&title).await? {
            Some(note) => {
                println!("{}\n\n{}", note.title, note.content);
            }
            None => println!("No note titled '{title}'."),
        },
        NoteAction::Edit {
            title,
            content,
            rename,
        } => {
            let new_title = rename.as_deref().unwrap_or(&title);
            db.update_note(&title, new_title, &content).await?;
            println!("Note '{new_title}' updated.");
        }
        NoteAction::Rm { title } => {
            db.delete_note(&title).await?;
            println!("Note '{title}' deleted.");
        }
    }
    Ok(())
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
