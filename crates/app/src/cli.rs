//! Command-line interface definitions and handlers.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use pocketbook_core::TransactionId;
use pocketbook_infra::{Config, FileStore, KeyValueLedgerRepository, LedgerRepository};

use crate::form::TransactionForm;
use crate::format::BalanceTone;
use crate::notice::{Notice, NoticeLevel, CONFIRM_DELETE_PROMPT};
use crate::session::LedgerSession;
use crate::view::{LedgerView, SummaryView, TransactionRow, EMPTY_STATE_MESSAGE};

/// Pocketbook - personal income/expense ledger.
#[derive(Parser, Debug)]
#[command(name = "pocketbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the stored ledger (overrides POCKETBOOK_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List transactions, newest first, with totals
    List,

    /// Show income, expense and balance totals
    Summary,

    /// Record a transaction
    Add(AddArgs),

    /// Delete a transaction by id
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Free-text label
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Non-negative amount, e.g. 150000 or 2500.50
    #[arg(long, short = 'a', allow_hyphen_values = true)]
    pub amount: String,

    /// Calendar date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Pemasukan/income or Pengeluaran/expense
    #[arg(long = "type", short = 't', default_value = "Pemasukan")]
    pub kind: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Transaction id (see `pocketbook list`)
    pub id: TransactionId,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tanggal")]
    date: String,
    #[tabled(rename = "Keterangan")]
    description: String,
    #[tabled(rename = "Jumlah")]
    amount: String,
    #[tabled(rename = "Jenis")]
    kind: String,
}

/// Run a parsed command against the configured ledger.
pub fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let repository = KeyValueLedgerRepository::with_key(
        FileStore::new(&config.data_dir),
        config.storage_key.clone(),
    );
    tracing::debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "opening ledger");

    let mut session = LedgerSession::open(repository);
    if let Some(notice) = session.startup_notice() {
        print_notice(notice);
    }

    match cli.command {
        Commands::List => {
            let view = session.view();
            if cli.json {
                print_json(&view)?;
            } else {
                print_table(&view);
                print_summary(&view.summary);
            }
        }
        Commands::Summary => {
            let view = session.view();
            if cli.json {
                print_json(&view.summary)?;
            } else {
                print_summary(&view.summary);
            }
        }
        Commands::Add(args) => add(&mut session, args, cli.json)?,
        Commands::Delete(args) => delete(&mut session, args, cli.json)?,
    }

    Ok(())
}

fn add<R: LedgerRepository>(
    session: &mut LedgerSession<R>,
    args: AddArgs,
    json: bool,
) -> anyhow::Result<()> {
    let form = TransactionForm {
        description: args.description,
        amount: args.amount,
        date: args.date,
        kind: args.kind,
    };
    let outcome = session.submit(&form).context("transaction rejected")?;

    outcome.notices.iter().for_each(print_notice);
    if json {
        print_json(&TransactionRow::from(&outcome.value))?;
    } else {
        println!("  id {}", outcome.value.id().bold());
    }
    Ok(())
}

fn delete<R: LedgerRepository>(
    session: &mut LedgerSession<R>,
    args: DeleteArgs,
    json: bool,
) -> anyhow::Result<()> {
    let exists = session.ledger().get(args.id).is_some();

    if exists && !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(CONFIRM_DELETE_PROMPT)
            .default(false)
            .interact()
            .context("failed to read confirmation")?;
        if !confirmed {
            return Ok(());
        }
    }

    let outcome = session.remove(args.id);
    outcome.notices.iter().for_each(print_notice);
    if !outcome.value {
        eprintln!("{}", format!("Transaksi {} tidak ditemukan.", args.id).yellow());
    }
    if json {
        print_json(&serde_json::json!({ "id": args.id, "removed": outcome.value }))?;
    }
    Ok(())
}

fn print_table(view: &LedgerView) {
    if view.is_empty() {
        println!("{}", EMPTY_STATE_MESSAGE.dimmed());
        return;
    }

    let rows = view.rows.iter().map(|row| Row {
        id: row.id.to_string(),
        date: row.date_display.clone(),
        description: row.description.clone(),
        amount: row.amount_display.clone(),
        kind: row.kind_label.to_string(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn print_summary(summary: &SummaryView) {
    println!();
    println!("  Total Pemasukan    {}", summary.total_income_display.green());
    println!("  Total Pengeluaran  {}", summary.total_expense_display.red());
    match summary.balance_tone {
        BalanceTone::Negative => println!("  Saldo              {}", summary.balance_display.red().bold()),
        BalanceTone::NonNegative => {
            println!("  Saldo              {}", summary.balance_display.green().bold())
        }
    }
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => eprintln!("{}", notice.message.green()),
        NoticeLevel::Warning => eprintln!("{}", notice.message.yellow()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
