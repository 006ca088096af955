use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orderdash_core::Bucket;
use orderdash_finance::{Engine, Report, Snapshot, SnapshotSummary, format_inr};
use orderdash_ingest::load_records;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod config;

#[derive(Parser, Debug)]
#[command(name = "orderdash", version, about = "Order-export classification and profit reports")]
struct Cli {
    /// Config file (default: ~/.orderdash/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify an export and print bucket counts and totals
    Classify {
        /// Order export (.csv, .xlsx or .xls)
        file: PathBuf,

        /// Print the JSON summary instead of text
        #[arg(long)]
        json: bool,
    },

    /// Classify an export and print the dashboard report table
    Report {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Classify an export and print profit per delivery date
    ProfitGraph {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Engine configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("orderdash=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Classify { file, json } => {
            let snap = submit_file(config_path, &file)?;
            if json {
                print_json(&SnapshotSummary::from_snapshot(&snap))?;
            } else {
                print_classification(&snap, &file);
            }
        }

        Command::Report { file, json } => {
            let snap = submit_file(config_path, &file)?;
            let report = Report::from_snapshot(&snap);
            if json {
                print_json(&report)?;
            } else {
                println!("# Dashboard report\n");
                print!("{}", report.render_table());
            }
        }

        Command::ProfitGraph { file, json } => {
            let engine = engine_for(config_path)?;
            engine.submit(load(&file)?)?;
            let series = engine.profit_by_date()?;
            if json {
                print_json(&series)?;
            } else if series.is_empty() {
                println!("No delivered orders with a readable date.");
            } else {
                for p in &series {
                    println!("{}  {:>12}", p.date, format_inr(p.profit));
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(config_path)?,
            ConfigCommand::Show => {
                let cfg = config::load_config(config_path)?;
                print!("{}", config::render_config(&cfg)?);
            }
        },
    }

    Ok(())
}

fn engine_for(config_path: Option<&Path>) -> Result<Engine> {
    let cfg = config::load_config(config_path)?;
    Ok(Engine::new(&cfg))
}

fn load(file: &Path) -> Result<Vec<orderdash_core::Record>> {
    load_records(file).with_context(|| format!("loading {}", file.display()))
}

fn submit_file(config_path: Option<&Path>, file: &Path) -> Result<Arc<Snapshot>> {
    let engine = engine_for(config_path)?;
    engine.submit(load(file)?)?;
    Ok(engine.snapshot()?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_classification(snap: &Snapshot, file: &Path) {
    let t = &snap.totals;
    println!("Classified {} orders from {}\n", snap.records.len(), file.display());

    for (bucket, count) in snap.buckets.counts() {
        println!("{:<26} {}", bucket, count);
    }

    println!();
    println!("{:<40} {}", "Supplier listed total", format_inr(t.total_supplier_listed_price));
    println!("{:<40} {}", "Supplier discounted total", format_inr(t.total_supplier_discounted_price));
    println!("{:<40} {}", "Delivered orders", t.sell_in_month_products);
    println!(
        "{:<40} {}",
        "Delivered discounted total",
        format_inr(t.delivered_supplier_discounted_price_total)
    );
    println!("{:<40} {}", "Door step exchange value", format_inr(t.total_door_step_exchanger));
    println!("{:<40} {}", "Total profit", format_inr(t.total_profit));
    println!("{:<40} {}%", "Profit", t.profit_percent_text());

    if !snap.date_issues.is_empty() {
        println!("\nSkipped in profit series (unreadable date):");
        for issue in &snap.date_issues {
            println!("- record {}: {} = {:?} ({})", issue.row + 1, issue.field, issue.raw, issue.reason);
        }
    }

    let other = snap.bucket_count(Bucket::Other);
    if other > 0 {
        println!("\n{} orders matched no status bucket.", other);
    }
}
