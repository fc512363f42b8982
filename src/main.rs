use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use intcursor::{BitSetConfig, IntBitSet, IntIterator, IntList, PartTracker};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "intcursor", about = "Walk integer collections and remove values in place")]
struct Cli {
    /// Log removals and range changes (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Walk an ordered list, removing selected values.
    Walk {
        /// Values in list order.
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Value to remove (repeatable).
        #[arg(long, allow_negative_numbers = true)]
        remove: Vec<i64>,
        /// Remove every even value.
        #[arg(long)]
        remove_even: bool,
    },
    /// Walk a bit set in ascending order, removing selected values.
    Bits {
        /// Values are limited to `0..capacity`.
        #[arg(long, default_value_t = 1024)]
        capacity: usize,
        /// Values to insert.
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Value to remove (repeatable).
        #[arg(long)]
        remove: Vec<usize>,
    },
    /// Track received parts and report what is missing.
    Parts {
        /// Total number of parts in the transfer.
        #[arg(long)]
        total: u32,
        /// Received part numbers.
        #[arg(allow_negative_numbers = true)]
        parts: Vec<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Walk {
            values,
            remove,
            remove_even,
        } => run_walk(values, remove, remove_even)?,
        Commands::Bits {
            capacity,
            values,
            remove,
        } => run_bits(capacity, values, remove)?,
        Commands::Parts { total, parts } => run_parts(total, parts)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_walk(values: Vec<i64>, remove: Vec<i64>, remove_even: bool) -> Result<()> {
    let mut list = IntList::from(values);
    let removed = list
        .cursor()
        .remove_if(|v| remove.contains(&v) || (remove_even && v % 2 == 0))
        .context("list walk violated the cursor contract")?;

    info!(removed, remaining = list.len(), "list walk finished");
    println!("kept\t{}", join(list.as_slice()));
    println!("removed\t{removed}");
    Ok(())
}

fn run_bits(capacity: usize, values: Vec<i64>, remove: Vec<usize>) -> Result<()> {
    let config = BitSetConfig::with_capacity(capacity).context("invalid bit set capacity")?;
    let mut set = IntBitSet::new(config);
    for value in values {
        set.insert_signed(value)
            .with_context(|| format!("failed to insert {value}"))?;
    }

    let removed = set
        .cursor()
        .remove_if(|v| remove.contains(&v))
        .context("bit set walk violated the cursor contract")?;

    info!(removed, remaining = set.len(), "bit set walk finished");
    println!("kept\t{}", join(&set.iter().collect::<Vec<_>>()));
    println!("removed\t{removed}");
    Ok(())
}

fn run_parts(total: u32, parts: Vec<i64>) -> Result<()> {
    let mut tracker = PartTracker::new();
    for part in parts {
        tracker
            .insert_signed(part)
            .with_context(|| format!("failed to record part {part}"))?;
    }

    let received: Vec<String> = tracker
        .ranges()
        .iter()
        .map(|r| format!("{}..={}", r.first, r.last))
        .collect();
    let missing: Vec<String> = tracker
        .missing_ranges(total)
        .iter()
        .map(|r| format!("{}..{}", r.start, r.end))
        .collect();

    println!("received\t{}", received.join(" "));
    println!("missing\t{}", missing.join(" "));
    println!("complete\t{}", tracker.is_complete(total));
    Ok(())
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
