use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use rainwise_core::{Client, FetchParams, ReadingTable};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "rainwise", version, about = "RainWise station data CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the station identity comes from. A config file, when given,
/// overrides any directly supplied parameters.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Path to a config.json with station mac, interval, and units.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Station mac address, e.g. "00:11:22:33:44:55".
    #[arg(long)]
    pub mac: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Readings over the trailing ~48 hours.
    Recent {
        #[command(flatten)]
        source: SourceArgs,

        /// Sampling interval in minutes (1, 5, 10, 15, 30, or 60).
        #[arg(long, default_value_t = 1)]
        interval: u32,

        /// Measurement system: english or metric.
        #[arg(long, default_value = "english")]
        units: String,
    },

    /// Current conditions as a single flattened row.
    Current {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl SourceArgs {
    fn into_params(self, interval: u32, units: String) -> FetchParams {
        FetchParams {
            config_path: self.config,
            station_mac: self.mac,
            interval,
            units,
        }
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let client = Client::new();

        match self.command {
            Command::Recent {
                source,
                interval,
                units,
            } => {
                let params = source.into_params(interval, units);
                let table = client.get_recent_data(&params)?;
                print_table(&table);
            }
            Command::Current { source } => {
                let defaults = FetchParams::default();
                let params = source.into_params(defaults.interval, defaults.units);
                let table = client.get_current_data(&params)?;
                print_row(&table);
            }
        }

        Ok(())
    }
}

fn print_table(table: &ReadingTable) {
    println!("{}", table.columns().join("\t"));
    for row in table.rows() {
        let rendered: Vec<String> = row.iter().map(render).collect();
        println!("{}", rendered.join("\t"));
    }
}

fn print_row(table: &ReadingTable) {
    if let Some(row) = table.rows().first() {
        for (name, value) in table.columns().iter().zip(row) {
            println!("{name}: {}", render(value));
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
