use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use coalition_shapley::{
    CharacteristicValues, PlayerCount, ShapleyInput, ShapleyValue, types::display_as_percent,
};
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode};
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Compute Shapley values of a cooperative game
#[derive(Debug, Parser)]
#[command(name = "shapley-values", version)]
struct Cli {
    /// Number of players
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    players: Option<i64>,

    /// Characteristic values in canonical coalition order, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with_all = ["values_csv", "attributes_csv"]
    )]
    values: Vec<f64>,

    /// CSV file with a `Value` column in canonical coalition order
    #[arg(long, conflicts_with = "attributes_csv")]
    values_csv: Option<PathBuf>,

    /// CSV file with `Player,Value` columns describing an additive game
    #[arg(long, conflicts_with = "players")]
    attributes_csv: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Serialize, Tabled)]
struct Row {
    player: String,
    value: f64,
    #[tabled(display = "display_as_percent")]
    proportion: f64,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    characteristic_values: &'a [f64],
    shapley_values: &'a [Row],
}

fn init_logging(log_level: &str) {
    // RUST_LOG wins over the flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn player_count(cli: &Cli) -> anyhow::Result<usize> {
    let Some(n) = cli.players else {
        bail!("--players is required unless --attributes-csv is given");
    };
    Ok(PlayerCount::try_from(n)?.get())
}

/// Resolve the game and the display name of each player
fn load_game(cli: &Cli) -> anyhow::Result<(Vec<String>, CharacteristicValues)> {
    if let Some(path) = &cli.attributes_csv {
        return CharacteristicValues::additive_from_csv(path)
            .with_context(|| format!("reading attributes from {}", path.display()));
    }

    let n_players = player_count(cli)?;
    let values = match &cli.values_csv {
        Some(path) => CharacteristicValues::from_csv(path, n_players)
            .with_context(|| format!("reading characteristic values from {}", path.display()))?,
        None => CharacteristicValues::new(n_players, cli.values.clone())?,
    };
    let names = (0..n_players).map(|i| i.to_string()).collect();

    Ok((names, values))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (names, values) = load_game(&cli)?;
    let input = ShapleyInput::from(values);

    info!(n_players = input.n_players, "loaded game");

    let output = input.compute()?;
    let rows: Vec<Row> = output
        .into_iter()
        .map(|sv: ShapleyValue| Row {
            player: names[sv.player.index()].clone(),
            value: sv.value,
            proportion: sv.proportion,
        })
        .collect();

    match cli.output {
        OutputFormat::Table => {
            println!(" Input: {:?}", input.characteristic_values);
            println!("{}", Table::new(&rows));
        }
        OutputFormat::Json => {
            let report = Report {
                characteristic_values: &input.characteristic_values,
                shapley_values: &rows,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error computing Shapley values: {e:#}");
            ExitCode::FAILURE
        }
    }
}
