/// Command-line driver: label drainage basins of an elevation map and print
/// them as a text table or JSON report.
use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use watershed_core::{
    parse_elevation_map, watersheds_with, BasinReport, LabelPolicy, WatershedConfig,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "watersheds", about = "Label drainage basins of an elevation grid")]
struct Args {
    /// JSON file holding an array of rows of elevations.
    #[arg(short, long, conflicts_with_all = ["sample", "samples"])]
    input: Option<String>,

    /// Run one built-in sample grid.
    #[arg(short, long, value_enum, conflicts_with = "samples")]
    sample: Option<Sample>,

    /// Run every built-in sample grid in turn.
    #[arg(long)]
    samples: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// JSON config file (e.g. {"label_policy": "alphabet"}).
    #[arg(short, long)]
    config: Option<String>,

    /// Stop at 26 single-letter labels instead of continuing with aa, ab, …
    #[arg(long)]
    strict_labels: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Sample {
    Diagonal,
    Ridge,
    Twin,
    Valley,
    Plateau,
    Single,
    Empty,
    EmptyRow,
}

impl Sample {
    const ALL: [Sample; 8] = [
        Sample::Diagonal,
        Sample::Ridge,
        Sample::Twin,
        Sample::Valley,
        Sample::Plateau,
        Sample::Single,
        Sample::Empty,
        Sample::EmptyRow,
    ];

    fn elevations(self) -> Vec<Vec<f64>> {
        let rows: Vec<Vec<i32>> = match self {
            Sample::Diagonal => vec![vec![9, 6, 3], vec![5, 9, 6], vec![3, 5, 9]],
            Sample::Ridge => vec![vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 7]],
            Sample::Twin => vec![vec![7, 6, 7], vec![7, 6, 7]],
            Sample::Valley => vec![
                vec![1, 2, 3, 4, 5],
                vec![2, 9, 3, 9, 6],
                vec![3, 3, 0, 8, 7],
                vec![4, 9, 8, 9, 8],
                vec![5, 6, 7, 8, 9],
            ],
            Sample::Plateau => vec![vec![8; 13]; 2],
            Sample::Single => vec![vec![1]],
            Sample::Empty => vec![],
            Sample::EmptyRow => vec![vec![]],
        };
        rows.into_iter()
            .map(|row| row.into_iter().map(f64::from).collect())
            .collect()
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn render_text(report: &BasinReport<f64>) -> String {
    report
        .labels
        .iter()
        .map(|row| row.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(report: &BasinReport<f64>, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => render_text(report),
        Format::Json => serde_json::to_string_pretty(report)?,
    })
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<WatershedConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            WatershedConfig::from_json(&json).with_context(|| format!("parsing {path}"))?
        }
        None => WatershedConfig::default(),
    };
    if args.strict_labels {
        config.label_policy = LabelPolicy::Alphabet;
    }
    Ok(config)
}

/// Resolve one elevation map and render it.
fn run_map(rows: &[Vec<f64>], config: &WatershedConfig, format: Format) -> Result<String> {
    let map = watersheds_with(rows, config)?;
    info!(
        "{}x{} grid: {} basins",
        map.grid().height,
        map.grid().width,
        map.basin_count()
    );
    render(&map.report(), format)
}

// ── main ──────────────────────────────────────────────────────────────────────

/// Run the requested input(s), writing results to `out`.
///
/// In `--samples` mode every sample is reported, including the ones that are
/// rejected as empty, and the run itself succeeds.
fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let config = load_config(args)?;

    if args.samples {
        for sample in Sample::ALL {
            writeln!(out, "# {sample:?}")?;
            match run_map(&sample.elevations(), &config, args.format) {
                Ok(text) => writeln!(out, "{text}\n")?,
                Err(e) => writeln!(out, "Error: {e}\n")?,
            }
        }
        return Ok(());
    }

    let rows = if let Some(sample) = args.sample {
        sample.elevations()
    } else if let Some(path) = &args.input {
        eprintln!("Reading {path} ...");
        let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        parse_elevation_map(&json).with_context(|| format!("parsing {path}"))?
    } else {
        bail!("no input specified; use --input, --sample or --samples (see --help)");
    };

    writeln!(out, "{}", run_map(&rows, &config, args.format)?)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
