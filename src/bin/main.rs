//! kernelmethods Command Line Interface
//!
//! Builds kernel matrices over CSV datasets and reports summaries or the
//! full matrices as JSON.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use kernelmethods::core::{AlignmentMethod, KernelError, Result};
use kernelmethods::ops::{frobenius_norm, ideal_kernel};
use kernelmethods::{CsvDataset, KernelMatrix, KernelSet, KernelSpec, Transform};
use log::{error, info, warn};
use ndarray::{Array1, Array2};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "kernelmethods")]
#[command(about = "Kernel matrices and kernel sets over CSV datasets")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one kernel matrix per kernel over a dataset
    Summary(SummaryArgs),
    /// Print the full kernel matrix for a single kernel
    Matrix(MatrixArgs),
}

#[derive(Args)]
struct DataArgs {
    /// Input data file (CSV)
    #[arg(long)]
    data: PathBuf,

    /// Treat the last column as labels
    #[arg(long)]
    labels: bool,

    /// Transform applied to every kernel matrix
    #[arg(long, value_enum, default_value = "raw")]
    transform: CliTransform,

    /// Skip per-pair input validation inside kernel functions
    #[arg(long)]
    skip_checks: bool,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SummaryArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Kernel, e.g. linear, poly:degree=2,b=1 or gaussian:sigma=10 (repeatable)
    #[arg(short, long = "kernel", required = true)]
    kernels: Vec<KernelSpec>,

    /// Alignment used against the ideal label kernel
    #[arg(long, value_enum, default_value = "frobenius")]
    alignment: CliAlignment,
}

#[derive(Args)]
struct MatrixArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Kernel, e.g. linear, poly:degree=2,b=1 or gaussian:sigma=10
    #[arg(short, long)]
    kernel: KernelSpec,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliTransform {
    /// Kernel values as computed
    #[value(name = "raw")]
    Raw,
    /// Double-centered in feature space
    #[value(name = "center")]
    Center,
    /// Scaled to a unit diagonal
    #[value(name = "normalize")]
    Normalize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliAlignment {
    #[value(name = "frobenius")]
    Frobenius,
    #[value(name = "centered")]
    Centered,
}

impl From<CliAlignment> for AlignmentMethod {
    fn from(cli_alignment: CliAlignment) -> Self {
        match cli_alignment {
            CliAlignment::Frobenius => AlignmentMethod::Frobenius,
            CliAlignment::Centered => AlignmentMethod::Centered,
        }
    }
}

#[derive(Debug, Serialize)]
struct KernelSummary {
    name: String,
    params: BTreeMap<&'static str, f64>,
    transform: Transform,
    num_samples: usize,
    trace: f64,
    frobenius_norm: f64,
    min: f64,
    max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    alignment: Option<f64>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Summary(args) => summary_command(args),
        Commands::Matrix(args) => matrix_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn summary_command(args: SummaryArgs) -> Result<()> {
    let (features, labels) = load_dataset(&args.data)?;
    let features = Arc::new(features);

    let mut kset = KernelSet::with_num_samples(features.nrows());
    for spec in &args.kernels {
        let km = build_matrix(spec, &features, &args.data)?;
        kset.append(km)?;
    }
    kset.set_attr("source", args.data.data.display().to_string())?;
    info!("Built kernel set with {} kernels", kset.size());

    let target = match &labels {
        Some(labels) => Some(ideal_kernel(labels.view())),
        None => {
            info!("No labels given, skipping alignment");
            None
        }
    };
    let method = AlignmentMethod::from(args.alignment);

    let mut summaries = Vec::with_capacity(kset.size());
    for km in &kset {
        let values = km.full()?;
        let alignment = match &target {
            Some(target) => Some(km.alignment_to(target, method)?),
            None => None,
        };

        let stats = km.cache_stats();
        info!(
            "{}: {} cached pairs, {:.1}% hit rate",
            km.name(),
            stats.size,
            stats.hit_rate() * 100.0
        );

        summaries.push(KernelSummary {
            name: km.name(),
            params: km.kernel().params().into_iter().collect(),
            transform: km.transform(),
            num_samples: values.nrows(),
            trace: values.diag().sum(),
            frobenius_norm: frobenius_norm(values.view()),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            alignment,
        });
    }

    write_json(&summaries, args.data.output.as_deref())
}

fn matrix_command(args: MatrixArgs) -> Result<()> {
    let (features, labels) = load_dataset(&args.data)?;
    if labels.is_some() {
        warn!("Labels are not used by the matrix command");
    }

    let km = build_matrix(&args.kernel, &Arc::new(features), &args.data)?;
    let values = km.full()?;
    let rows: Vec<Vec<f64>> = values.outer_iter().map(|row| row.to_vec()).collect();

    write_json(&rows, args.data.output.as_deref())
}

fn load_dataset(args: &DataArgs) -> Result<(Array2<f64>, Option<Array1<f64>>)> {
    info!("Loading dataset from: {:?}", args.data);
    if !has_csv_extension(&args.data) {
        warn!("File extension is not .csv, reading as CSV anyway");
    }

    let dataset = CsvDataset::from_file(&args.data, args.labels)?;
    info!(
        "Loaded {} samples with {} features",
        dataset.len(),
        dataset.dim()
    );
    Ok(dataset.into_parts())
}

fn build_matrix(
    spec: &KernelSpec,
    features: &Arc<Array2<f64>>,
    args: &DataArgs,
) -> Result<KernelMatrix> {
    let mut km = KernelMatrix::from_boxed(spec.build(args.skip_checks)?);
    km.attach_to(Arc::clone(features))?;

    match args.transform {
        CliTransform::Raw => {}
        CliTransform::Center => km.center()?,
        CliTransform::Normalize => km.normalize()?,
    }
    info!("Prepared {km}");
    Ok(km)
}

fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| KernelError::SerializationError(e.to_string()))?;

    match output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{rendered}")?;
            writer.flush()?;
            info!("Output saved to: {path:?}");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
