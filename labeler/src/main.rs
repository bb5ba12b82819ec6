//! Command-line label printing for the Brother QL-700.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ql_labeler::batch::BatchPlan;
use ql_labeler::catalog;
use ql_labeler::config::AppConfig;
use ql_labeler::printjob::{self, PrintContext};
use ql_labeler::prompt::TerminalPrompt;
use ql_raster::transport::PrinterTarget;

#[derive(Debug, Parser)]
#[command(
    name = "ql-labeler",
    version,
    about = "Print product name + QR labels from a CSV catalog on a Brother QL-700"
)]
struct Cli {
    /// CSV catalog with a "Product Name" column.
    csv_file: Option<PathBuf>,

    /// Printer identifier (usb://VID:PID, file://path, or CUPS queue).
    #[arg(long)]
    printer: Option<String>,

    /// Label media type (only 62mm continuous tape is supported).
    #[arg(long)]
    label: Option<String>,

    /// Print one test label and exit.
    #[arg(long)]
    test: bool,

    /// Render preview PNG files instead of printing.
    #[arg(long)]
    preview: bool,

    /// How many labels to preview.
    #[arg(long, default_value_t = 5)]
    preview_count: usize,

    /// First product to print (1-based, inclusive).
    #[arg(long)]
    start: Option<usize>,

    /// Last product to print (1-based, inclusive).
    #[arg(long)]
    end: Option<usize>,

    /// Pause between labels in seconds.
    #[arg(long, default_value_t = 0.5)]
    delay: f64,

    /// QR glyph size in pixels.
    #[arg(long)]
    qr_size: Option<u32>,

    /// Pin the font size instead of auto-fitting.
    #[arg(long)]
    font_size: Option<f32>,

    /// Grid columns per label.
    #[arg(long, default_value_t = 4)]
    columns: u32,

    /// Grid rows per label.
    #[arg(long, default_value_t = 1)]
    rows: u32,

    /// Print multi-product grid labels in resumable batches.
    #[arg(long)]
    batch: bool,

    /// Products per batch (floored to a multiple of columns × rows).
    #[arg(long)]
    batch_size: Option<usize>,

    /// Ignore any saved progress and start from the beginning.
    #[arg(long)]
    no_resume: bool,

    /// Do not cut after each label (single-label mode only).
    #[arg(long)]
    no_cut: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(printer) = &cli.printer {
        config.printer = printer.clone();
    }
    if let Some(label) = &cli.label {
        config.label_type = label.clone();
    }
    if config.label_type != "62" {
        bail!("unsupported label type '{}': only 62mm continuous tape", config.label_type);
    }

    let target: PrinterTarget = config.printer.parse()?;
    let font = label_engine::font::load_system_font()?;
    let ctx = PrintContext {
        font,
        target,
        qr_size: cli.qr_size.unwrap_or(label_engine::DEFAULT_QR_SIZE),
        font_size: cli.font_size,
        columns: cli.columns,
        rows: cli.rows,
    };

    if cli.test {
        info!(printer = %config.printer, "printing test label");
        // Uses the first catalog products when a CSV is given.
        let names: Vec<String> = match &cli.csv_file {
            Some(path) => catalog::load_products(path)?,
            None => (1..=ctx.columns * ctx.rows)
                .map(|i| format!("Test Product {i}"))
                .collect(),
        };
        if names.is_empty() {
            bail!("catalog has no product rows");
        }
        if cli.batch {
            let per_label = (ctx.columns * ctx.rows) as usize;
            let take = per_label.min(names.len());
            ctx.print_grid(&names[..take], true).await?;
        } else {
            let name = names.first().map(String::as_str).unwrap_or("Test Label");
            ctx.print_single(name, true).await?;
        }
        info!("test label sent");
        return Ok(());
    }

    let csv_file = cli
        .csv_file
        .context("a CSV catalog is required (or pass --test)")?;
    let products = catalog::load_products(&csv_file)
        .with_context(|| format!("loading {}", csv_file.display()))?;
    if products.is_empty() {
        bail!("{} has no product rows", csv_file.display());
    }
    info!(count = products.len(), file = %csv_file.display(), "catalog loaded");

    if cli.preview {
        let out_dir = PathBuf::from("previews");
        if cli.batch {
            let plan = BatchPlan::new(
                products.len(),
                cli.batch_size.unwrap_or(config.batch_size),
                ctx.columns,
                ctx.rows,
            );
            std::fs::create_dir_all(&out_dir)?;
            printjob::generate_grid_preview(
                &ctx,
                &products,
                cli.preview_count.min(plan.total_labels()),
                &out_dir.join("grid_preview.png"),
            )?;
        } else {
            printjob::generate_previews(&ctx, &products, &out_dir, cli.preview_count)?;
        }
        return Ok(());
    }

    let mut prompt = TerminalPrompt;
    let summary = if cli.batch {
        printjob::run_batches(
            &ctx,
            &csv_file,
            &products,
            cli.batch_size.unwrap_or(config.batch_size),
            cli.no_resume,
            &mut prompt,
        )
        .await?
    } else {
        printjob::run_range(
            &ctx,
            &products,
            cli.start,
            cli.end,
            cli.delay,
            cli.no_cut,
            &mut prompt,
        )
        .await?
    };

    if summary.errors > 0 {
        bail!("{} labels failed to print", summary.errors);
    }
    Ok(())
}
