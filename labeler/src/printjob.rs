//! Print job orchestration: render labels, convert, and send.
//!
//! One printer, one job at a time; every send blocks until the bytes
//! are handed off. Failures are reported through the caller-supplied
//! `JobObserver` so the loop never talks to the terminal itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ab_glyph::FontVec;
use anyhow::Context;
use image::{DynamicImage, GrayImage, RgbaImage};
use tracing::{error, info, warn};

use label_engine::grid::default_grid;
use label_engine::label::{LabelSpec, render_label};
use label_engine::preview::preview_sheet;
use ql_raster::convert::{ConvertOptions, convert};
use ql_raster::protocol::PrintOptions;
use ql_raster::transport::PrinterTarget;

use crate::batch::{BatchPlan, resume_start_batch};
use crate::checkpoint::{self, Checkpoint, checkpoint_path};

/// Everything a print run needs, resolved once up front.
pub struct PrintContext {
    pub font: FontVec,
    pub target: PrinterTarget,
    pub qr_size: u32,
    /// Pins the font size instead of auto-fitting.
    pub font_size: Option<f32>,
    pub columns: u32,
    pub rows: u32,
}

/// Continue/abort decisions, supplied by the caller (interactive y/n
/// in the CLI, auto-continue elsewhere).
pub trait JobObserver {
    /// A checkpoint was found; resume from the next batch?
    fn accept_resume(&mut self, checkpoint: &Checkpoint, plan: &BatchPlan) -> bool;

    /// About to start a fresh batch job; proceed?
    fn confirm_start(&mut self, plan: &BatchPlan) -> bool;

    /// A label failed to print; continue with the next one?
    fn continue_after_error(&mut self, what: &str, error: &str) -> bool;
}

/// Observer that never stops; used by non-interactive callers.
pub struct AutoContinue;

impl JobObserver for AutoContinue {
    fn accept_resume(&mut self, _checkpoint: &Checkpoint, _plan: &BatchPlan) -> bool {
        true
    }

    fn confirm_start(&mut self, _plan: &BatchPlan) -> bool {
        true
    }

    fn continue_after_error(&mut self, _what: &str, _error: &str) -> bool {
        true
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub printed: usize,
    pub errors: usize,
    pub aborted: bool,
}

impl PrintContext {
    fn label_spec(&self) -> LabelSpec {
        LabelSpec {
            qr_size: self.qr_size,
            ..LabelSpec::default()
        }
    }

    fn sizes(&self) -> Option<Vec<f32>> {
        self.font_size.map(|s| vec![s])
    }

    /// Render a single-product label image.
    pub fn render_single(&self, name: &str) -> anyhow::Result<RgbaImage> {
        let sizes = self.sizes();
        render_label(&self.font, name, &self.label_spec(), sizes.as_deref())
            .with_context(|| format!("rendering label for '{name}'"))
    }

    /// Render a grid label from up to columns × rows products.
    pub fn render_grid(&self, products: &[String]) -> anyhow::Result<RgbaImage> {
        default_grid(&self.font, products, self.columns, self.rows)
            .context("rendering grid label")
    }

    async fn send_image(&self, img: &RgbaImage, cut: bool) -> anyhow::Result<()> {
        let gray: GrayImage = DynamicImage::ImageRgba8(img.clone()).to_luma8();
        let opts = ConvertOptions {
            rotate: false,
            print: PrintOptions { cut, hq: true },
            ..ConvertOptions::default()
        };
        let payload = convert(&gray, &opts, true, true)?;
        self.target.send(&payload).await?;
        Ok(())
    }

    /// Print one single-product label.
    pub async fn print_single(&self, name: &str, cut: bool) -> anyhow::Result<()> {
        let img = self.render_single(name)?;
        self.send_image(&img, cut).await
    }

    /// Print one grid label.
    pub async fn print_grid(&self, products: &[String], cut: bool) -> anyhow::Result<()> {
        let img = self.render_grid(products)?;
        self.send_image(&img, cut).await
    }
}

/// Print a 1-based inclusive range of the catalog, one label per
/// product, prompting through the observer on failures.
pub async fn run_range(
    ctx: &PrintContext,
    products: &[String],
    start: Option<usize>,
    end: Option<usize>,
    delay: f64,
    no_cut: bool,
    observer: &mut dyn JobObserver,
) -> anyhow::Result<JobSummary> {
    let start_idx = start.map(|s| s.saturating_sub(1)).unwrap_or(0);
    let end_idx = end.unwrap_or(products.len()).min(products.len());
    let slice = products.get(start_idx..end_idx).unwrap_or(&[]);

    info!(
        count = slice.len(),
        from = start_idx + 1,
        to = end_idx,
        "printing product range"
    );
    if no_cut {
        warn!("continuous mode: labels will not be cut automatically");
    }

    let mut summary = JobSummary::default();
    for (i, name) in slice.iter().enumerate() {
        info!(product = %name, number = start_idx + i + 1, "printing label");
        match ctx.print_single(name, !no_cut).await {
            Ok(()) => {
                summary.printed += 1;
                if delay > 0.0 && i + 1 < slice.len() {
                    tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                }
            }
            Err(e) => {
                summary.errors += 1;
                error!(product = %name, error = %e, "label failed");
                if !observer.continue_after_error(name, &e.to_string()) {
                    summary.aborted = true;
                    break;
                }
            }
        }
    }

    info!(
        printed = summary.printed,
        errors = summary.errors,
        "range job finished"
    );
    Ok(summary)
}

/// Print the whole catalog as grid labels in resumable batches.
///
/// Within a batch, labels print continuously; the tape is cut only
/// after the last label of each batch. A checkpoint is written after
/// every completed batch and removed when the job finishes.
pub async fn run_batches(
    ctx: &PrintContext,
    csv_path: &Path,
    products: &[String],
    batch_size: usize,
    no_resume: bool,
    observer: &mut dyn JobObserver,
) -> anyhow::Result<JobSummary> {
    let plan = BatchPlan::new(products.len(), batch_size, ctx.columns, ctx.rows);
    let cp_path = checkpoint_path(csv_path);
    let saved = checkpoint::load(&cp_path);

    let start_batch = resume_start_batch(saved.as_ref(), no_resume, |cp| {
        observer.accept_resume(cp, &plan)
    });

    info!(
        total_products = plan.total_products,
        batch_size = plan.batch_size,
        total_batches = plan.total_batches(),
        start_batch = start_batch + 1,
        progress_file = %cp_path.display(),
        "batch printing job"
    );

    if start_batch == 0 && !observer.confirm_start(&plan) {
        info!("cancelled before printing");
        return Ok(JobSummary {
            aborted: true,
            ..JobSummary::default()
        });
    }

    let mut summary = JobSummary::default();
    for batch in start_batch..plan.total_batches() {
        let groups = plan.label_groups(batch);
        info!(
            batch = batch + 1,
            total = plan.total_batches(),
            labels = groups.len(),
            "starting batch"
        );

        for (i, group) in groups.iter().enumerate() {
            let cut_after = i + 1 == groups.len();
            let slice = &products[group.clone()];
            let what = format!("batch {} label {}", batch + 1, i + 1);

            match ctx.print_grid(slice, cut_after).await {
                Ok(()) => summary.printed += 1,
                Err(e) => {
                    summary.errors += 1;
                    error!(label = %what, error = %e, "label failed");
                    if !observer.continue_after_error(&what, &e.to_string()) {
                        summary.aborted = true;
                        info!(
                            resume_from = batch + 1,
                            "printing stopped; saved progress allows resume"
                        );
                        return Ok(summary);
                    }
                }
            }
        }

        let cp = Checkpoint::new(
            batch,
            plan.batch_range(batch).end - 1,
            plan.total_batches(),
            plan.batch_size,
        );
        if let Err(e) = checkpoint::save(&cp_path, &cp) {
            warn!(error = %e, "could not save progress, continuing without it");
        }
        info!(batch = batch + 1, "batch completed");
    }

    checkpoint::remove(&cp_path);
    info!(
        printed = summary.printed,
        errors = summary.errors,
        "all batches complete, progress file deleted"
    );
    Ok(summary)
}

/// Render single-label preview PNGs without printing.
pub fn generate_previews(
    ctx: &PrintContext,
    products: &[String],
    out_dir: &Path,
    count: usize,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut files = Vec::new();
    for (i, name) in products.iter().take(count).enumerate() {
        let img = ctx.render_single(name)?;
        let file = out_dir.join(format!("preview_{:03}.png", i + 1));
        img.save(&file)
            .with_context(|| format!("saving {}", file.display()))?;
        files.push(file);
    }
    info!(count = files.len(), dir = %out_dir.display(), "previews saved");
    Ok(files)
}

/// Render a stacked sheet of grid labels without printing.
pub fn generate_grid_preview(
    ctx: &PrintContext,
    products: &[String],
    num_labels: usize,
    out_file: &Path,
) -> anyhow::Result<()> {
    let per_label = (ctx.columns * ctx.rows) as usize;
    let mut labels = Vec::new();
    for chunk in products.chunks(per_label).take(num_labels) {
        labels.push(ctx.render_grid(chunk)?);
    }
    let sheet = preview_sheet(&labels);
    sheet
        .save(out_file)
        .with_context(|| format!("saving {}", out_file.display()))?;
    info!(labels = labels.len(), file = %out_file.display(), "grid preview saved");
    Ok(())
}
