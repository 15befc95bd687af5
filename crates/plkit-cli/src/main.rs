//! PLKit CLI - lay out and check stack manifests.

use clap::{Parser, Subcommand, ValueEnum};
use plkit_core::{Rect, Size};
use plkit_yaml::{LayoutReport, Manifest, ManifestError};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plkit")]
#[command(about = "Stack view layout from YAML manifests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a manifest and print every frame
    Layout {
        /// Path to manifest file
        manifest: PathBuf,

        /// Container width (overrides stack.bounds)
        #[arg(long, requires = "height")]
        width: Option<f32>,

        /// Container height (overrides stack.bounds)
        #[arg(long, requires = "width")]
        height: Option<f32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Check YAML manifest validity
    Check {
        /// Path to manifest file
        #[arg(default_value = "stack.yaml")]
        manifest: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to serialize layout report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Layout {
            manifest,
            width,
            height,
            format,
        } => run_layout(&manifest, width.zip(height), format),
        Commands::Check { manifest } => run_check(&manifest),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_bounds(manifest: &Manifest, size: Option<(f32, f32)>) -> Result<Rect, ManifestError> {
    if let Some((width, height)) = size {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(ManifestError::InvalidValue {
                field: "--width/--height".to_string(),
                message: "must be finite and non-negative".to_string(),
            });
        }
        return Ok(Rect::from_size(Size::new(width, height)));
    }
    manifest.bounds().ok_or(ManifestError::MissingBounds)
}

fn run_layout(
    path: &Path,
    size: Option<(f32, f32)>,
    format: Format,
) -> Result<String, CliError> {
    let manifest = Manifest::from_path(path)?;
    let bounds = resolve_bounds(&manifest, size)?;
    let mut built = manifest.build()?;
    let report = built.report(bounds);
    tracing::info!(children = report.children.len(), gaps = report.gaps.len(), "layout done");

    match format {
        Format::Text => Ok(render_text(&report)),
        Format::Json => render_json(&report),
    }
}

fn run_check(path: &Path) -> Result<String, CliError> {
    let manifest = Manifest::from_path(path)?;
    let hidden = manifest.stack.children.iter().filter(|c| c.hidden).count();
    let mut out = String::new();
    let _ = writeln!(out, "Manifest valid: {}", path.display());
    let _ = writeln!(out, "  Axis: {:?}", manifest.stack.axis);
    let _ = writeln!(out, "  Distribution: {:?}", manifest.stack.distribution);
    let _ = writeln!(out, "  Alignment: {:?}", manifest.stack.alignment);
    let _ = writeln!(
        out,
        "  Children: {} ({hidden} hidden)",
        manifest.stack.children.len()
    );
    Ok(out)
}

fn render_text(report: &LayoutReport) -> String {
    let mut out = String::new();
    let b = report.bounds;
    let _ = writeln!(out, "bounds {} x {} at ({}, {})", b.width, b.height, b.x, b.y);
    for child in &report.children {
        match child.frame {
            Some(f) => {
                let _ = writeln!(
                    out,
                    "{:<12} x={:<8} y={:<8} w={:<8} h={}",
                    child.name, f.x, f.y, f.width, f.height
                );
            }
            None if child.hidden => {
                let _ = writeln!(out, "{:<12} hidden", child.name);
            }
            None => {
                let _ = writeln!(out, "{:<12} unplaced", child.name);
            }
        }
    }
    for gap in &report.gaps {
        let _ = writeln!(
            out,
            "gap {} -> {} ({:?}) at ({}, {}) length {}",
            gap.after,
            gap.before,
            gap.role,
            gap.frame.x,
            gap.frame.y,
            gap.frame.width.max(gap.frame.height)
        );
    }
    let _ = writeln!(out, "intrinsic cross size {}", report.intrinsic_cross);
    out
}

fn render_json(report: &LayoutReport) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(report)? + "\n")
}
