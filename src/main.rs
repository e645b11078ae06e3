use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use static_report::{demo, ReportManifest};

#[derive(Parser)]
#[command(name = "static-report")]
#[command(author, version, about = "Render dashboards to a single self-contained static HTML file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a report manifest to a static HTML file
    Render {
        /// Path to the JSON report manifest
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Output HTML file path (default: <manifest>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extra stylesheet appended after the manifest's own CSS
        #[arg(long)]
        css: Option<PathBuf>,
    },

    /// Write the bundled sample sales dashboard
    Demo {
        /// Output HTML file path
        #[arg(short, long, default_value = "sample-report.html")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { manifest, output, css } => {
            let spec = ReportManifest::load(&manifest)
                .with_context(|| format!("loading manifest {}", manifest.display()))?;

            let base_dir = manifest.parent().unwrap_or_else(|| Path::new("."));
            let mut report = spec.build_report(base_dir)?;

            if let Some(css_path) = css {
                let extra = fs::read_to_string(&css_path)
                    .with_context(|| format!("reading stylesheet {}", css_path.display()))?;
                report.append_css(&extra);
            }

            let output_path = output.unwrap_or_else(|| {
                let mut path = manifest.clone();
                path.set_extension("html");
                path
            });

            fs::write(&output_path, report.render_bytes())?;
            println!("Report written to: {}", output_path.display());
        }

        Commands::Demo { output } => {
            let report = demo::sample_report()?;
            fs::write(&output, report.render_bytes())?;
            println!("Sample report written to: {}", output.display());
        }
    }

    Ok(())
}
