//! viewgen command-line front end.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use viewgen::{Generator, Options, Verbatim};

#[derive(Parser)]
#[command(name = "viewgen")]
#[command(version, about = "Compile HTML views into Go DOM construction code", long_about = None)]
struct Cli {
    /// View files, or directories searched for *.html files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Go package name of the generated views file
    #[arg(short, long)]
    package: Option<String>,

    /// Directory that `/`-prefixed include paths resolve against
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// TOML file with `package` and `root` keys; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the views here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write the extracted stylesheet here
    #[arg(long)]
    css: Option<PathBuf>,

    /// Skip gofmt and emit the views as generated
    #[arg(long)]
    no_gofmt: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut opts = match &cli.config {
        Some(path) => Options::from_toml_file(path)?,
        None => Options::default(),
    };
    if let Some(package) = cli.package {
        opts.package = package;
    }
    if let Some(root) = cli.root {
        opts.root = root;
    }

    let inputs = discover(&cli.inputs)?;
    tracing::debug!(count = inputs.len(), package = %opts.package, "discovered views");

    let generator = Generator::new(opts);
    let generator = if cli.no_gofmt {
        generator.with_formatter(Verbatim)
    } else {
        generator
    };
    let output = generator.run(&inputs)?;

    match &cli.out {
        Some(path) => fs::write(path, &output.views)
            .with_context(|| format!("Failed to write views: {}", path.display()))?,
        None => io::stdout()
            .lock()
            .write_all(&output.views)
            .context("Failed to write views to stdout")?,
    }
    if let Some(path) = &cli.css {
        fs::write(path, &output.stylesheet)
            .with_context(|| format!("Failed to write stylesheet: {}", path.display()))?;
    }

    Ok(())
}

/// Expand directories into their `*.html` files, sorted per directory.
/// Plain file arguments are kept as given.
fn discover(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_html_files(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn find_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
