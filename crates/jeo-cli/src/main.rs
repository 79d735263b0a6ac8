//! jeo CLI - converts between 2D DXF drawings and indexed .jeo models.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jeo")]
#[command(about = "Converts 2D DXF drawings to and from Geometric JSON .jeo files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DXF drawing to a .jeo model
    Import {
        /// Input DXF file path
        input: PathBuf,
        /// Output .jeo file path
        output: PathBuf,
    },
    /// Convert a .jeo model back to a DXF drawing
    Export {
        /// Input .jeo file path
        input: PathBuf,
        /// Output DXF file path
        output: PathBuf,
    },
    /// Display information about a .jeo file
    Info {
        /// Path to the .jeo file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import { input, output } => import_dxf(&input, &output),
        Commands::Export { input, output } => export_dxf(&input, &output),
        Commands::Info { file } => show_info(&file),
    }
}

fn import_dxf(input: &Path, output: &Path) -> Result<()> {
    check_input(input)?;
    prepare_output(output)?;

    let drawing = jeo_dxf::read_file(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let model = jeo_convert::drawing_to_model(&drawing)?;
    jeo_format::json::write_file(&model, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Imported {} lines, {} arcs, {} polylines to {}",
        model.lines.len(),
        model.arcs.len(),
        model.polylines.len(),
        output.display()
    );
    Ok(())
}

fn export_dxf(input: &Path, output: &Path) -> Result<()> {
    check_input(input)?;
    prepare_output(output)?;

    let model = jeo_format::json::read_file(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let drawing = jeo_convert::model_to_drawing(&model)?;
    jeo_dxf::write_file(&drawing, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Exported {} lines, {} arcs, {} polylines to {}",
        drawing.lines.len(),
        drawing.arcs.len(),
        drawing.polylines.len(),
        output.display()
    );
    Ok(())
}

fn show_info(file: &Path) -> Result<()> {
    check_input(file)?;
    let model = jeo_format::json::read_file(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    println!("jeo model: {}", file.display());
    println!(
        "  Version: {}.{}",
        jeo_format::json::VERSION.major,
        jeo_format::json::VERSION.minor
    );
    println!("  Points: {}", model.points.len());
    println!("  Colors: {}", model.colors.len());
    println!("  Tags: {}", model.tags.len());
    println!("  Lines: {}", model.lines.len());
    println!("  Arcs: {}", model.arcs.len());
    println!("  Polylines: {}", model.polylines.len());
    Ok(())
}

fn check_input(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("input file is not a regular file: {}", path.display());
    }
    Ok(())
}

fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}
