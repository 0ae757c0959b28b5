//! Command-line front end for the FLY3D container codec.
//!
//! Stands in for a slicer's save pipeline: takes a finished G-code
//! file plus a preview image and bundles them into a `.fly3d`
//! container, and can inspect or unpack existing containers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "fly3d-pack")]
#[command(about = "Bundle G-code and an RGB565 preview into a FLY3D container", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a G-code file and a preview image into a .fly3d container.
    /// The G-code file is removed after a successful pack.
    Pack {
        /// Finished G-code file to embed
        gcode: PathBuf,
        /// Preview image (any format the image crate reads); resampled
        /// to 240x240 before packing
        #[arg(short, long)]
        thumbnail: PathBuf,
    },
    /// Display the address table of a .fly3d container
    Info {
        /// Path to the container
        file: PathBuf,
    },
    /// Extract the preview and/or G-code from a .fly3d container
    Extract {
        /// Path to the container
        file: PathBuf,
        /// Write the preview image here (PNG)
        #[arg(long)]
        thumbnail: Option<PathBuf>,
        /// Write the embedded G-code here
        #[arg(long)]
        gcode: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    lib_fly3d::init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Pack { gcode, thumbnail } => {
            let output = commands::pack(&gcode, &thumbnail)?;
            println!("Saved to {}", output.display());
        }
        Commands::Info { file } => {
            commands::info(&file)?;
        }
        Commands::Extract {
            file,
            thumbnail,
            gcode,
        } => {
            commands::extract(&file, thumbnail.as_deref(), gcode.as_deref())?;
        }
    }

    Ok(())
}
