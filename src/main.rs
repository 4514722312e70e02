// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Maps a set of photos to the route they were taken along, using the GPS
//! position and capture time in their EXIF metadata.

mod commands;
mod config;
mod io;
mod itinerary;
mod prim;
mod render;
mod setup;
#[cfg(test)]
mod testing;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::{config::Config, io::ReaderKind, prim::MissingTimestamps, render::RenderFormat};

#[derive(Parser)]
#[command(version, about)]
struct Args {
  /// Config file. Default: `$XDG_CONFIG_HOME/photo_itinerary/config.json`.
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Metadata reader. Overrides the config.
  #[arg(long, value_enum, global = true)]
  reader: Option<ReaderKind>,

  /// Verbosity level. Max: 2.
  #[arg(short, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build a route from photos and write it out.
  Route {
    /// Image files, or directories to take images from (not recursive).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file. Default: the format's file name under the config's
    /// `output_dir`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t)]
    format: RenderFormat,

    /// Where photos without a capture time go. Overrides the config.
    #[arg(long, value_enum)]
    missing_timestamps: Option<MissingTimestamps>,

    /// Fewest images to build a route from. Overrides the config.
    #[arg(long)]
    min_images: Option<usize>,
  },
  /// Print one photo's metadata and route point.
  Inspect { path: PathBuf },
}

fn main() {
  let args = Args::parse();
  setup::configure_logging(args.verbose);

  if let Err(e) = run(args) {
    log::error!("{e}");
    std::process::exit(1);
  }
}

fn run(args: Args) -> Result<(), String> {
  let mut config = Config::load(args.config.as_deref())?;
  if let Some(reader) = args.reader {
    config.reader = reader;
  }

  match args.command {
    Commands::Route {
      inputs,
      output,
      format,
      missing_timestamps,
      min_images,
    } => {
      if let Some(missing_timestamps) = missing_timestamps {
        config.missing_timestamps = missing_timestamps;
      }
      if let Some(min_images) = min_images {
        config.min_images = min_images;
      }

      commands::route(&config, &inputs, output.as_deref(), format)
    }
    Commands::Inspect { path } => commands::inspect(&config, &path),
  }
}
