// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Route output formats.

mod geojson;
mod html;

use std::{fs, path::Path};

pub use geojson::GeoJsonRenderer;
pub use html::HtmlRenderer;

use crate::{io, itinerary::Itinerary};

/// Turns an ordered route into a document.
pub trait RouteRenderer {
  /// Default output file name.
  fn file_name(&self) -> &'static str;

  fn render(&self, itinerary: &Itinerary) -> String;
}

/// Which `RouteRenderer` to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderFormat {
  /// Interactive Leaflet map.
  #[default]
  Html,
  /// GeoJSON feature collection.
  Geojson,
}

impl RenderFormat {
  pub fn renderer(self) -> Box<dyn RouteRenderer> {
    match self {
      RenderFormat::Html => Box::new(HtmlRenderer),
      RenderFormat::Geojson => Box::new(GeoJsonRenderer),
    }
  }
}

/// Renders `itinerary` into `output`, creating its directory if needed.
pub fn write_route(
  renderer: &dyn RouteRenderer,
  itinerary: &Itinerary,
  output: &Path,
) -> Result<(), String> {
  if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
    io::ensure_dir(dir)?;
  }

  fs::write(output, renderer.render(itinerary))
    .map_err(|e| format!("{}: Failed to write route ({e}).", output.display()))?;

  log::info!(
    "{}: Route with {} points written.",
    output.display(),
    itinerary.len()
  );

  Ok(())
}
