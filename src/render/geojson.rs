// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! GeoJSON (RFC 7946) output: one `Point` per photo plus the `LineString`
//! joining them.

use serde_json::json;

use super::RouteRenderer;
use crate::{itinerary::Itinerary, prim::POINT_DATETIME_FMT};

pub struct GeoJsonRenderer;

impl RouteRenderer for GeoJsonRenderer {
  fn file_name(&self) -> &'static str {
    "route.geojson"
  }

  fn render(&self, itinerary: &Itinerary) -> String {
    // GeoJSON positions are longitude first.
    let positions = itinerary
      .points()
      .iter()
      .map(|p| json!([p.longitude, p.latitude]))
      .collect::<Vec<_>>();

    let mut features = itinerary
      .points()
      .iter()
      .zip(&positions)
      .enumerate()
      .map(|(i, (p, position))| {
        json!({
          "type": "Feature",
          "geometry": { "type": "Point", "coordinates": position },
          "properties": {
            "number": i + 1,
            "filename": p.filename,
            "timestamp": p.timestamp.map(|t| t.format(POINT_DATETIME_FMT).to_string()),
          },
        })
      })
      .collect::<Vec<_>>();

    features.push(json!({
      "type": "Feature",
      "geometry": { "type": "LineString", "coordinates": positions },
      "properties": { "name": "route" },
    }));

    let collection = json!({ "type": "FeatureCollection", "features": features });

    format!("{collection:#}\n")
  }
}
