// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Interactive map page using Leaflet and OpenStreetMap tiles, both loaded
//! from the network when the page is opened.

use serde_json::{Value, json};

use super::RouteRenderer;
use crate::itinerary::Itinerary;

/// Popup date format, e.g. `15/03/2024 10:30`.
const POPUP_DATETIME_FMT: &str = "%d/%m/%Y %H:%M";

const ROUTE_COLOR: &str = "#173DED";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Itinerary</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
const points = __POINTS__;
const route = points.map((p) => [p.latitude, p.longitude]);
const map = L.map("map");
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors",
}).addTo(map);
L.polyline(route, __ROUTE_STYLE__).addTo(map);
for (const p of points) {
  const popup = document.createElement("div");
  popup.style.fontFamily = "Arial, sans-serif";
  const title = document.createElement("b");
  title.textContent = "Point " + p.number;
  popup.appendChild(title);
  for (const line of [p.filename, p.time, p.position]) {
    if (!line) continue;
    popup.appendChild(document.createElement("br"));
    const small = document.createElement("small");
    small.textContent = line;
    popup.appendChild(small);
  }
  L.circleMarker([p.latitude, p.longitude], {
    radius: 9,
    color: p.color,
    fillColor: p.color,
    fillOpacity: 0.9,
  })
    .bindTooltip(p.tooltip)
    .bindPopup(popup, { maxWidth: 300 })
    .addTo(map);
}
map.fitBounds(route);
</script>
</body>
</html>
"#;

/// Start is green, end red, everything between blue.
pub struct HtmlRenderer;

impl RouteRenderer for HtmlRenderer {
  fn file_name(&self) -> &'static str {
    "route_map.html"
  }

  fn render(&self, itinerary: &Itinerary) -> String {
    let last = itinerary.len().saturating_sub(1);

    let points = itinerary
      .points()
      .iter()
      .enumerate()
      .map(|(i, p)| {
        let number = i + 1;
        let (color, tooltip) = match i {
          0 => ("green", format!("Start: {}", p.filename)),
          i if i == last => ("red", format!("End: {}", p.filename)),
          _ => ("blue", format!("Point {number}: {}", p.filename)),
        };

        json!({
          "number": number,
          "filename": p.filename,
          "latitude": p.latitude,
          "longitude": p.longitude,
          "time": p.timestamp.map(|t| t.format(POPUP_DATETIME_FMT).to_string()),
          "position": p.coordinate().to_string(),
          "color": color,
          "tooltip": tooltip,
        })
      })
      .collect::<Value>();

    let route_style = json!({ "color": ROUTE_COLOR, "weight": 4, "opacity": 0.8 });

    TEMPLATE
      .replace("__POINTS__", &script_safe(&points))
      .replace("__ROUTE_STYLE__", &script_safe(&route_style))
  }
}

/// Serializes `value` for embedding inside a `<script>` element, where a
/// literal `</` (e.g. from a file name) would end the script early.
fn script_safe(value: &Value) -> String {
  value.to_string().replace("</", "<\\/")
}
