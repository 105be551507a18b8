// Copyright 2025 ClinicMap Desktop contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Driving distance/duration estimates and route geometry from an
//! OSRM-style routing endpoint.
//!
//! The service reports an overall status code string; anything other than
//! `"Ok"` is surfaced as [`MapsError::Status`].

use log::debug;
use serde::Deserialize;

use crate::MapsError;

/// Driving distance and duration between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommuteEstimate {
    /// Route distance in meters.
    pub distance_meters: f64,

    /// Expected travel time in seconds.
    pub duration_seconds: f64,
}

impl CommuteEstimate {
    /// Human-readable distance, e.g. `"850 m"` or `"12.3 km"`.
    #[must_use]
    pub fn distance_text(&self) -> String {
        if self.distance_meters < 1000.0 {
            format!("{:.0} m", self.distance_meters)
        } else {
            format!("{:.1} km", self.distance_meters / 1000.0)
        }
    }

    /// Human-readable duration, e.g. `"23 min"` or `"1 hr 5 min"`.
    #[must_use]
    pub fn duration_text(&self) -> String {
        let minutes = (self.duration_seconds / 60.0).round().max(1.0) as u64;
        if minutes < 60 {
            format!("{minutes} min")
        } else {
            format!("{} hr {} min", minutes / 60, minutes % 60)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    distance: f64,
    duration: f64,
    geometry: Option<Geometry>,
}

/// GeoJSON LineString geometry; coordinates are `[lng, lat]` pairs.
#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

fn best_route(body: &str) -> Result<Route, MapsError> {
    let response: RouteResponse =
        serde_json::from_str(body).map_err(|e| MapsError::Decode(e.to_string()))?;

    if response.code != "Ok" {
        return Err(MapsError::Status(response.code));
    }

    response.routes.into_iter().next().ok_or(MapsError::NoResults)
}

fn parse_commute_response(body: &str) -> Result<CommuteEstimate, MapsError> {
    let route = best_route(body)?;
    Ok(CommuteEstimate {
        distance_meters: route.distance,
        duration_seconds: route.duration,
    })
}

fn parse_route_response(body: &str) -> Result<Vec<(f64, f64)>, MapsError> {
    let route = best_route(body)?;
    let geometry = route
        .geometry
        .ok_or_else(|| MapsError::Decode("route has no geometry".to_string()))?;

    Ok(geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| (lat, lng))
        .collect())
}

/// Coordinates in the URL path use `lng,lat;lng,lat` order.
fn route_url(base_url: &str, origin: (f64, f64), destination: (f64, f64)) -> String {
    format!(
        "{}/route/v1/driving/{},{};{},{}",
        base_url.trim_end_matches('/'),
        origin.1,
        origin.0,
        destination.1,
        destination.0
    )
}

pub(crate) async fn commute(
    http: &reqwest::Client,
    base_url: &str,
    origin: (f64, f64),
    destination: (f64, f64),
) -> Result<CommuteEstimate, MapsError> {
    let url = route_url(base_url, origin, destination);
    debug!("Requesting commute estimate from {}", url);

    let body = http
        .get(url)
        .query(&[("overview", "false")])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_commute_response(&body)
}

pub(crate) async fn route(
    http: &reqwest::Client,
    base_url: &str,
    origin: (f64, f64),
    destination: (f64, f64),
) -> Result<Vec<(f64, f64)>, MapsError> {
    let url = route_url(base_url, origin, destination);
    debug!("Requesting route geometry from {}", url);

    let body = http
        .get(url)
        .query(&[("overview", "full"), ("geometries", "geojson")])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_route_response(&body)
}
