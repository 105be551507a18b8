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

//! Free-text address geocoding against a Nominatim-style search endpoint.

use log::debug;
use serde::Deserialize;

use crate::MapsError;

/// Best-match result of a geocoding lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Formatted address as reported by the service.
    pub display_name: String,
}

/// Raw search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

/// Parse a search response body into the best-match place.
fn parse_search_response(body: &str) -> Result<GeocodedPlace, MapsError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| MapsError::Decode(e.to_string()))?;

    let hit = hits.into_iter().next().ok_or(MapsError::NoResults)?;

    let latitude = hit
        .lat
        .parse::<f64>()
        .map_err(|_| MapsError::Decode(format!("non-numeric latitude {:?}", hit.lat)))?;
    let longitude = hit
        .lon
        .parse::<f64>()
        .map_err(|_| MapsError::Decode(format!("non-numeric longitude {:?}", hit.lon)))?;

    Ok(GeocodedPlace {
        latitude,
        longitude,
        display_name: hit.display_name,
    })
}

/// Look up a free-text query and return the best match.
pub(crate) async fn geocode(
    http: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<GeocodedPlace, MapsError> {
    let url = format!("{}/search", base_url.trim_end_matches('/'));
    debug!("Geocoding {:?} via {}", query, url);

    let body = http
        .get(url)
        .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_search_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"[
        {
            "place_id": 114952,
            "lat": "43.6534733",
            "lon": "-79.3841201",
            "display_name": "100, Queen Street West, Toronto, Ontario, M5H 2N1, Canada"
        },
        {
            "place_id": 114953,
            "lat": "43.7",
            "lon": "-79.4",
            "display_name": "Somewhere else"
        }
    ]"#;

    #[test]
    fn test_parse_search_takes_best_match() {
        let place = parse_search_response(SEARCH_BODY).unwrap();
        assert!((place.latitude - 43.6534733).abs() < 1e-9);
        assert!((place.longitude - -79.3841201).abs() < 1e-9);
        assert!(place.display_name.starts_with("100, Queen Street West"));
    }

    #[test]
    fn test_parse_search_empty_is_no_results() {
        assert!(matches!(
            parse_search_response("[]"),
            Err(MapsError::NoResults)
        ));
    }

    #[test]
    fn test_parse_search_malformed_body() {
        assert!(matches!(
            parse_search_response("{\"unexpected\": true}"),
            Err(MapsError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_search_non_numeric_coordinates() {
        let body = r#"[{"lat": "abc", "lon": "-79.0", "display_name": "x"}]"#;
        assert!(matches!(
            parse_search_response(body),
            Err(MapsError::Decode(_))
        ));
    }
}
