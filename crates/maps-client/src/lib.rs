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

//! Client library for the external mapping services used by ClinicMap Desktop.
//!
//! Two concerns are covered, each in its own layer:
//!
//! - **Geocoding layer**: free-text address search against a Nominatim-style
//!   endpoint, returning a best-match location and formatted address
//! - **Routing layer**: driving distance/duration estimates and full route
//!   geometry from an OSRM-style endpoint
//!
//! All calls are plain async request/response with no retry policy. A failed
//! call returns a [`MapsError`] and is never reattempted automatically.
//!
//! # Quick Start
//!
//! ```no_run
//! use maps_client::{ClientConfig, MapsClient};
//!
//! # async fn example() -> Result<(), maps_client::MapsError> {
//! let client = MapsClient::new(ClientConfig::default())?;
//!
//! let place = client.geocode("100 Queen St W, Toronto").await?;
//! let commute = client
//!     .commute((place.latitude, place.longitude), (43.6629, -79.3957))
//!     .await?;
//! println!("{} away, about {}", commute.distance_text(), commute.duration_text());
//! # Ok(())
//! # }
//! ```

pub mod geocoding;
pub mod routing;

pub use geocoding::GeocodedPlace;
pub use routing::CommuteEstimate;

use thiserror::Error;

/// Errors returned by the mapping service client.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Transport-level failure (connection, timeout, non-2xx status).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered but reported a non-OK status code string.
    #[error("service returned status \"{0}\"")]
    Status(String),

    /// The service answered OK but with an empty result set.
    #[error("no results for query")]
    NoResults,

    /// The service answered with a body we could not interpret.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Endpoint configuration for the mapping services.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Nominatim-style geocoding service.
    pub geocoding_url: String,

    /// Base URL of the OSRM-style routing service.
    pub routing_url: String,

    /// User-Agent header value. Public Nominatim instances require one.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://nominatim.openstreetmap.org".to_string(),
            routing_url: "https://router.project-osrm.org".to_string(),
            user_agent: concat!("clinicmap-desktop/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Client for geocoding and routing lookups.
///
/// Cheap to clone behind an `Arc`; holds a single pooled HTTP client.
#[derive(Debug)]
pub struct MapsClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl MapsClient {
    /// Create a new client with the given endpoint configuration.
    pub fn new(config: ClientConfig) -> Result<Self, MapsError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    /// Resolve a free-text address to a location and formatted address.
    pub async fn geocode(&self, query: &str) -> Result<GeocodedPlace, MapsError> {
        geocoding::geocode(&self.http, &self.config.geocoding_url, query).await
    }

    /// Get a driving distance/duration estimate between two `(lat, lng)` points.
    pub async fn commute(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Result<CommuteEstimate, MapsError> {
        routing::commute(&self.http, &self.config.routing_url, origin, destination).await
    }

    /// Get the driving route geometry between two `(lat, lng)` points.
    ///
    /// Returned points are `(lat, lng)` pairs in travel order.
    pub async fn route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Result<Vec<(f64, f64)>, MapsError> {
        routing::route(&self.http, &self.config.routing_url, origin, destination).await
    }
}
