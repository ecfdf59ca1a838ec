use axum::body::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::restaurant::{Location, PhotoReference, RestaurantDetail, RestaurantSummary};

pub const PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";

// Search is always biased to central Stockholm, whatever the caller asked for.
pub const STOCKHOLM_CENTER: (f64, f64) = (59.3293, 18.0686);
pub const SEARCH_RADIUS_METERS: f64 = 30_000.0;

pub const DEFAULT_QUERY: &str = "restaurants";
pub const DEFAULT_LIMIT: usize = 20;
pub const DEFAULT_PAGE: u32 = 1;

pub const LIST_PHOTO_WIDTH: u32 = 400;
pub const PREVIEW_PHOTO_WIDTH: u32 = 800;
pub const CAROUSEL_PHOTO_WIDTH: u32 = 1200;

const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
    places.rating,places.userRatingCount,places.photos,places.location,\
    places.currentOpeningHours.openNow";

const DETAILS_FIELD_MASK: &str = "id,displayName,formattedAddress,nationalPhoneNumber,\
    websiteUri,rating,regularOpeningHours.weekdayDescriptions,location,photos";

pub type Result<T> = std::result::Result<T, PlacesError>;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Places v1 search failed ({status}) {body}")]
    Search { status: u16, body: String },

    #[error("Place v1 details failed ({status}) {body}")]
    Details { status: u16, body: String },

    #[error("Photo v1 fetch failed ({status}) {body}")]
    Photo { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        PlacesError::Network(err.to_string())
    }
}

/// Fully buffered upstream photo response. The transport recomputes
/// content-length, so the header set is handed over untouched here.
pub struct PhotoPayload {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    text_query: String,
    location_bias: LocationBias,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationBias {
    circle: Circle,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Circle {
    center: LatLng,
    radius: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Place {
    id: String,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    user_rating_count: Option<u32>,
    location: Option<LatLng>,
    #[serde(default)]
    photos: Vec<PhotoResource>,
    current_opening_hours: Option<CurrentOpeningHours>,
}

#[derive(Deserialize, Debug)]
struct LocalizedText {
    text: String,
}

#[derive(Deserialize, Debug)]
struct PhotoResource {
    name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CurrentOpeningHours {
    open_now: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PlaceDetailsResponse {
    id: String,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    national_phone_number: Option<String>,
    website_uri: Option<String>,
    rating: Option<f64>,
    regular_opening_hours: Option<RegularOpeningHours>,
    location: Option<LatLng>,
    #[serde(default)]
    photos: Vec<PhotoResource>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RegularOpeningHours {
    #[serde(default)]
    weekday_descriptions: Vec<String>,
}

pub struct GooglePlacesRepo {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesRepo {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, PLACES_BASE_URL.to_string())
    }

    /// Constructor with an overridable upstream base URL so tests can point the
    /// repo at a local stand-in.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// Text search, always scoped to Stockholm. The upstream has no pagination
    /// cursor, so `page` is appended to the query text to vary the result set.
    pub async fn search_restaurants(
        &self,
        q: Option<&str>,
        limit: usize,
        page: u32,
    ) -> Result<Vec<RestaurantSummary>> {
        let request_body = SearchRequest {
            text_query: build_text_query(q, page),
            location_bias: LocationBias {
                circle: Circle {
                    center: LatLng {
                        latitude: STOCKHOLM_CENTER.0,
                        longitude: STOCKHOLM_CENTER.1,
                    },
                    radius: SEARCH_RADIUS_METERS,
                },
            },
        };

        let response = self
            .http_client
            .post(format!("{}/places:searchText", self.base_url))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Search {
                status: status.as_u16(),
                body,
            });
        }

        let search_response: SearchResponse = response.json().await?;
        Ok(map_search_response(search_response, limit))
    }

    /// Detail fetch for one place by its opaque identifier.
    pub async fn retrieve_restaurant_details(&self, place_id: &str) -> Result<RestaurantDetail> {
        let response = self
            .http_client
            .get(format!(
                "{}/places/{}",
                self.base_url,
                urlencoding::encode(place_id)
            ))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", DETAILS_FIELD_MASK)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Details {
                status: status.as_u16(),
                body,
            });
        }

        let details: PlaceDetailsResponse = response.json().await?;
        Ok(detail_from_place(details))
    }

    /// Photo passthrough. The media endpoint is the one upstream call that
    /// authenticates via a URL parameter instead of a header.
    pub async fn fetch_photo(&self, photo_name: &str, maxwidth: u32) -> Result<PhotoPayload> {
        let response = self
            .http_client
            .get(format!(
                "{}/{}/media?maxWidthPx={}&key={}",
                self.base_url, photo_name, maxwidth, self.api_key
            ))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Photo {
                status: status.as_u16(),
                body,
            });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(PhotoPayload {
            status,
            headers,
            body,
        })
    }
}

/// Proxy photo URL for an opaque upstream photo name at the given width.
pub fn photo_proxy_url(photo_name: &str, maxwidth: u32) -> String {
    format!(
        "/photos/v1/{}?maxwidth={}",
        urlencoding::encode(photo_name),
        maxwidth
    )
}

/// Upstream query text: append the page number for variety and scope to
/// Stockholm unless the caller's query already mentions it.
pub fn build_text_query(q: Option<&str>, page: u32) -> String {
    let q = q.unwrap_or(DEFAULT_QUERY);
    if q.to_lowercase().contains("stockholm") {
        format!("{q} page {page}")
    } else {
        format!("{q} in Stockholm page {page}")
    }
}

fn map_search_response(response: SearchResponse, limit: usize) -> Vec<RestaurantSummary> {
    let mut summaries: Vec<RestaurantSummary> = response
        .places
        .into_iter()
        .map(summarize_place)
        .collect();
    // Limit is a client-side cap applied after mapping, never sent upstream.
    summaries.truncate(limit);
    summaries
}

fn summarize_place(place: Place) -> RestaurantSummary {
    let photo_url = place
        .photos
        .first()
        .map(|photo| photo_proxy_url(&photo.name, LIST_PHOTO_WIDTH));

    RestaurantSummary {
        place_id: place.id,
        name: place
            .display_name
            .map(|name| name.text)
            .unwrap_or_else(|| "Unknown".to_string()),
        address: place.formatted_address,
        rating: place.rating,
        user_ratings_total: place.user_rating_count,
        photo_url,
        location: place.location.map(|l| Location {
            lat: l.latitude,
            lng: l.longitude,
        }),
        open_now: place
            .current_opening_hours
            .and_then(|hours| hours.open_now)
            .unwrap_or(false),
    }
}

fn detail_from_place(place: PlaceDetailsResponse) -> RestaurantDetail {
    let photos: Vec<PhotoReference> = place
        .photos
        .iter()
        .map(|photo| PhotoReference {
            name: photo.name.clone(),
            url: photo_proxy_url(&photo.name, CAROUSEL_PHOTO_WIDTH),
        })
        .collect();

    let photo_url = place
        .photos
        .first()
        .map(|photo| photo_proxy_url(&photo.name, PREVIEW_PHOTO_WIDTH));

    RestaurantDetail {
        place_id: place.id,
        name: place
            .display_name
            .map(|name| name.text)
            .unwrap_or_else(|| "Unknown".to_string()),
        address: place.formatted_address,
        phone: place.national_phone_number,
        website: place.website_uri,
        rating: place.rating,
        opening_hours: place
            .regular_opening_hours
            .map(|hours| hours.weekday_descriptions)
            .unwrap_or_default(),
        location: place.location.map(|l| Location {
            lat: l.latitude,
            lng: l.longitude,
        }),
        photo_url,
        photos,
    }
}
