use std::sync::Arc;
use axum::{Extension, Router};
use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::routing::get;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use crate::controller::AppState;
use crate::models::restaurant::RestaurantSummary;
use crate::repositories::google_places_repo::{GooglePlacesRepo, DEFAULT_LIMIT, DEFAULT_PAGE};

pub fn router(app_state: AppState) -> Router {
    let places_repo = Arc::new(GooglePlacesRepo::with_base_url(
        app_state.config.google_maps_api_key,
        app_state.config.places_base_url,
    ));

    Router::new()
        .route("/", get(search_restaurants))
        .route("/:place_id", get(retrieve_restaurant_details))
        .route_layer(Extension(places_repo))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchRestaurantsParam {
    pub q: Option<String>,
    pub limit: Option<usize>,
    pub page: Option<u32>,
    #[serde(rename = "minRating")]
    pub min_rating: Option<f64>,
    // Accepted but unused: the upstream bias is fixed to a 30 km circle.
    pub radius: Option<f64>,
}

pub async fn search_restaurants(
    Extension(places_repo): Extension<Arc<GooglePlacesRepo>>,
    Query(query): Query<SearchRestaurantsParam>,
) -> impl IntoResponse {
    let search_res = places_repo
        .search_restaurants(
            query.q.as_deref(),
            query.limit.unwrap_or(DEFAULT_LIMIT),
            query.page.unwrap_or(DEFAULT_PAGE),
        ).await;

    return match search_res {
        Ok(restaurants) => {
            let restaurants = apply_min_rating(restaurants, query.min_rating);
            (
                StatusCode::OK,
                json!(&restaurants).to_string()
            ).into_response()
        }
        Err(e) => {
            warn!("Something went wrong searching for restaurants due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }).to_string()
            ).into_response()
        }
    };
}

pub async fn retrieve_restaurant_details(
    Extension(places_repo): Extension<Arc<GooglePlacesRepo>>,
    Path(place_id): Path<String>,
) -> impl IntoResponse {
    let details_res = places_repo
        .retrieve_restaurant_details(&place_id)
        .await;

    return match details_res {
        Ok(details) => {
            (
                StatusCode::OK,
                json!(&details).to_string()
            ).into_response()
        }
        Err(e) => {
            warn!("Something went wrong retrieving restaurant details due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": e.to_string(),
                    "hint": "Check billing, Places API (New) enabled, and key restrictions."
                }).to_string()
            ).into_response()
        }
    };
}

/// Server-side minimum-rating filter; an absent rating counts as 0.
pub fn apply_min_rating(
    restaurants: Vec<RestaurantSummary>,
    min_rating: Option<f64>,
) -> Vec<RestaurantSummary> {
    match min_rating {
        Some(min_rating) => restaurants
            .into_iter()
            .filter(|r| r.rating.unwrap_or(0.0) >= min_rating)
            .collect(),
        None => restaurants,
    }
}
