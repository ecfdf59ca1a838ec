use std::net::SocketAddr;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;

pub mod health_check;
pub mod photo_controller;
pub mod restaurant_controller;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let origins: Vec<HeaderValue> = config
        .origin_urls
        .split(',')
        .map(|s| s.parse().unwrap())
        .collect::<Vec<HeaderValue>>();

    let app_state = AppState {
        config: config.clone(),
    };

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::OPTIONS])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
        )
        .fallback(page_not_found_handler);

    let port = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("API server listening on port: {}", port);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router()
        .nest("/restaurants", restaurant_controller::router(app_state.clone()))
        .nest("/photos", photo_controller::router(app_state))
}
