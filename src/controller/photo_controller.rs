use std::sync::Arc;
use axum::{Extension, Router};
use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::routing::get;
use reqwest::header::CONTENT_LENGTH;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use crate::controller::AppState;
use crate::repositories::google_places_repo::{GooglePlacesRepo, LIST_PHOTO_WIDTH};

pub fn router(app_state: AppState) -> Router {
    let places_repo = Arc::new(GooglePlacesRepo::with_base_url(
        app_state.config.google_maps_api_key,
        app_state.config.places_base_url,
    ));

    Router::new()
        .route("/v1/*photo_name", get(fetch_photo))
        .route_layer(Extension(places_repo))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PhotoParam {
    pub maxwidth: Option<u32>,
}

/// The wildcard capture is percent-decoded by the router, so `photo_name`
/// arrives as the original opaque upstream name.
pub async fn fetch_photo(
    Extension(places_repo): Extension<Arc<GooglePlacesRepo>>,
    Path(photo_name): Path<String>,
    Query(query): Query<PhotoParam>,
) -> impl IntoResponse {
    let photo_res = places_repo
        .fetch_photo(&photo_name, query.maxwidth.unwrap_or(LIST_PHOTO_WIDTH))
        .await;

    return match photo_res {
        Ok(photo) => {
            let mut headers = photo.headers;
            // The body is re-buffered, so the transport recomputes the length.
            headers.remove(CONTENT_LENGTH);
            (photo.status, headers, photo.body).into_response()
        }
        Err(e) => {
            warn!("Something went wrong fetching photo due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }).to_string()
            ).into_response()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Uri};
    use std::net::SocketAddr;
    use tower::ServiceExt;
    use crate::config::Config;

    async fn serve_upstream(app: Router) -> SocketAddr {
        let server = axum::Server::bind(&"127.0.0.1:0".parse().unwrap())
            .serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        addr
    }

    fn state_for(addr: SocketAddr) -> AppState {
        AppState {
            config: Config {
                google_maps_api_key: "test-key".to_string(),
                port: 4000,
                origin_urls: "http://localhost:5173".to_string(),
                places_base_url: format!("http://{addr}"),
            },
        }
    }

    fn echo_upstream() -> Router {
        Router::new().fallback(|uri: Uri| async move {
            ([("x-upstream-tag", "photo-stub")], uri.to_string())
        })
    }

    #[tokio::test]
    async fn wildcard_capture_hands_the_upstream_the_decoded_photo_name() {
        let addr = serve_upstream(echo_upstream()).await;

        let response = router(state_for(addr))
            .oneshot(
                Request::builder()
                    .uri("/v1/places%2Fabc%2Fphotos%2Fdef-123?maxwidth=77")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // Upstream headers come back through the proxy.
        assert_eq!(
            response.headers().get("x-upstream-tag").unwrap(),
            "photo-stub"
        );
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(
            &body[..],
            b"/places/abc/photos/def-123/media?maxWidthPx=77&key=test-key"
        );
    }

    #[tokio::test]
    async fn photo_fetch_defaults_to_the_list_width() {
        let addr = serve_upstream(echo_upstream()).await;

        let response = router(state_for(addr))
            .oneshot(
                Request::builder()
                    .uri("/v1/places%2Fa%2Fphotos%2Fb")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(
            &body[..],
            b"/places/a/photos/b/media?maxWidthPx=400&key=test-key"
        );
    }

    #[tokio::test]
    async fn upstream_failure_on_photo_becomes_a_500_error_envelope() {
        let upstream = Router::new()
            .fallback(|| async { (StatusCode::FORBIDDEN, "PERMISSION_DENIED") });
        let addr = serve_upstream(upstream).await;

        let response = router(state_for(addr))
            .oneshot(
                Request::builder()
                    .uri("/v1/places%2Fa%2Fphotos%2Fb?maxwidth=400")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("Photo v1 fetch failed (403)"));
    }
}
