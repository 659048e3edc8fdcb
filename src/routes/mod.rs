// HTTP routes and router assembly

pub mod affiliates;
pub mod date_ranges;

use axum::{
    http::{
        header::{HeaderName, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        Method,
    },
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::rainbet::RainbetClient;

/// State shared by every request; immutable after startup
#[derive(Debug, Clone)]
pub struct AppState {
    pub rainbet: RainbetClient,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static("x-requested-with"),
            CONTENT_TYPE,
            ACCEPT,
            AUTHORIZATION,
        ]);

    let api = Router::new()
        .route("/affiliates", get(affiliates::leaderboard_handler))
        .route("/date-ranges/:period", get(date_ranges::date_range_handler))
        .layer(cors);

    Router::new().nest("/api", api).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::{
        body::Body,
        extract::Query,
        http::{Request, StatusCode},
        response::IntoResponse,
        Json,
    };
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    const UNREACHABLE: &str = "http://127.0.0.1:1/affiliates";

    /// Serve a canned JSON upstream answer on an ephemeral port
    async fn spawn_upstream(status: StatusCode, body: Value) -> String {
        spawn_raw_upstream(status, body.to_string()).await
    }

    /// Serve a canned upstream body, sent as-is with a JSON content type
    async fn spawn_raw_upstream(status: StatusCode, body: String) -> String {
        let upstream = Router::new().route(
            "/affiliates",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let body = body.clone();
                async move {
                    if params.get("key").map(String::as_str) != Some("test-key")
                        || !params.contains_key("start_at")
                        || !params.contains_key("end_at")
                    {
                        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
                    }
                    (status, [(CONTENT_TYPE, "application/json")], body).into_response()
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });

        format!("http://{address}/affiliates")
    }

    fn app(base_url: &str) -> Router {
        build_router(AppState {
            rainbet: RainbetClient::new(reqwest::Client::new(), base_url, "test-key"),
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn date(value: &Value) -> NaiveDate {
        NaiveDate::parse_from_str(value.as_str().unwrap(), "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_upstream_payload() {
        let base = spawn_upstream(
            StatusCode::OK,
            json!({"affiliates": [
                {"affiliate_id": "a1", "username": "low", "wagered_amount": "100.50", "bet_count": 4},
                {"affiliate_id": "a2", "username": "high", "wagered_amount": "2500"},
                {"affiliate_id": "a3", "wagered_amount": "garbage"},
            ]}),
        )
        .await;

        let (status, body) = get_json(
            app(&base),
            "/api/affiliates?start_at=2025-10-20&end_at=2025-10-26&period=week",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["total"], json!(3));
        assert_eq!(body["period"], json!({"start_at": "2025-10-20", "end_at": "2025-10-26"}));

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["username"], json!("high"));
        assert_eq!(data[0]["rank"], json!(1));
        assert_eq!(data[1]["id"], json!("a1"));
        assert_eq!(data[1]["betCount"], json!(4));
        assert_eq!(data[2]["username"], json!("User3"));
        assert_eq!(data[2]["totalWagered"], json!(0.0));
        assert_eq!(data[2]["rank"], json!(3));
    }

    #[tokio::test]
    async fn test_leaderboard_empty_upstream() {
        let base = spawn_upstream(StatusCode::OK, json!({})).await;
        let (status, body) =
            get_json(app(&base), "/api/affiliates?start_at=2025-10-26&end_at=2025-10-26").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], json!(0));
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_leaderboard_period_only() {
        let base = spawn_upstream(StatusCode::OK, json!([])).await;
        let (status, body) = get_json(app(&base), "/api/affiliates?period=today").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"]["start_at"], body["period"]["end_at"]);
    }

    #[tokio::test]
    async fn test_leaderboard_rejects_bad_dates() {
        let (status, body) = get_json(
            app(UNREACHABLE),
            "/api/affiliates?start_at=2025/10/20&end_at=2025-10-26",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Invalid parameters"));
        assert_eq!(body["errors"][0]["field"], json!("start_at"));
    }

    #[tokio::test]
    async fn test_leaderboard_upstream_status_failure() {
        let base = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, json!({"error": "down"})).await;
        let (status, body) =
            get_json(app(&base), "/api/affiliates?start_at=2025-10-20&end_at=2025-10-26").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Failed to fetch affiliate data"));
        assert_eq!(body["error"], json!("Rainbet API error: 503 Service Unavailable"));
    }

    #[tokio::test]
    async fn test_leaderboard_upstream_status_without_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        let base = spawn_upstream(status, json!({})).await;
        let (status, body) =
            get_json(app(&base), "/api/affiliates?start_at=2025-10-20&end_at=2025-10-26").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], json!("Rainbet API error: 599"));
    }

    #[tokio::test]
    async fn test_leaderboard_upstream_invalid_json() {
        let base = spawn_raw_upstream(StatusCode::OK, "not json".to_string()).await;
        let (status, body) =
            get_json(app(&base), "/api/affiliates?start_at=2025-10-20&end_at=2025-10-26").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Failed to fetch affiliate data"));
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_leaderboard_upstream_unreachable() {
        let (status, body) = get_json(
            app(UNREACHABLE),
            "/api/affiliates?start_at=2025-10-20&end_at=2025-10-26",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_date_range_week() {
        let (status, body) = get_json(app(UNREACHABLE), "/api/date-ranges/week").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["period"], json!("week"));
        let span = date(&body["data"]["end_at"]) - date(&body["data"]["start_at"]);
        assert_eq!(span.num_days(), 6);
    }

    #[tokio::test]
    async fn test_date_range_invalid_period() {
        let (status, body) = get_json(app(UNREACHABLE), "/api/date-ranges/year").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(
            body["message"],
            json!("Invalid period. Use 'today', 'week', or 'month'")
        );
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let response = app(UNREACHABLE)
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/affiliates")
                    .header(ORIGIN, "https://example.com")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
