//! Tests for the conversion API handlers.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::Extension,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use converter::SvgConverter;
use tower::ServiceExt;

use conversion_api::handlers::{
    convert_svg_to_webp_handler, health_handler, metrics_handler, ConversionRequest,
};
use conversion_api::state::AppState;
use conversion_api::{create_router, CONVERSION_ROUTE};

// ============================================================================
// Helper functions
// ============================================================================

const BADGE_SVG: &str = r##"<svg width="120" height="40" xmlns="http://www.w3.org/2000/svg">
  <rect width="120" height="40" rx="6" fill="#2ecc71"/>
  <circle cx="20" cy="20" r="8" fill="#ffffff"/>
</svg>"##;

fn test_state() -> Arc<AppState> {
    let converter = SvgConverter::with_fontdb(Arc::new(usvg::fontdb::Database::new()));
    Arc::new(AppState::with_converter(converter, None))
}

fn request(svg: &str) -> ConversionRequest {
    ConversionRequest {
        svg_content: Some(svg.to_string()),
        ..Default::default()
    }
}

async fn call(request: ConversionRequest) -> Response {
    convert_svg_to_webp_handler(Extension(test_state()), Json(request)).await
}

/// Send a raw JSON body through the full router.
async fn post_json(body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(CONVERSION_ROUTE)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    create_router(test_state()).oneshot(request).await.unwrap()
}

async fn body_bytes(resp: Response) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()
}

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn test_convert_returns_webp() {
    let resp = call(request(BADGE_SVG)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/webp"
    );

    let body = body_bytes(resp).await;
    assert_eq!(&body[0..4], b"RIFF");
    assert_eq!(&body[8..12], b"WEBP");
}

#[tokio::test]
async fn test_default_scale_renders_at_four_times() {
    let body = body_bytes(call(request(BADGE_SVG)).await).await;

    // 120x40 at the default scale of 4, height clamped to 400
    let decoded = webp::Decoder::new(&body).decode().unwrap();
    assert_eq!((decoded.width(), decoded.height()), (480, 400));
}

#[tokio::test]
async fn test_lossy_request() {
    let mut req = request(BADGE_SVG);
    req.quality = Some(60);
    req.lossless = Some(false);
    req.scale_factor = Some(1.0);

    let resp = call(req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_empty_svg_content_is_bad_request() {
    let resp = call(request("")).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_bytes(resp).await;
    assert_eq!(String::from_utf8(body).unwrap(), "SVG content is required");
}

#[tokio::test]
async fn test_missing_or_null_svg_content_is_bad_request() {
    for body in [r#"{}"#, r#"{"svgContent":null}"#, r#"{"svgContent":""}"#] {
        let resp = post_json(body).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);
        let message = String::from_utf8(body_bytes(resp).await).unwrap();
        assert_eq!(message, "SVG content is required");
    }
}

#[tokio::test]
async fn test_out_of_range_quality_is_bad_request() {
    let mut req = request(BADGE_SVG);
    req.quality = Some(150);

    let resp = call(req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Conversion failures
// ============================================================================

#[tokio::test]
async fn test_malformed_svg_is_server_error() {
    let resp = call(request("<svg><g>")).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(message.starts_with("Error converting image: "), "{}", message);
}

#[tokio::test]
async fn test_oversized_scale_is_server_error() {
    let resp = post_json(&format!(
        r#"{{"svgContent":{},"scaleFactor":1000}}"#,
        serde_json::to_string(BADGE_SVG).unwrap()
    ))
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(message.contains("120000x40000"), "{}", message);

    // the service keeps answering after the rejected request
    let resp = post_json(&format!(
        r#"{{"svgContent":{}}}"#,
        serde_json::to_string(BADGE_SVG).unwrap()
    ))
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_document_is_server_error() {
    let svg = r#"<svg width="10" height="10" xmlns="http://www.w3.org/2000/svg"/>"#;
    let resp = call(request(svg)).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(message.contains("SVG has no dimensions"), "{}", message);
}

// ============================================================================
// Health and metrics
// ============================================================================

#[tokio::test]
async fn test_health() {
    let resp = health_handler().await.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let resp = metrics_handler(Extension(test_state())).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
