//! POST /api/conversion/svg-to-webp

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use converter::pipeline::{DEFAULT_QUALITY, DEFAULT_SCALE_FACTOR};
use converter::ConversionOptions;
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// JSON body of a conversion request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    /// Inline SVG document text; absent and `null` both count as empty
    #[serde(default)]
    pub svg_content: Option<String>,
    /// Encoder quality, 0-100 (default 100)
    pub quality: Option<i64>,
    /// Lossless encoding (default true)
    pub lossless: Option<bool>,
    /// Render scale factor (default 4.0)
    pub scale_factor: Option<f32>,
}

impl ConversionRequest {
    /// Validate the request and resolve defaults.
    pub fn to_options(&self) -> Result<ConversionOptions, ApiError> {
        if self.svg_content.as_deref().unwrap_or_default().is_empty() {
            return Err(ApiError::Validation("SVG content is required".to_string()));
        }

        let quality = match self.quality {
            None => DEFAULT_QUALITY,
            Some(q) if (0..=100).contains(&q) => q as u8,
            Some(q) => {
                return Err(ApiError::Validation(format!(
                    "Quality must be between 0 and 100, got {}",
                    q
                )))
            }
        };

        let scale_factor = self.scale_factor.unwrap_or(DEFAULT_SCALE_FACTOR);
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(ApiError::Validation(format!(
                "Scale factor must be a positive number, got {}",
                scale_factor
            )));
        }

        Ok(ConversionOptions::new(
            quality,
            self.lossless.unwrap_or(true),
            scale_factor,
        ))
    }
}

/// Convert inline SVG content to WebP.
///
/// Returns `image/webp` bytes on success, 400 with a plain-text message for
/// invalid requests, and 500 with the conversion error otherwise.
#[instrument(
    skip(state, request),
    fields(svg_bytes = request.svg_content.as_ref().map_or(0, String::len))
)]
pub async fn convert_svg_to_webp_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<ConversionRequest>,
) -> Response {
    match convert(&state, request).await {
        Ok(webp_data) => {
            metrics::counter!("svg_conversions_total", "status" => "ok").increment(1);
            ([(header::CONTENT_TYPE, "image/webp")], webp_data).into_response()
        }
        Err(e) => {
            let status = match &e {
                ApiError::Validation(_) => "invalid",
                _ => "error",
            };
            metrics::counter!("svg_conversions_total", "status" => status).increment(1);
            e.into_response()
        }
    }
}

async fn convert(state: &AppState, request: ConversionRequest) -> Result<Vec<u8>, ApiError> {
    let options = request.to_options()?;
    let svg_data = request.svg_content.unwrap_or_default().into_bytes();
    let converter = Arc::clone(&state.converter);

    let start = Instant::now();
    let result = tokio::task::spawn_blocking(move || converter.convert(&svg_data, &options))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let elapsed = start.elapsed();

    metrics::histogram!("svg_conversion_duration_seconds").record(elapsed.as_secs_f64());

    match result {
        Ok(webp_data) => {
            info!(
                quality = options.encode_quality(),
                scale_factor = options.scale_factor,
                webp_bytes = webp_data.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Converted SVG to WebP"
            );
            Ok(webp_data)
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Error converting SVG to WebP");
            Err(ApiError::Conversion(e))
        }
    }
}
