//! Application state for the conversion API.

use std::sync::Arc;

use converter::SvgConverter;
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared application state.
pub struct AppState {
    /// Converter holding the loaded font database.
    pub converter: Arc<SvgConverter>,

    /// Prometheus recorder handle, absent when no recorder is installed.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state with a freshly built converter (loads system fonts).
    pub fn new(metrics_handle: Option<PrometheusHandle>) -> Self {
        Self::with_converter(SvgConverter::new(), metrics_handle)
    }

    pub fn with_converter(converter: SvgConverter, metrics_handle: Option<PrometheusHandle>) -> Self {
        Self {
            converter: Arc::new(converter),
            metrics_handle,
        }
    }
}
