//! The square-root computation endpoint.
//!
//! `POST /api/v1/sqrt` accepts a JSON body, applies the configured
//! request limits before the engine runs, and returns either the JSON
//! report or the iteration table as a downloadable CSV attachment.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use sqrt_core::engine;
use sqrt_core::types::{EngineError, InitMode, Method, SqrtReport, SqrtRequest};

use super::AppState;

/// JSON request body. Every field is optional; omitted fields fall back
/// to the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SqrtApiRequest {
    /// Input number as a decimal string (default "2").
    pub number: Option<String>,
    /// Working precision in significant decimal digits.
    pub precision_digits: Option<u64>,
    /// Refinement step count; clamped to the configured maximum.
    pub iterations: Option<u32>,
    /// `heron` or `recip` (default `heron`).
    pub method: Option<Method>,
    /// `auto` or `manual` (default `auto`).
    pub init_mode: Option<InitMode>,
    /// Seed value, used only in manual mode.
    pub init_value: Option<String>,
    /// Whether the per-iteration table is included (default true).
    pub include_iterations: Option<bool>,
    /// Return the iteration table as a CSV attachment instead of JSON.
    pub save_csv: Option<bool>,
}

/// JSON error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Stable machine-readable error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    fn response(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
        let body = ApiError {
            error: error.to_string(),
            message: message.into(),
        };
        (status, Json(body)).into_response()
    }
}

/// Map engine failures to transport-level failure responses: the three
/// domain kinds are the caller's fault, everything else is ours.
fn engine_error_response(err: EngineError) -> Response {
    let (status, kind) = match &err {
        EngineError::Parse { .. } => (StatusCode::BAD_REQUEST, "parse_error"),
        EngineError::Domain(_) => (StatusCode::BAD_REQUEST, "domain_error"),
        EngineError::Config(_) => (StatusCode::BAD_REQUEST, "config_error"),
        EngineError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    ApiError::response(status, kind, err.to_string())
}

/// Build the sqrt routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/sqrt", post(sqrt_handler))
}

/// POST /api/v1/sqrt - compute a high-precision square root
async fn sqrt_handler(State(state): State<AppState>, Json(body): Json<SqrtApiRequest>) -> Response {
    let config = &state.config;

    let number = body.number.unwrap_or_else(|| "2".to_string());
    if number.is_empty() || number.len() > config.max_number_length {
        return ApiError::response(
            StatusCode::BAD_REQUEST,
            "config_error",
            format!(
                "'number' must be non-empty and at most {} characters",
                config.max_number_length
            ),
        );
    }

    let precision_digits = body
        .precision_digits
        .unwrap_or(config.default_precision_digits);
    if precision_digits < engine::MIN_PRECISION_DIGITS {
        return ApiError::response(
            StatusCode::BAD_REQUEST,
            "config_error",
            format!(
                "precisionDigits must be at least {}",
                engine::MIN_PRECISION_DIGITS
            ),
        );
    }
    if precision_digits > config.max_precision_digits {
        return ApiError::response(
            StatusCode::BAD_REQUEST,
            "config_error",
            format!(
                "precisionDigits too large; maximum allowed is {}",
                config.max_precision_digits
            ),
        );
    }

    let iterations = body
        .iterations
        .unwrap_or(config.default_iterations)
        .min(config.max_iterations);
    let method = body.method.unwrap_or(Method::Heron);
    let init_mode = body.init_mode.unwrap_or(InitMode::Auto);
    let save_csv = body.save_csv.unwrap_or(false);
    // The CSV rendering needs the trace even when the JSON report would
    // have omitted it.
    let include_iterations = body.include_iterations.unwrap_or(true) || save_csv;

    let request = SqrtRequest {
        number,
        precision_digits,
        iterations,
        method,
        init_mode,
        init_value: body.init_value,
        include_iterations,
    };

    tracing::info!(
        number_len = request.number.len(),
        precision_digits,
        iterations,
        method = %method,
        init_mode = %init_mode,
        save_csv,
        "sqrt request"
    );

    // The solve is pure CPU with no suspension points; keep it off the
    // async workers.
    let outcome = tokio::task::spawn_blocking(move || engine::compute(&request)).await;

    match outcome {
        Ok(Ok(report)) if save_csv => csv_response(&report),
        Ok(Ok(report)) => (StatusCode::OK, Json(report)).into_response(),
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "sqrt request rejected");
            engine_error_response(err)
        }
        Err(join_err) => {
            tracing::error!(error = %join_err, "sqrt computation task failed");
            ApiError::response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "computation task failed",
            )
        }
    }
}

/// Render the iteration table as a CSV attachment.
fn csv_response(report: &SqrtReport) -> Response {
    let rows = report.iterations.as_deref().unwrap_or(&[]);

    let mut writer = csv::Writer::from_writer(Vec::new());
    let result = writer
        .write_record(["iteration", "value", "abs_error", "rel_error"])
        .and_then(|_| {
            rows.iter().try_for_each(|row| {
                writer.write_record([
                    row.index.to_string().as_str(),
                    &row.value,
                    &row.abs_error,
                    &row.rel_error,
                ])
            })
        });

    if result.is_err() {
        return ApiError::response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "failed to render CSV",
        );
    }
    match writer.into_inner() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"iterations.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => ApiError::response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "failed to render CSV",
        ),
    }
}
