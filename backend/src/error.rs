//! Error handling for the planting advisor
//!
//! Provides consistent error responses in English and Japanese

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Acquisition errors
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Forecast unavailable (status {status_code:?})")]
    ForecastUnavailable { status_code: Option<u16> },

    #[error("Geocoding service error: {0}")]
    GeocodingService(String),

    // Catalog errors
    #[error("Unknown vegetable: {0}")]
    UnknownVegetable(String),

    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_ja: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::LocationNotFound(place) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "LOCATION_NOT_FOUND".to_string(),
                    message_en: format!("Could not find the place '{}'", place),
                    message_ja: format!("場所「{}」が見つかりませんでした。", place),
                    field: Some("location".to_string()),
                },
            ),
            AppError::ForecastUnavailable { status_code } => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "FORECAST_UNAVAILABLE".to_string(),
                    message_en: match status_code {
                        Some(code) => format!("Weather forecast service failed (HTTP {})", code),
                        None => "Weather forecast service returned no usable forecast".to_string(),
                    },
                    message_ja: "天気予報サービスから予報を取得できませんでした。".to_string(),
                    field: None,
                },
            ),
            AppError::GeocodingService(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "GEOCODING_SERVICE_ERROR".to_string(),
                    message_en: format!("Geocoding service error: {}", msg),
                    message_ja: "位置情報サービスでエラーが発生しました。".to_string(),
                    field: None,
                },
            ),
            AppError::UnknownVegetable(name) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "UNKNOWN_VEGETABLE".to_string(),
                    message_en: format!("'{}' is not in the vegetable catalog", name),
                    message_ja: format!("「{}」は野菜データに登録されていません。", name),
                    field: Some("vegetables".to_string()),
                },
            ),
            AppError::CatalogLoad(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CATALOG_LOAD_ERROR".to_string(),
                    message_en: format!("Vegetable catalog could not be loaded: {}", msg),
                    message_ja: "野菜データを読み込めませんでした。".to_string(),
                    field: None,
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_ja: format!("入力内容が正しくありません: {}", message),
                    field: Some(field.clone()),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_ja: format!("設定エラー: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_ja: "サーバー内部でエラーが発生しました。".to_string(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first failing field
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("request".to_string(), errors.to_string()));
        AppError::Validation { field, message }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
