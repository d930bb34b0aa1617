//! Centralized Error Handling Module
//!
//! Every failure carries a unique code so that console output, API
//! responses and logs all agree on what went wrong.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - VALIDATION_xxx: user input rejected before any work is done
//! - LOOKUP_xxx: username lookup failures
//! - CHECKLIST_xxx: indicator catalog / selection errors
//! - API_xxx: API errors
//! - CFG_xxx: Configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Validation Errors
    // ============================================
    /// Username was empty or whitespace
    ValidationEmptyUsername,

    // ============================================
    // Lookup Errors
    // ============================================
    /// Lookup endpoint answered with a non-2xx status
    LookupHttpStatus,
    /// Lookup succeeded but returned no user
    LookupNotFound,
    /// Request never completed (DNS, connect, TLS, reset...)
    LookupTransport,
    /// Response body was not the expected JSON
    LookupInvalidResponse,

    // ============================================
    // Checklist Errors
    // ============================================
    /// Two indicators share an id
    ChecklistDuplicateId,
    /// Indicator weight outside 0..=100
    ChecklistInvalidPoints,
    /// Selection names an indicator that is not in the catalog
    ChecklistUnknownIndicator,

    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationEmptyUsername => "VALIDATION_EMPTY_USERNAME",

            Self::LookupHttpStatus => "LOOKUP_HTTP_STATUS",
            Self::LookupNotFound => "LOOKUP_NOT_FOUND",
            Self::LookupTransport => "LOOKUP_TRANSPORT",
            Self::LookupInvalidResponse => "LOOKUP_INVALID_RESPONSE",

            Self::ChecklistDuplicateId => "CHECKLIST_DUPLICATE_ID",
            Self::ChecklistInvalidPoints => "CHECKLIST_INVALID_POINTS",
            Self::ChecklistUnknownIndicator => "CHECKLIST_UNKNOWN_INDICATOR",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ValidationEmptyUsername
            | Self::ApiBadRequest
            | Self::ChecklistUnknownIndicator
            | Self::ConfigInvalidValue => 400,
            Self::LookupNotFound => 404,
            Self::LookupHttpStatus | Self::LookupTransport | Self::LookupInvalidResponse => 502,
            _ => 500,
        }
    }

    /// Validation failures are handled inline and never reach the network
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationEmptyUsername)
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Empty username
    pub fn empty_username(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationEmptyUsername, msg)
    }

    /// Non-2xx from the lookup endpoint
    pub fn lookup_status(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::LookupHttpStatus, msg)
    }

    /// Lookup returned no records
    pub fn lookup_not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::LookupNotFound, msg)
    }

    /// Unknown indicator id in a selection
    pub fn unknown_indicator(id: &str) -> Self {
        Self::new(
            ErrorCode::ChecklistUnknownIndicator,
            format!("Unknown indicator: {}", id),
        )
    }

    /// Request body the API could not read
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key, value),
        )
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_decode() {
            Self::with_source(ErrorCode::LookupInvalidResponse, message, err)
        } else {
            Self::with_source(ErrorCode::LookupTransport, message, err)
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorCode::LookupInvalidResponse,
            format!("JSON parse error: {}", err),
            err,
        )
    }
}
