use thiserror::Error;

use crate::types::OrderType;

/// Reasons the validator refuses raw order inputs.
/// The user has to fix the inputs and run again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid quantity: {0}. Must be a positive number.")]
    InvalidQuantity(String),
    #[error("Invalid side: {0}. Must be BUY or SELL.")]
    UnknownSide(String),
    #[error("Invalid order type: {0}. Must be MARKET, LIMIT or STOP_LIMIT.")]
    UnknownOrderType(String),
    #[error("{0} order requires a --price.")]
    MissingPrice(OrderType),
    #[error("Invalid price: {0}. Must be a positive number.")]
    InvalidPrice(String),
    #[error("STOP_LIMIT order requires a --stop-price.")]
    MissingStopPrice,
    #[error("Invalid stop-price: {0}. Must be a positive number.")]
    InvalidStopPrice(String),
}

/// Errors of a single call against the exchange REST API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Structured error returned by Binance.
    #[error("Binance API error (code {code}): {message}")]
    Rejected { code: i64, message: String },
    /// Non-success status whose body is not a Binance error.
    #[error("Unexpected HTTP status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Request build error: {0}")]
    Request(String),
}

impl From<isahc::Error> for ApiError {
    fn from(error: isahc::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(error: std::io::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<isahc::http::Error> for ApiError {
    fn from(error: isahc::http::Error) -> Self {
        Self::Request(error.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(error: url::ParseError) -> Self {
        Self::Request(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

/// Why an order submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitFailure {
    /// Exchange declined the order.
    #[error("API Error: Code {code} | {message}")]
    ApiRejection { code: i64, message: String },
    /// Anything else: network, unexpected status or malformed response.
    #[error("Unknown Error: {0}")]
    TransportFailure(String),
}

impl From<ApiError> for SubmitFailure {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Rejected { code, message } => Self::ApiRejection { code, message },
            other => Self::TransportFailure(other.to_string()),
        }
    }
}

/// Startup failures. Nothing gets validated nor submitted after one of these.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("{0} not found in environment or .env file")]
    MissingCredential(&'static str),
    #[error("failed to initialize exchange client: {0}")]
    Connectivity(#[from] ApiError),
}
