use isahc::prelude::*;
use isahc::{Body, Request, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::defines::*;
use crate::errors::ApiError;
use crate::types::*;
use crate::util::{redact_signature, sign_payload, timestamp_ms};

/// Calls the order client needs from a futures exchange.
pub trait FuturesApi {
    /// Exchange metadata; doubles as a connectivity check.
    fn exchange_info(&self) -> Result<BinanceExchangeInfo, ApiError>;

    /// Place a new order.
    fn create_order(&self, params: &OrderParams) -> Result<PlacedOrder, ApiError>;
}

/// Blocking REST client for Binance USDT-M futures.
/// Requests use the HTTP client's default timeouts.
pub struct BinanceFuturesRest {
    base_url: Url,
    api_key: String,
    api_secret: String,
}

impl BinanceFuturesRest {
    pub fn new(ctx: &TradingContext) -> Result<Self, ApiError> {
        Self::with_base_url(ctx.base_url(), &ctx.api_key, &ctx.api_secret)
    }

    pub fn with_base_url(base_url: &str, api_key: &str, api_secret: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Form-encode `pairs`, append recvWindow and timestamp, then sign the lot.
    fn signed_query(&self, pairs: &[(&str, String)]) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key, value);
        }
        serializer.append_pair("recvWindow", &RECV_WINDOW_MS.to_string());
        serializer.append_pair("timestamp", &timestamp_ms().to_string());
        let query = serializer.finish();

        let signature = sign_payload(&self.api_secret, &query);
        format!("{query}&signature={signature}")
    }

    fn read_response<T: DeserializeOwned>(mut response: Response<Body>) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text()?;
        tracing::debug!("response status={} body={}", status.as_u16(), body);

        if status.is_success() {
            return serde_json::from_str::<T>(&body).map_err(|e| {
                // a 200 may still carry an error object
                match serde_json::from_str::<BinanceErrorResponse>(&body) {
                    Ok(err) => ApiError::Rejected { code: err.code, message: err.msg },
                    Err(_) => ApiError::from(e),
                }
            });
        }

        match serde_json::from_str::<BinanceErrorResponse>(&body) {
            Ok(err) => Err(ApiError::Rejected { code: err.code, message: err.msg }),
            Err(_) => Err(ApiError::UnexpectedStatus { status: status.as_u16(), body }),
        }
    }
}

impl FuturesApi for BinanceFuturesRest {
    fn exchange_info(&self) -> Result<BinanceExchangeInfo, ApiError> {
        let url = self.endpoint(EXCHANGE_INFO_PATH)?;
        tracing::debug!("GET {url}");

        let response = isahc::get(url.as_str())?;
        Self::read_response(response)
    }

    fn create_order(&self, params: &OrderParams) -> Result<PlacedOrder, ApiError> {
        let mut url = self.endpoint(ORDER_PATH)?;
        url.set_query(Some(&self.signed_query(&params.query_pairs())));
        tracing::debug!("POST {}", redact_signature(url.as_str()));

        let response = Request::post(url.as_str())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .body(())?
            .send()?;
        Self::read_response(response)
    }
}
