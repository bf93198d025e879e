use std::io::Write;
use std::time::Instant;

use crate::api::FuturesApi;
use crate::errors::{InitError, SubmitFailure};
use crate::logsink::LogSink;
use crate::types::*;

/// Places validated orders through a `FuturesApi`.
pub struct OrderClient<'a, A: FuturesApi> {
    api: A,
    sink: &'a dyn LogSink,
}

impl<'a, A: FuturesApi> OrderClient<'a, A> {
    /// Wrap `api` after checking the exchange answers.
    /// An unreachable exchange is fatal; there is no retry.
    pub fn connect(api: A, sink: &'a dyn LogSink) -> Result<Self, InitError> {
        match api.exchange_info() {
            Ok(info) => {
                let trading = info.symbols.iter().filter(|s| s.status == "TRADING").count();
                sink.info(&format!(
                    "Exchange client connected. Server time: {}, trading symbols: {}",
                    info.server_time, trading
                ));
                Ok(Self { api, sink })
            }
            Err(e) => {
                sink.error(&format!(
                    "Failed to initialize exchange client. Check API keys and network: {e}"
                ));
                Err(InitError::Connectivity(e))
            }
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Submit `request` once and normalize whatever comes back.
    /// Failures are logged, written to `out` straight away and returned, never
    /// raised. Only a failing `out` yields an `Err`.
    pub fn submit(&self, request: &OrderRequest, out: &mut dyn Write) -> std::io::Result<OrderOutcome> {
        let params = OrderParams::from(request);
        let described = describe(&params);
        self.sink.info(&format!(
            "Attempting to place {} order. Request parameters: {described}",
            request.order_type()
        ));

        let start = Instant::now();
        match self.api.create_order(&params) {
            Ok(placed) => {
                self.sink.info(&format!(
                    "Order placed successfully in {} ms. Response: {placed:?}",
                    start.elapsed().as_millis()
                ));
                Ok(OrderOutcome::Placed(placed))
            }
            Err(e) => {
                let failure = SubmitFailure::from(e);
                match &failure {
                    SubmitFailure::ApiRejection { code, message } => self.sink.error(&format!(
                        "Binance API Error placing order (Code {code}): {message}. Request: {described}"
                    )),
                    SubmitFailure::TransportFailure(detail) => self.sink.error(&format!(
                        "An unexpected error occurred while placing order: {detail}. Request: {described}"
                    )),
                }
                // operator sees this right away, before the report
                writeln!(out, "{}", failure_line(&failure))?;
                Ok(OrderOutcome::Failed(failure))
            }
        }
    }
}

/// One-line notice for a failed submission.
fn failure_line(failure: &SubmitFailure) -> String {
    match failure {
        SubmitFailure::ApiRejection { code, message } => {
            format!("FAILED (API Error): Code {code} | {message}")
        }
        SubmitFailure::TransportFailure(detail) => format!("FAILED (Unknown Error): {detail}"),
    }
}

fn describe(params: &OrderParams) -> String {
    params
        .query_pairs()
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
