use std::io::Write;

use crate::api::FuturesApi;
use crate::client::OrderClient;
use crate::errors::{InitError, SubmitFailure, ValidationError};
use crate::logsink::LogSink;
use crate::report::{render_attempt, render_outcome};
use crate::types::*;
use crate::validator::validate;

/// How a single invocation ended.
#[derive(Debug, PartialEq)]
pub enum Completion {
    /// Credentials or connectivity unusable; nothing was validated.
    Aborted(String),
    /// Inputs refused; nothing was submitted.
    Rejected(ValidationError),
    Succeeded(PlacedOrder),
    Failed(SubmitFailure),
}

impl Completion {
    /// A reported order failure still counts as a completed attempt.
    pub fn exit_code(&self) -> i32 {
        match self {
            Completion::Aborted(_) | Completion::Rejected(_) => 1,
            Completion::Succeeded(_) | Completion::Failed(_) => 0,
        }
    }
}

/// Connect, validate, submit and report one order.
///
/// `connect` builds the exchange API (resolving credentials on the way). The
/// client is connected before any input is validated, so a dead exchange stops
/// the run first. Status lines go to `out`, details to `sink`.
pub fn run<A, F>(
    input: &RawOrderInput,
    log_file: &str,
    connect: F,
    sink: &dyn LogSink,
    out: &mut dyn Write,
) -> std::io::Result<Completion>
where
    A: FuturesApi,
    F: FnOnce() -> Result<A, InitError>,
{
    let client = match connect().and_then(|api| OrderClient::connect(api, sink)) {
        Ok(client) => client,
        Err(e) => {
            sink.critical(&format!("Exchange client initialization failed: {e}. Exiting."));
            writeln!(out, "STATUS: ABORTED ({e})")?;
            return Ok(Completion::Aborted(e.to_string()));
        }
    };

    let request = match validate(input, sink) {
        Ok(request) => request,
        Err(e) => {
            sink.error("Order processing halted due to invalid input.");
            writeln!(out, "STATUS: REJECTED ({e})")?;
            return Ok(Completion::Rejected(e));
        }
    };

    let shown = |value: Option<f64>| value.map_or_else(|| "none".to_string(), |v| v.to_string());
    sink.info(&format!(
        "Inputs validated: {} {} {} {}, price: {}, stop price: {}",
        request.order_type(),
        request.side,
        request.quantity,
        request.symbol,
        shown(request.price()),
        shown(request.stop_price())
    ));

    writeln!(out, "{}", render_attempt(&request))?;
    let outcome = client.submit(&request, out)?;
    writeln!(out, "{}", render_outcome(&outcome, log_file))?;
    sink.info(&format!("Final Order Status Output: {outcome:?}"));

    Ok(match outcome {
        OrderOutcome::Placed(placed) => Completion::Succeeded(placed),
        OrderOutcome::Failed(failure) => Completion::Failed(failure),
    })
}
