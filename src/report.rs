use crate::defines::REPORT_RULE_WIDTH;
use crate::types::*;

const NOT_AVAILABLE: &str = "N/A";

fn or_na<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| NOT_AVAILABLE.to_string(), T::to_string)
}

/// Headline printed right before the order goes out.
pub fn render_attempt(request: &OrderRequest) -> String {
    format!(
        "\n--- Attempting to place a {} {} order for {} {} ---",
        request.order_type(),
        request.side,
        request.quantity,
        request.symbol
    )
}

/// Status block for a finished submission.
/// Working orders show type and limit price, filled ones their average price.
pub fn render_outcome(outcome: &OrderOutcome, log_file: &str) -> String {
    let mut lines = vec!["\n--- Execution Status ---".to_string()];

    match outcome {
        OrderOutcome::Placed(placed) => {
            lines.push(format!("STATUS: {}", placed.status));
            lines.push(format!("SYMBOL: {}", placed.symbol));
            lines.push(format!("ORDER ID: {}", or_na(&placed.order_id)));

            match placed.status.as_str() {
                "NEW" | "PENDING_NEW" => {
                    lines.push(format!("TYPE: {}", or_na(&placed.order_type)));
                    lines.push(format!("PRICE: {}", or_na(&placed.price)));
                }
                "FILLED" | "PARTIALLY_FILLED" => {
                    lines.push(format!("AVG FILL PRICE: {}", or_na(&placed.avg_price)));
                }
                _ => {}
            }
        }
        OrderOutcome::Failed(_) => {
            lines.push("STATUS: FAILED (Check log file for detailed error message)".to_string());
        }
    }

    lines.push("-".repeat(REPORT_RULE_WIDTH));
    lines.push(format!("Details saved in the log file: {log_file}"));
    lines.join("\n")
}
