use crate::errors::ValidationError;
use crate::logsink::LogSink;
use crate::types::*;
use crate::util::parse_positive;

/// Uppercase the symbol and drop any "/" separator, so "btc/usdt" becomes "BTCUSDT".
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase().replace('/', "")
}

/// Turn raw inputs into a normalized `OrderRequest`.
///
/// Checks run in order and the first failure wins: quantity, side and type,
/// price (LIMIT and STOP_LIMIT), stop price (STOP_LIMIT). A rejection is
/// logged at error level and no request is returned.
///
/// A stop-limit whose stop price sits on the wrong side of its limit price
/// (above it for SELL, below it for BUY) may trigger as soon as it is placed.
/// That only produces a warning.
pub fn validate(input: &RawOrderInput, sink: &dyn LogSink) -> Result<OrderRequest, ValidationError> {
    check(input, sink).map_err(|e| {
        sink.error(&e.to_string());
        e
    })
}

fn check(input: &RawOrderInput, sink: &dyn LogSink) -> Result<OrderRequest, ValidationError> {
    let quantity = parse_positive(&input.quantity)
        .ok_or_else(|| ValidationError::InvalidQuantity(input.quantity.clone()))?;

    let side: OrderSide = input
        .side
        .parse()
        .map_err(|_| ValidationError::UnknownSide(input.side.clone()))?;
    let order_type: OrderType = input
        .order_type
        .parse()
        .map_err(|_| ValidationError::UnknownOrderType(input.order_type.clone()))?;

    let kind = match order_type {
        OrderType::Market => OrderKind::Market,
        OrderType::Limit => OrderKind::Limit {
            price: required_price(input, order_type)?,
        },
        OrderType::StopLimit => {
            let price = required_price(input, order_type)?;
            let raw_stop = input.stop_price.as_deref().ok_or(ValidationError::MissingStopPrice)?;
            let stop_price = parse_positive(raw_stop)
                .ok_or_else(|| ValidationError::InvalidStopPrice(raw_stop.to_string()))?;

            match side {
                OrderSide::Sell if stop_price > price => sink.warning(
                    "Stop Price > Limit Price for a SELL order (may trigger immediately).",
                ),
                OrderSide::Buy if stop_price < price => sink.warning(
                    "Stop Price < Limit Price for a BUY order (may trigger immediately).",
                ),
                _ => {}
            }

            OrderKind::StopLimit { price, stop_price }
        }
    };

    Ok(OrderRequest {
        symbol: normalize_symbol(&input.symbol),
        side,
        quantity,
        kind,
    })
}

fn required_price(input: &RawOrderInput, order_type: OrderType) -> Result<f64, ValidationError> {
    let raw = input
        .price
        .as_deref()
        .ok_or(ValidationError::MissingPrice(order_type))?;
    parse_positive(raw).ok_or_else(|| ValidationError::InvalidPrice(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logsink::testing::RecordingSink;
    use crate::logsink::Level;
    use rstest::rstest;

    fn input(side: &str, order_type: &str, quantity: &str, price: Option<&str>, stop: Option<&str>) -> RawOrderInput {
        RawOrderInput {
            symbol: "btc/usdt".to_string(),
            side: side.to_string(),
            order_type: order_type.to_string(),
            quantity: quantity.to_string(),
            price: price.map(str::to_string),
            stop_price: stop.map(str::to_string),
        }
    }

    #[rstest]
    #[case("abc", "MARKET", None, None)]
    #[case("0", "MARKET", None, None)]
    #[case("-1", "LIMIT", Some("100"), None)]
    #[case("", "STOP_LIMIT", None, None)]
    #[case("NaN", "LIMIT", None, None)]
    #[case("-0.5", "bogus", Some("x"), Some("y"))]
    fn test_bad_quantity_wins_over_everything(
        #[case] quantity: &str,
        #[case] order_type: &str,
        #[case] price: Option<&str>,
        #[case] stop: Option<&str>,
    ) {
        let sink = RecordingSink::default();
        let result = validate(&input("SELL", order_type, quantity, price, stop), &sink);
        assert_eq!(result, Err(ValidationError::InvalidQuantity(quantity.to_string())));
        assert_eq!(sink.at(Level::Error).len(), 1);
    }

    #[rstest]
    #[case("LIMIT", None, None, ValidationError::MissingPrice(OrderType::Limit))]
    #[case("LIMIT", Some("cheap"), None, ValidationError::InvalidPrice("cheap".to_string()))]
    #[case("LIMIT", Some("0"), None, ValidationError::InvalidPrice("0".to_string()))]
    #[case("STOP_LIMIT", None, Some("90"), ValidationError::MissingPrice(OrderType::StopLimit))]
    #[case("STOP_LIMIT", Some("-1"), Some("90"), ValidationError::InvalidPrice("-1".to_string()))]
    #[case("STOP_LIMIT", Some("100"), None, ValidationError::MissingStopPrice)]
    #[case("STOP_LIMIT", Some("100"), Some("soon"), ValidationError::InvalidStopPrice("soon".to_string()))]
    #[case("STOP_LIMIT", Some("100"), Some("0"), ValidationError::InvalidStopPrice("0".to_string()))]
    fn test_price_rules(
        #[case] order_type: &str,
        #[case] price: Option<&str>,
        #[case] stop: Option<&str>,
        #[case] expected: ValidationError,
    ) {
        let sink = RecordingSink::default();
        let result = validate(&input("BUY", order_type, "1", price, stop), &sink);
        assert_eq!(result, Err(expected.clone()));
        assert_eq!(sink.at(Level::Error), vec![expected.to_string()]);
    }

    #[test]
    fn test_unknown_side_and_type() {
        let sink = RecordingSink::default();
        assert_eq!(
            validate(&input("HOLD", "MARKET", "1", None, None), &sink),
            Err(ValidationError::UnknownSide("HOLD".to_string()))
        );
        assert_eq!(
            validate(&input("BUY", "STOP", "1", None, None), &sink),
            Err(ValidationError::UnknownOrderType("STOP".to_string()))
        );
    }

    #[test]
    fn test_market_order_ignores_prices() {
        let sink = RecordingSink::default();
        let request = validate(&input("sell", "market", "2", Some("junk"), Some("junk")), &sink).unwrap();
        assert_eq!(request.kind, OrderKind::Market);
        assert!(sink.records.borrow().is_empty());
    }

    #[test]
    fn test_plain_market_buy_is_normalized() {
        let sink = RecordingSink::default();
        let raw = RawOrderInput {
            symbol: "BTCUSDT".to_string(),
            side: "buy".to_string(),
            order_type: "market".to_string(),
            quantity: "0.01".to_string(),
            ..Default::default()
        };
        let request = validate(&raw, &sink).unwrap();

        assert_eq!(request.symbol, "BTCUSDT");
        assert_eq!(request.side, OrderSide::Buy);
        assert_eq!(request.order_type(), OrderType::Market);
        assert_eq!(request.quantity, 0.01);
        assert_eq!(request.price(), None);
        assert_eq!(request.stop_price(), None);
    }

    #[rstest]
    #[case("SELL", "110", true)]
    #[case("SELL", "90", false)]
    #[case("BUY", "90", true)]
    #[case("BUY", "110", false)]
    #[case("BUY", "100", false)]
    fn test_stop_limit_immediate_trigger_warning(
        #[case] side: &str,
        #[case] stop: &str,
        #[case] warns: bool,
    ) {
        let sink = RecordingSink::default();
        let request = validate(&input(side, "STOP_LIMIT", "1", Some("100"), Some(stop)), &sink).unwrap();

        assert_eq!(request.order_type(), OrderType::StopLimit);
        assert_eq!(request.price(), Some(100.0));
        assert_eq!(sink.at(Level::Warning).len(), usize::from(warns));
        assert!(sink.at(Level::Error).is_empty());
    }

    #[rstest]
    #[case("btc/usdt", "BTCUSDT")]
    #[case("BTCUSDT", "BTCUSDT")]
    #[case("eth/usdt/", "ETHUSDT")]
    #[case(" sol/usdt ", "SOLUSDT")]
    fn test_normalize_symbol_is_idempotent(#[case] raw: &str, #[case] expected: &str) {
        let once = normalize_symbol(raw);
        assert_eq!(once, expected);
        assert_eq!(normalize_symbol(&once), once);
    }
}
