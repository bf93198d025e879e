use crate::defines::*;
use crate::errors::InitError;
use crate::types::*;

use std::fmt;
use std::str::FromStr;

impl TradingContext {
    /// Build context from process environment.
    /// Call `dotenvy::dotenv()` beforehand to pick up a local .env file.
    pub fn from_env(use_testnet: bool) -> Result<TradingContext, InitError> {
        Self::from_lookup(use_testnet, |name| std::env::var(name).ok())
    }

    /// Build context resolving each credential variable with `lookup`.
    /// Empty values count as missing.
    pub fn from_lookup<F>(use_testnet: bool, lookup: F) -> Result<TradingContext, InitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(InitError::MissingCredential(name))
        };

        Ok(TradingContext {
            api_key: resolve(API_KEY_ENV)?,
            api_secret: resolve(API_SECRET_ENV)?,
            use_testnet,
        })
    }

    pub fn base_url(&self) -> &'static str {
        if self.use_testnet {
            TESTNET_BASE_URL
        } else {
            MAINNET_BASE_URL
        }
    }
}

impl fmt::Debug for TradingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradingContext")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("use_testnet", &self.use_testnet)
            .finish()
    }
}

impl From<&CommandlineArgs> for RawOrderInput {
    fn from(args: &CommandlineArgs) -> RawOrderInput {
        RawOrderInput {
            symbol: args.symbol.clone(),
            side: args.side.clone(),
            order_type: args.order_type.clone(),
            quantity: args.quantity.clone(),
            price: args.price.clone(),
            stop_price: args.stop_price.clone(),
        }
    }
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl FromStr for OrderSide {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopLimit => "STOP_LIMIT",
        }
    }
}

impl FromStr for OrderType {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_LIMIT" => Ok(OrderType::StopLimit),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
        }
    }
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::StopLimit { .. } => OrderType::StopLimit,
        }
    }
}

impl OrderRequest {
    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    pub fn price(&self) -> Option<f64> {
        match self.kind {
            OrderKind::Market => None,
            OrderKind::Limit { price } | OrderKind::StopLimit { price, .. } => Some(price),
        }
    }

    pub fn stop_price(&self) -> Option<f64> {
        match self.kind {
            OrderKind::StopLimit { stop_price, .. } => Some(stop_price),
            _ => None,
        }
    }
}

impl From<&OrderRequest> for OrderParams {
    fn from(request: &OrderRequest) -> OrderParams {
        let symbol = request.symbol.clone();
        let side = request.side;
        let quantity = request.quantity;

        match request.kind {
            OrderKind::Market => OrderParams::Market { symbol, side, quantity },
            OrderKind::Limit { price } => OrderParams::Limit {
                symbol,
                side,
                quantity,
                price,
                time_in_force: TimeInForce::Gtc,
            },
            OrderKind::StopLimit { price, stop_price } => OrderParams::StopLimit {
                symbol,
                side,
                quantity,
                price,
                stop_price,
                time_in_force: TimeInForce::Gtc,
            },
        }
    }
}

impl OrderParams {
    /// Order type name as Binance futures knows it.
    /// A stop-limit order is called `STOP` there.
    pub fn wire_type(&self) -> &'static str {
        match self {
            OrderParams::Market { .. } => "MARKET",
            OrderParams::Limit { .. } => "LIMIT",
            OrderParams::StopLimit { .. } => "STOP",
        }
    }

    /// Key/value pairs in the order they are put on the query string.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            OrderParams::Market { symbol, side, quantity } => vec![
                ("symbol", symbol.clone()),
                ("side", side.to_string()),
                ("type", self.wire_type().to_string()),
                ("quantity", quantity.to_string()),
            ],
            OrderParams::Limit { symbol, side, quantity, price, time_in_force } => vec![
                ("symbol", symbol.clone()),
                ("side", side.to_string()),
                ("type", self.wire_type().to_string()),
                ("quantity", quantity.to_string()),
                ("price", price.to_string()),
                ("timeInForce", time_in_force.as_str().to_string()),
            ],
            OrderParams::StopLimit { symbol, side, quantity, price, stop_price, time_in_force } => vec![
                ("symbol", symbol.clone()),
                ("side", side.to_string()),
                ("type", self.wire_type().to_string()),
                ("quantity", quantity.to_string()),
                ("price", price.to_string()),
                ("stopPrice", stop_price.to_string()),
                ("timeInForce", time_in_force.as_str().to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(kind: OrderKind) -> OrderRequest {
        OrderRequest {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Sell,
            quantity: 0.01,
            kind,
        }
    }

    #[rstest]
    #[case("buy", Ok(OrderSide::Buy))]
    #[case("SELL", Ok(OrderSide::Sell))]
    #[case(" Sell ", Ok(OrderSide::Sell))]
    #[case("hold", Err(()))]
    fn test_parse_side(#[case] input: &str, #[case] expected: Result<OrderSide, ()>) {
        assert_eq!(input.parse::<OrderSide>(), expected);
    }

    #[rstest]
    #[case("market", Ok(OrderType::Market))]
    #[case("Limit", Ok(OrderType::Limit))]
    #[case("stop_limit", Ok(OrderType::StopLimit))]
    #[case("STOP", Err(()))]
    fn test_parse_order_type(#[case] input: &str, #[case] expected: Result<OrderType, ()>) {
        assert_eq!(input.parse::<OrderType>(), expected);
    }

    #[test]
    fn test_market_params_carry_only_basic_fields() {
        let params = OrderParams::from(&request(OrderKind::Market));
        let keys: Vec<&str> = params.query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["symbol", "side", "type", "quantity"]);
    }

    #[test]
    fn test_limit_params_default_to_gtc() {
        let params = OrderParams::from(&request(OrderKind::Limit { price: 100.5 }));
        assert_eq!(
            params.query_pairs(),
            vec![
                ("symbol", "BTCUSDT".to_string()),
                ("side", "SELL".to_string()),
                ("type", "LIMIT".to_string()),
                ("quantity", "0.01".to_string()),
                ("price", "100.5".to_string()),
                ("timeInForce", "GTC".to_string()),
            ]
        );
    }

    #[test]
    fn test_stop_limit_params_use_stop_wire_type() {
        let params = OrderParams::from(&request(OrderKind::StopLimit { price: 100.0, stop_price: 99.0 }));
        assert_eq!(params.wire_type(), "STOP");
        assert_eq!(
            params.query_pairs(),
            vec![
                ("symbol", "BTCUSDT".to_string()),
                ("side", "SELL".to_string()),
                ("type", "STOP".to_string()),
                ("quantity", "0.01".to_string()),
                ("price", "100".to_string()),
                ("stopPrice", "99".to_string()),
                ("timeInForce", "GTC".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_price_accessors_follow_kind() {
        let market = request(OrderKind::Market);
        assert_eq!((market.price(), market.stop_price()), (None, None));

        let stop = request(OrderKind::StopLimit { price: 100.0, stop_price: 99.0 });
        assert_eq!(stop.order_type(), OrderType::StopLimit);
        assert_eq!((stop.price(), stop.stop_price()), (Some(100.0), Some(99.0)));
    }

    #[test]
    fn test_context_requires_both_credentials() {
        let result = TradingContext::from_lookup(true, |name| {
            (name == API_KEY_ENV).then(|| "key".to_string())
        });
        assert!(matches!(result, Err(InitError::MissingCredential(API_SECRET_ENV))));
    }

    #[test]
    fn test_context_treats_empty_credential_as_missing() {
        let result = TradingContext::from_lookup(true, |_| Some("  ".to_string()));
        assert!(matches!(result, Err(InitError::MissingCredential(API_KEY_ENV))));
    }

    #[test]
    fn test_context_picks_base_url() {
        let ctx = TradingContext::from_lookup(false, |_| Some("x".to_string())).unwrap();
        assert_eq!(ctx.base_url(), MAINNET_BASE_URL);
        assert!(!format!("{ctx:?}").contains("api_secret: \"x\""));
    }
}
