use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name="futurely")]
#[clap(about="futurely validates an order then places it on Binance USDT-M futures (testnet by default)", long_about=None)]
#[clap(after_help="Log records of every run are appended to 'trading_bot_log.log'.")]
#[clap(arg_required_else_help=true)]
pub struct CommandlineArgs {
    /// Trading pair (e.g. BTCUSDT or btc/usdt)
    pub symbol: String,

    /// Order side
    #[clap(possible_values=["BUY", "SELL"], ignore_case=true)]
    pub side: String,

    /// Order type
    #[clap(possible_values=["MARKET", "LIMIT", "STOP_LIMIT"], ignore_case=true)]
    pub order_type: String,

    /// Quantity to trade (e.g. 0.001)
    // Hyphen values are let through so a negative quantity reaches the validator
    // and gets reported as such instead of being mistaken for a flag.
    #[clap(allow_hyphen_values=true)]
    pub quantity: String,

    /// Limit price (required for LIMIT and STOP_LIMIT orders)
    #[clap(long, allow_hyphen_values=true)]
    pub price: Option<String>,

    /// Stop price (required for STOP_LIMIT orders)
    #[clap(long="stop-price", allow_hyphen_values=true)]
    pub stop_price: Option<String>,

    /// Place the order on the real exchange instead of testnet
    #[clap(long)]
    pub mainnet: bool,
}

/// `TradingContext` contains information used to talk to the exchange.
pub struct TradingContext {
    /// Set environment variable with name BINANCE_API_KEY
    pub api_key: String,

    /// Set environment variable with name BINANCE_API_SECRET
    pub api_secret: String,

    /// Whether or not to execute API against testnet
    pub use_testnet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order type as the user names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    /// Good-til-cancelled
    Gtc,
}

/// Price fields of an order, shaped by its type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderKind {
    Market,
    Limit { price: f64 },
    StopLimit { price: f64, stop_price: f64 },
}

/// Raw, unchecked inputs as received from the command line.
#[derive(Debug, Clone, Default)]
pub struct RawOrderInput {
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub quantity: String,
    pub price: Option<String>,
    pub stop_price: Option<String>,
}

/// Normalized order that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Uppercase, without any "/" separator
    pub symbol: String,
    pub side: OrderSide,
    /// Strictly positive
    pub quantity: f64,
    pub kind: OrderKind,
}

/// Parameter set sent to the order creation endpoint.
/// Each variant only carries the fields valid for its order type.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderParams {
    Market {
        symbol: String,
        side: OrderSide,
        quantity: f64,
    },
    Limit {
        symbol: String,
        side: OrderSide,
        quantity: f64,
        price: f64,
        time_in_force: TimeInForce,
    },
    StopLimit {
        symbol: String,
        side: OrderSide,
        quantity: f64,
        price: f64,
        stop_price: f64,
        time_in_force: TimeInForce,
    },
}

/// Error body returned by Binance when it declines a request.
// https://binance-docs.github.io/apidocs/futures/en/#error-codes
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct BinanceErrorResponse {
    pub code: i64,
    pub msg: String,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct BinanceSymbolInfo {
    pub symbol: String,
    pub status: String,
}

/// Exchange metadata. Only used as a connectivity check, so most of the
/// response is ignored.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all="camelCase")]
pub struct BinanceExchangeInfo {
    pub server_time: i64,
    #[serde(default)]
    pub symbols: Vec<BinanceSymbolInfo>,
}

/// Order as acknowledged by the exchange.
/// Fields other than status and symbol depend on the order status, so they are
/// left absent when missing instead of defaulting to zero.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all="camelCase")]
pub struct PlacedOrder {
    pub status: String,
    pub symbol: String,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default, rename="type")]
    pub order_type: Option<String>,
    #[serde(default, deserialize_with="crate::util::de_opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with="crate::util::de_opt_f64")]
    pub avg_price: Option<f64>,
}

/// Result of one order submission.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    Placed(PlacedOrder),
    Failed(crate::errors::SubmitFailure),
}
