/// Base URL of Binance USDT-M futures testnet
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Base URL of Binance USDT-M futures (real funds)
pub const MAINNET_BASE_URL: &str = "https://fapi.binance.com";

pub const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";
pub const ORDER_PATH: &str = "/fapi/v1/order";

pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
pub const API_SECRET_ENV: &str = "BINANCE_API_SECRET";

/// Header carrying the api-key for signed endpoints
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Window (in ms) the exchange accepts a signed request after its timestamp
pub const RECV_WINDOW_MS: u64 = 5000;

/// File every run appends its log records to
pub const LOG_FILE: &str = "trading_bot_log.log";

/// Width of the separator line closing the status block
pub const REPORT_RULE_WIDTH: usize = 30;
