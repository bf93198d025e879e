mod api;
mod client;
mod defines;
mod errors;
mod impls;
mod logsink;
mod pipeline;
mod report;
mod types;
mod util;
mod validator;

use clap::Parser;
use defines::*;
use errors::InitError;
use logsink::LogSink;
use types::*;

fn main() {
    // parse arguments via clap; usage errors exit with 1 rather than clap's 2,
    // --help and --version still exit with 0
    let cmd_args = match CommandlineArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    // credentials may live in a local .env file
    dotenvy::dotenv().ok();

    if let Err(e) = logsink::init_tracing(LOG_FILE) {
        eprintln!("ERROR: cannot open log file '{LOG_FILE}': {e}");
        std::process::exit(1);
    }
    let sink: &dyn LogSink = &logsink::TracingSink;

    let use_testnet = !cmd_args.mainnet;
    sink.info(&format!("Initializing order client. Testnet mode: {use_testnet}"));

    let connect = || -> Result<api::BinanceFuturesRest, InitError> {
        let trading_context = TradingContext::from_env(use_testnet)?;
        let rest = api::BinanceFuturesRest::new(&trading_context)?;
        sink.info(&format!("Using exchange endpoint {}", rest.base_url()));
        Ok(rest)
    };

    let input = RawOrderInput::from(&cmd_args);
    let mut stdout = std::io::stdout();
    let code = match pipeline::run(&input, LOG_FILE, connect, sink, &mut stdout) {
        Ok(completion) => completion.exit_code(),
        Err(e) => {
            sink.critical(&format!("Cannot write to standard output: {e}"));
            1
        }
    };

    std::process::exit(code);
}
