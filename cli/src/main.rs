use clap::Parser;
use std::process::ExitCode;

mod app;
mod cli;
mod logging;
mod output;
mod relay_client;

use crate::app::Session;
use crate::cli::Args;
use crate::logging::log_error;
use crate::output::{print_catalog, print_usage_instructions};
use crate::relay_client::RelayClient;

/// Matches symptoms locally and optionally asks the assistant via the relay
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init(args.verbose);

    if args.list {
        print_catalog();
        return ExitCode::SUCCESS;
    }

    let relay = args.ask.then(|| RelayClient::new(&args.relay_url));
    let mut session = Session::new(args.json, relay, args.thread_id.clone());

    let result = if args.interactive {
        app::run_interactive(&mut session).await
    } else if let Some(symptom) = args.symptom.as_deref() {
        app::run_single_query(symptom, &mut session).await
    } else {
        print_usage_instructions();
        return ExitCode::SUCCESS;
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
