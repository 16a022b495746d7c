//! Command implementations for Emosi CLI.

use std::sync::Arc;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::prediction::{PredictionService, load_normalizer};
use crate::server::{PREDICT_PATH, Server};

/// Execute a CLI command.
pub fn execute_command(args: EmosiArgs) -> Result<()> {
    match &args.command {
        Command::Serve(_) => serve(&args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Normalize(normalize_args) => normalize(normalize_args.clone(), &args),
    }
}

/// Load the artifacts and serve HTTP until Ctrl-C.
fn serve(cli_args: &EmosiArgs) -> Result<()> {
    let config = cli_args.service_config()?;
    let service = Arc::new(PredictionService::from_config(&config)?);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let server = Server::bind(service, &config.bind_address()).await?;
        if cli_args.verbosity() > 0 {
            println!("Serving on http://{}{}", server.local_addr()?, PREDICT_PATH);
        }
        server.run().await
    })
}

/// Classify a single text.
fn predict(args: PredictArgs, cli_args: &EmosiArgs) -> Result<()> {
    let config = cli_args.service_config()?;
    let service = PredictionService::from_config(&config)?;
    let result = service.predict(&args.text)?;

    output_result("Prediction", &result, cli_args)
}

/// Print every normalization stage. Needs no model artifacts.
fn normalize(args: NormalizeArgs, cli_args: &EmosiArgs) -> Result<()> {
    let config = cli_args.service_config()?;
    let normalizer = load_normalizer(&config)?;
    let stages = normalizer.stages(&args.text)?;

    output_result("Normalization stages", &stages, cli_args)
}
