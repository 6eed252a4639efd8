use std::process::ExitCode;

use log::{error, info};
use perceptron_net::dataset::save_outputs;
use perceptron_net::RunConfig;

const DEFAULT_OUTPUTS: &str = "outputs.txt";

// Usage: perceptron-net <config.json> [outputs.txt]
// Verbosity follows RUST_LOG, e.g. RUST_LOG=info.
fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(config_path) = args.get(1) else {
        let program = args.first().map_or("perceptron-net", String::as_str);
        eprintln!("usage: {program} <config.json> [outputs.txt]");
        return ExitCode::from(2);
    };
    let outputs_path = args.get(2).map_or(DEFAULT_OUTPUTS, String::as_str);

    match run(config_path, outputs_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("perceptron-net: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &str, outputs_path: &str) -> perceptron_net::Result<()> {
    let config = RunConfig::load_json(config_path)?;
    info!(
        "loaded {} training cases for topology {:?}",
        config.training_cases.len(),
        config.layer_widths
    );

    let mut trainer = config.into_trainer()?;
    let report = trainer.train()?;
    println!(
        "{:?} after {} steps, error {}",
        report.state, report.steps, report.final_error
    );

    let outputs = trainer.final_outputs();
    save_outputs(outputs_path, &outputs)?;
    info!("wrote {} output rows to {outputs_path}", outputs.len());
    Ok(())
}
