//! # Demo Harness Entry Point
//!
//! Drives the demo scenarios against a live server:
//!
//! 1. **Initialization**: Installs the log subscriber and parses arguments using [`cli::Cli`].
//! 2. **Connection**: Every scenario opens its own connection via `demo_core`.
//! 3. **Execution**: Runs the selected scenario (or all of them, in sequence).
//! 4. **Presentation**: Prints each report as text or JSON. Any scenario failure is fatal and
//!    ends the process with status 1, except in the probe which only logs failures.

mod cli;
mod formatter;

use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use demo_core::{
    config::{ClientConfig, ProbeOptions},
    connection::Connection,
    pb::{demo::CheckIps, hello::HelloRequest, sample::Location},
    report::ScenarioReport,
    scenarios::{self, ScenarioError, default_check_ips, default_locations},
};
use formatter::FormattedString;
use std::{future, process};
use tracing_subscriber::EnvFilter;

/// One fatal-on-error scenario with its request.
enum Scenario {
    Tick(HelloRequest),
    Batch(CheckIps),
    Upload(Vec<Location>),
    Pull,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Cli::parse();
    let config = args.client_config();
    let output = args.output;

    match args.command {
        Commands::Tick { name, age, adult } => {
            let request = HelloRequest {
                name,
                age,
                is_adult: adult,
            };
            run_scenario(&config, output, Scenario::Tick(request)).await;
        }
        Commands::Batch { check } => {
            run_scenario(&config, output, Scenario::Batch(check.into_request())).await;
        }
        Commands::Upload { lat, lon, count } => {
            let locations = (0..count).map(|_| Location { lat, lon }).collect();
            run_scenario(&config, output, Scenario::Upload(locations)).await;
        }
        Commands::Pull => run_scenario(&config, output, Scenario::Pull).await,
        Commands::Probe {
            check,
            interval,
            max_attempts,
        } => {
            let options = ProbeOptions {
                interval,
                max_attempts,
            };
            run_probe(&config, output, check.into_request(), options).await;
        }
        Commands::All => {
            let all = [
                Scenario::Tick(scenarios::default_hello_request()),
                Scenario::Batch(default_check_ips()),
                Scenario::Upload(default_locations(3)),
                Scenario::Pull,
            ];
            for scenario in all {
                run_scenario(&config, output, scenario).await;
            }
        }
    }
}

async fn execute(config: &ClientConfig, scenario: Scenario) -> Result<ScenarioReport, ScenarioError> {
    let connection = Connection::open(config).await?;

    let report = match scenario {
        Scenario::Tick(request) => ScenarioReport::Tick(scenarios::tick(connection, request).await?),
        Scenario::Batch(request) => {
            ScenarioReport::Batch(scenarios::batch(connection, request).await?)
        }
        Scenario::Upload(locations) => {
            ScenarioReport::Upload(scenarios::upload(connection, locations).await?)
        }
        Scenario::Pull => ScenarioReport::Download(scenarios::pull(connection).await?),
    };

    Ok(report)
}

async fn run_scenario(config: &ClientConfig, output: OutputFormat, scenario: Scenario) {
    match execute(config, scenario).await {
        Ok(report) => print_report(&report, output),
        Err(err) => {
            tracing::error!(address = %config.address, error = %err, "scenario aborted");
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

async fn run_probe(
    config: &ClientConfig,
    output: OutputFormat,
    request: CheckIps,
    options: ProbeOptions,
) {
    // The probe must survive a server that is down at start-up, so it never dials eagerly.
    let connection = match Connection::open_lazy(config) {
        Ok(connection) => connection,
        Err(err) => {
            tracing::error!(address = %config.address, error = %err, "probe aborted");
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for Ctrl-C, the probe will run until killed");
            future::pending::<()>().await;
        }
    };

    let summary = scenarios::probe(connection, request, options, shutdown).await;

    print_report(&ScenarioReport::Probe(summary), output);
}

fn print_report(report: &ScenarioReport, output: OutputFormat) {
    match output {
        OutputFormat::Text => println!("{}", FormattedString::from(report)),
        OutputFormat::Json => println!("{}", FormattedString::from(report.to_json())),
    }
}
