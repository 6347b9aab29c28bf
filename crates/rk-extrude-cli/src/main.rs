//! RK extrusion command entry point

use std::process::ExitCode;

use clap::Parser;

mod args;
mod dispatch;
mod picker;
mod scene;

fn main() -> anyhow::Result<ExitCode> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rk_extrude=info,rk_extrude_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = args::Cli::parse();
    let succeeded = dispatch::run(&cli, &mut std::io::stdout().lock())?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
