//! itemsdb command-line client

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let matches = cli::command().get_matches();
    init_logging(matches.get_flag("json-logs"));

    let transport = commands::transport(&matches)?;
    debug!("Using items service at {}", transport.base_url());

    if let Some(output) = commands::run(&matches, transport)? {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
