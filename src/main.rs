use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::{info, warn};

mod config;
mod dashboard;
mod engine;
mod error;
mod records;
mod report;
mod sources;

use config::Config;
use dashboard::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    // Load every source once; a failed source is skipped unless all of them fail
    let (tables, load_report) = sources::load_all(&config.sources, &config.sheet)?;
    let records = records::normalize_all(&tables);
    info!(
        "Loaded {} record(s) from {} of {} source(s)",
        records.len(),
        load_report.loaded.len(),
        config.sources.len()
    );

    if config.serve {
        let app = dashboard::router(AppState {
            records,
            report: load_report,
        });
        let addr: SocketAddr = config.dashboard_addr.parse()?;
        info!("Dashboard listening on http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;
        return Ok(());
    }

    let models = engine::model_names(&records);
    let model_name = match &config.model {
        Some(model) => {
            if !models.contains(model) {
                warn!("Model '{}' not found; available: {:?}", model, models);
            }
            model.clone()
        }
        None => models
            .first()
            .cloned()
            .context("Sources loaded but contained no records")?,
    };

    let query = config.query(model_name);
    let evaluation = engine::evaluate(&records, &query);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print!("{}", report::render(&evaluation, config.show_records));
    }

    Ok(())
}
