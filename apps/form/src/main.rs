use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use applicant_form::address::{FileSource, HttpSource, Prefill, ReferenceSource};
use applicant_form::config::Config;
use applicant_form::ApplicationForm;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the rendered form.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting applicant form v{}", env!("CARGO_PKG_VERSION"));

    let source = build_source(&config)?;
    info!("Reference data source: {}", source.describe());

    let prefill = match &config.prefill_json {
        Some(raw) => Prefill::from_json(raw).context("FORM_PREFILL must be a JSON object")?,
        None => Prefill::default(),
    };

    let mut form = ApplicationForm::standard();
    let restored = form.start(source.as_ref(), &prefill).await;
    info!(
        ?restored,
        fields = form.form_data().len(),
        "Form ready"
    );

    println!("{}", form.document().to_html());
    Ok(())
}

/// A local file when `REFERENCE_DATA_FILE` is set, otherwise HTTP.
fn build_source(config: &Config) -> Result<Box<dyn ReferenceSource>> {
    if let Some(path) = &config.reference_data_file {
        return Ok(Box::new(FileSource::new(path)));
    }
    let source = HttpSource::new(
        config.reference_data_url(),
        Duration::from_secs(config.fetch_timeout_secs),
    )?;
    Ok(Box::new(source))
}
