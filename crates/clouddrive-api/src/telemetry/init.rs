use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize console tracing.
///
/// `RUST_LOG` overrides the default filter. Production uses JSON lines so log
/// shippers get structured fields; other environments use the compact format.
pub fn init_telemetry(environment: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "clouddrive_api=debug,clouddrive_storage=debug,tower_http=debug".into()
    });

    let production = matches!(environment.to_lowercase().as_str(), "production" | "prod");

    if production {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        tracing_subscriber::registry()
            .with(filter)
            .with(console_fmt)
            .try_init()?;
    }

    tracing::debug!(environment = %environment, "Tracing initialized");
    Ok(())
}
