//! Startup configuration checks

use clouddrive_core::Config;

/// Warning text for missing required variables, if any.
pub fn missing_env_message(config: &Config) -> Option<String> {
    let missing = config.missing_required_vars();
    if missing.is_empty() {
        None
    } else {
        Some(format!(
            "Missing environment variables: {}. Please check your .env file",
            missing.join(", ")
        ))
    }
}

/// Log one warning naming every missing required variable.
pub fn warn_missing_env(config: &Config) {
    match missing_env_message(config) {
        Some(message) => tracing::warn!("{}", message),
        None => tracing::info!("All required environment variables are set"),
    }

    if config.is_production() && config.allows_any_origin() {
        tracing::warn!("CORS allows all origins in production");
    }
}
