use std::time::Duration;

use oidc_settings::{ConfigResolver, Configurator, EnvSettings, Property, RemoteDiscovery, Setting};

// Python-style level names are accepted too, since LOG_LEVEL is shared with
// the rest of the deployment.
fn log_level() -> String {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    match level.to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        other => other.to_string(),
    }
}

fn setup_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level()))
        .or_else(|_| EnvFilter::try_new("info"))?;

    let config = tracing_subscriber::registry().with(filter_layer);

    if atty::is(atty::Stream::Stdout) {
        config.with(fmt::layer().pretty()).init();
    } else {
        config.with(fmt::layer().json()).init();
    }

    Ok(())
}

fn discovery() -> RemoteDiscovery {
    let timeout = std::env::var("OIDC_DISCOVERY_TIMEOUT_SECS")
        .ok()
        .and_then(|secs| secs.parse::<u64>().ok());

    match timeout {
        Some(secs) => RemoteDiscovery::new().with_timeout(Duration::from_secs(secs)),
        None => RemoteDiscovery::new(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env file is fine
    dotenv::dotenv().ok();
    setup_tracing()?;

    let resolver = ConfigResolver::new(EnvSettings::from_env(), discovery());

    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        names = Setting::ALL
            .iter()
            .map(|setting| setting.name().to_string())
            .collect();
    }

    for name in names {
        let secret = name
            .parse::<Setting>()
            .map(|setting| setting.is_secret())
            .unwrap_or(false);

        match resolver.get_property(&name).await? {
            Property::Unknown => println!("{name}: unknown property"),
            Property::Found(None) => println!("{name}="),
            Property::Found(Some(_)) if secret => println!("{name}=<redacted>"),
            Property::Found(Some(value)) => println!("{name}={value}"),
        }
    }

    Ok(())
}
