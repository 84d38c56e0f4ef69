const LOG_FORMAT_ENV: &str = "EVENT_SCRAPE_LOG_FORMAT";

/// Initialize tracing on stderr so stdout carries only the JSON record.
/// - Filter from `RUST_LOG`, `warn` when unset
/// - `EVENT_SCRAPE_LOG_FORMAT=json` for JSON log lines
pub fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => {
            let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
        }
        _ => {
            let _ = builder.with(fmt_layer.compact()).try_init();
        }
    }
}
