// src/log.rs
use tracing_subscriber::{fmt, fmt::time::uptime, EnvFilter};

/// Level for `-v` counts: 0 → info, 1 → debug, 2+ → trace.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. Lines carry time since start rather than
/// wall-clock time. `RUST_LOG` wins over `verbose` when set.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,eb_scrape={}", level_for(verbose))));

    // Already installed (tests, embedding): keep the existing one
    let _ = fmt()
        .with_env_filter(filter)
        .with_timer(uptime())
        .with_writer(std::io::stderr)
        .try_init();
}
