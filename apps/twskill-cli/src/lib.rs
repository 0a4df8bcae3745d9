pub mod context;
pub mod format;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use twskill_core::Package;

pub fn parse_package(s: &str) -> Result<Package, String> {
    s.parse().map_err(|e: twskill_core::Error| e.to_string())
}

/// Log to stderr; `RUST_LOG` wins over the `-v` count.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info,twskill_core=debug,twskill_text=debug,twskill_recommend=debug",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
