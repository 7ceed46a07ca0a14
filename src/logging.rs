use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Overrides the verbosity flags, e.g. `POWERREACH_LOG=powerreach=debug`.
pub const LOG_ENV: &str = "POWERREACH_LOG";

fn fallback_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    }
}

/// Logs go to stderr so rendered reports on stdout stay parseable.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!("powerreach={}", fallback_level(verbose, quiet)))
    });

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
    if let Err(err) = result {
        eprintln!("warning: logging unavailable: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(fallback_level(0, false), "warn");
        assert_eq!(fallback_level(1, false), "info");
        assert_eq!(fallback_level(2, false), "debug");
        assert_eq!(fallback_level(5, false), "debug");
        assert_eq!(fallback_level(0, true), "error");
    }
}
