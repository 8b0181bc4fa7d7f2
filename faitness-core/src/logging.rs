use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// HTTP and TLS internals that flood the output at debug level.
const CHATTY_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Installs the process-wide logger on stderr, so stdout stays free for the
/// CLI's JSON output. Later calls only adjust the level.
pub fn init_logger(level: LevelFilter) {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {} - {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Stderr)
        .filter_level(level);
    for target in CHATTY_TARGETS {
        builder.filter_module(target, dependency_level(level));
    }

    let _ = builder.try_init();

    log::set_max_level(level);
}

/// Dependencies never log below warn, whatever the crate's own level.
fn dependency_level(level: LevelFilter) -> LevelFilter {
    level.min(LevelFilter::Warn)
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("WARNING"), Some(LevelFilter::Warn));
        assert_eq!(parse_level(" trace "), Some(LevelFilter::Trace));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_dependencies_capped_at_warn() {
        assert_eq!(dependency_level(LevelFilter::Trace), LevelFilter::Warn);
        assert_eq!(dependency_level(LevelFilter::Info), LevelFilter::Warn);
        assert_eq!(dependency_level(LevelFilter::Error), LevelFilter::Error);
        assert_eq!(dependency_level(LevelFilter::Off), LevelFilter::Off);
    }
}
