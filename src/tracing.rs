//! Logging setup
//!
//! Console output is filtered by `RUST_LOG` (default `warn`) and goes to
//! stderr so it never mixes with command output. Useful targets:
//! - `RUST_LOG=history=debug` - commits, undo and redo as they happen
//! - `RUST_LOG=gridedit::history=trace` - every applied command
//! - `RUST_LOG=message=debug,status=debug` - each processed message and the status it left
//!
//! A debug-level copy of gridedit's own logs is written to
//! `~/.config/gridedit/logs/gridedit.log`, rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE: &str = "gridedit.log";

/// Targets the log file records at debug level; other crates stay at warn
const FILE_DIRECTIVES: &str = "warn,gridedit=debug,history=debug,message=debug,status=debug";

/// Install the console and log file subscribers
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => Some(
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(logs_dir, LOG_FILE))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new(FILE_DIRECTIVES)),
        ),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
