//! Logging utilities for imagesc.
//!
//! Structured `tracing` helpers shared by the library and the `imagesc`
//! binary.

use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn, Dispatch, Level};
use uuid::Uuid;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Map the `verbose` option (0..=5) to a filter directive
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "off",
        1 => "error",
        2 => "warn",
        3 => "info",
        4 => "debug",
        _ => "trace",
    }
}

/// Whether events at `level` pass the `verbose` option
pub fn verbosity_allows(verbose: u8, level: Level) -> bool {
    level_for_verbosity(verbose)
        .parse::<LevelFilter>()
        .map_or(false, |filter| level <= filter)
}

/// Run `f`, discarding the events it emits unless `verbose` admits `level`.
pub fn with_verbosity<F, R>(verbose: u8, level: Level, f: F) -> R
where
    F: FnOnce() -> R,
{
    if verbosity_allows(verbose, level) {
        f()
    } else {
        tracing::dispatcher::with_default(&Dispatch::none(), f)
    }
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let run_id = Uuid::new_v4();

    debug!(
        operation = operation,
        run_id = %run_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        run_id = %run_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log the shape and value range of a loaded matrix
pub fn log_matrix_stats(source: &str, rows: usize, cols: usize, range: Option<(f64, f64)>) {
    let (min, max) = range.unwrap_or((f64::NAN, f64::NAN));
    info!(
        operation = "data_load",
        source = source,
        rows = rows,
        cols = cols,
        cells = rows * cols,
        min = min,
        max = max,
        "Matrix loaded successfully"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::ImagescError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

/// Generate a unique run ID
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}
