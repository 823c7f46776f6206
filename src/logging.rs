use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming,
};
use std::path::Path;

/// Number of rotated log files kept next to the current one
pub const KEEP_LOG_FILES: usize = 7;

/// Starts the global logger.
///
/// `RUST_LOG` takes precedence over `level`. Without a directory, records go
/// to stderr in color. With one, they go to size-rotated files inside it.
/// Keep the returned handle alive for as long as logging is needed.
pub fn setup_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(level)?;
    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("hex_mcts"))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEEP_LOG_FILES),
            )
            .start(),
        None => logger.format(colored_default_format).start(),
    }
}
