use std::fs::File;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `IME_LOG=ime_core=debug`.
pub const LOG_ENV: &str = "IME_LOG";
const DEFAULT_FILTER: &str = "ime_core=info";

static INIT: Once = Once::new();

/// Installs the global subscriber once. Logs go to `log_file` when given
/// (the stdio bridge owns stdout), otherwise to stderr.
pub fn init_logging(log_file: Option<&Path>) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

        match log_file.map(File::create) {
            Some(Ok(file)) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
            Some(Err(e)) => {
                builder.with_writer(std::io::stderr).init();
                tracing::warn!(error = %e, "could not open log file, logging to stderr");
            }
            None => builder.with_writer(std::io::stderr).init(),
        }
    });
}
