use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger for the binaries.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output and the
/// default is warnings only, so solver stall warnings still reach stderr.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None);

    // Only fails when a logger is already installed
    let _ = builder.try_init();
}
