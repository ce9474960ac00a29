//! Log setup for binaries. The library itself only emits through `log`.

use env_logger::Env;

/// Install `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
/// Safe to call more than once.
pub fn init() {
    init_with_default("info");
}

pub fn init_with_default(level: &str) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
