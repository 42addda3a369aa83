//! Logging initialization.

/// Initializes `env_logger` from the `RUST_LOG` environment variable.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("voxcloud logging initialized");
    }
}
