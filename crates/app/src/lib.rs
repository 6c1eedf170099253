pub mod editor_loop;
pub mod frame_input;
pub mod launch;
pub mod settings_file;
pub mod viewer;
pub mod window_config;

use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "Raycaster";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a map fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Installs the global subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    // A second call (tests, or a host that already installed one) keeps the first.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
