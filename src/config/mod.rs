mod io;
mod types;

pub use io::read_config_file;
pub use types::{
    default_max_staleness_days, default_rate_pause_seconds, default_suppression_label,
    ConfigError, FileConfig, RunConfig,
};
