mod load;
mod types;

pub use load::{get_errscan_data_dir, load_default, load_from};
pub use types::{AppConfig, ColorMode, LoggingConfig, OutputFormat, ScanConfig};
