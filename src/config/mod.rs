#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_INPUT_DIR: &str = "./in";
pub const DEFAULT_OUTPUT_DIR: &str = "./out";
pub const DEFAULT_APPROVED_FILE: &str = "approved.csv";
pub const DEFAULT_DENIED_FILE: &str = "denied.csv";
