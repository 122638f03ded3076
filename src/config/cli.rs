use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "grade-etl")]
#[command(about = "Aggregates term grades and writes approved/denied student reports")]
pub struct CliConfig {
    /// Directory holding the grade CSV files
    #[arg(long, default_value = super::DEFAULT_INPUT_DIR)]
    pub input_dir: String,

    /// Directory the reports are written to
    #[arg(long, default_value = super::DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Process only these files of the input directory, in this order
    #[arg(long, value_delimiter = ',')]
    pub input_files: Vec<String>,

    #[arg(long, default_value = super::DEFAULT_APPROVED_FILE)]
    pub approved_file: String,

    #[arg(long, default_value = super::DEFAULT_DENIED_FILE)]
    pub denied_file: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn input_dir(&self) -> &str {
        &self.input_dir
    }

    fn input_files(&self) -> &[String] {
        &self.input_files
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn approved_filename(&self) -> &str {
        &self.approved_file
    }

    fn denied_filename(&self) -> &str {
        &self.denied_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_dir", &self.input_dir)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_file_extensions("input_files", &self.input_files, &["csv"])?;
        validation::validate_file_name("approved_file", &self.approved_file)?;
        validation::validate_file_name("denied_file", &self.denied_file)?;
        validation::validate_distinct_outputs(&self.approved_file, &self.denied_file)
    }
}
