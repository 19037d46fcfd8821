use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use tfgap::RecommenderConfig;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Terraform file to analyze (must end in .tf)
    pub file: PathBuf,

    /// Model used to generate recommendations
    #[arg(short, long, env = "TFGAP_MODEL")]
    pub model: String,

    /// Recommendation backend: ollama or openai
    #[arg(long, env = "TFGAP_BACKEND", default_value = "ollama")]
    pub backend: String,

    /// Override the backend base URL
    #[arg(long, env = "TFGAP_ENDPOINT")]
    pub endpoint: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Terraform-compatible binary used to dump provider schemas
    #[arg(long, env = "TFGAP_TERRAFORM_BIN", default_value = "terraform")]
    pub terraform_bin: String,

    /// Request timeout in seconds for the recommendation backend
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Print a coverage table to stderr after the report
    #[arg(long)]
    pub summary: bool,
}

impl Cli {
    pub fn recommender_config(&self) -> RecommenderConfig {
        RecommenderConfig {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}
