use clap::Parser;
use std::path::PathBuf;

/// CareOrbit - multi-agent care coordination service
#[derive(Parser, Debug, Clone)]
#[command(name = "careorbit", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "CAREORBIT_CONFIG", default_value = "careorbit.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "CAREORBIT_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "CAREORBIT_PORT")]
    pub port: Option<u16>,

    /// Seed the store with the demo patient
    #[arg(long, env = "CAREORBIT_DEMO_DATA", num_args = 0..=1, default_missing_value = "true")]
    pub demo_data: Option<bool>,
}
