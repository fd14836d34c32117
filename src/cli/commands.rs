use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "wcag-reports", version, about = "Accessibility conformance report backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen port (overrides config)
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Listen address (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database path (overrides config)
    #[arg(long, env = "DB_PATH")]
    pub db: Option<String>,

    /// Comma-separated host names allowed by CORS (overrides config)
    #[arg(long, env = "CORS_ALLOWED_ORIGIN", value_delimiter = ',')]
    pub cors_allowed_origin: Option<Vec<String>>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
