use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the inkpost binary.
#[derive(Debug, Parser)]
#[command(name = "inkpost", version, about = "Inkpost blogging service")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "INKPOST_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP service.
    Serve(Box<ServeArgs>),
    /// Print the image filter catalog as JSON.
    Filters,
    /// Run a feed query over the sample posts and print the result as JSON.
    Query(QueryArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the simulated backend latency applied to workflow actions.
    #[arg(long = "workflow-latency-ms", value_name = "MILLIS")]
    pub workflow_latency_ms: Option<u64>,

    /// Override the maximum request size for uploads in bytes.
    #[arg(long = "uploads-max-request-bytes", value_name = "BYTES")]
    pub uploads_max_request_bytes: Option<u64>,

    /// Override how long an unused session is kept.
    #[arg(long = "session-idle-timeout-seconds", value_name = "SECONDS")]
    pub session_idle_timeout_seconds: Option<u64>,

    /// Toggle loading the sample posts at startup.
    #[arg(
        long = "seed",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub seed: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct QueryArgs {
    /// Case-insensitive search term matched against title, excerpt and tags.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Category label, or `All`.
    #[arg(long, default_value = "All")]
    pub category: String,

    /// newest | oldest | popular
    #[arg(long, default_value = "newest")]
    pub sort: String,
}
