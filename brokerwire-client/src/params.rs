use std::path::PathBuf;

use brokerwire_protocol::Identifier;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "brokerwire", about = "Inspect a broker over its TCP protocol")]
pub struct Params {
    /// TOML file with client settings; flags override it.
    #[arg(long, env = "BROKERWIRE_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "BROKERWIRE_ADDRESS")]
    pub address: Option<String>,

    #[arg(long, env = "BROKERWIRE_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "BROKERWIRE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Round-trip a ping.
    Ping,
    /// List streams.
    Streams,
    /// Show one stream and its topics.
    Stream { stream: Identifier },
    /// List topics of a stream.
    Topics { stream: Identifier },
    /// List users.
    Users,
    /// List connected clients.
    Clients,
    /// Show the session's own client.
    Me,
    /// List personal access tokens.
    Tokens,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}
