mod output;
mod params;

use anyhow::{Context, Result};
use brokerwire_client::{ClientConfig, TcpClient};
use clap::Parser;

use crate::output::{print_client, print_rows, print_stream};
use crate::params::{Command, Params};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let params = Params::parse();
    let mut config = ClientConfig::load_or_default(params.config.as_ref())?;
    if let Some(address) = params.address {
        config.address = address;
    }
    // one-shot commands never live long enough to need pings
    config.heartbeat_interval_ms = 0;

    let client = TcpClient::connect(config.clone())
        .await
        .with_context(|| format!("connecting to {}", config.address))?;

    if let (Some(username), Some(password)) = (&params.username, &params.password) {
        let identity = client
            .login_user(username, password)
            .await
            .context("logging in")?;
        tracing::debug!("Logged in as user {}", identity.user_id);
    }

    let format = params.output;
    match params.command {
        Command::Ping => {
            client.ping().await?;
            println!("pong");
        }
        Command::Streams => print_rows(&client.get_streams().await?, format)?,
        Command::Stream { stream } => match client.get_stream(&stream).await? {
            Some(details) => print_stream(&details, format)?,
            None => anyhow::bail!("stream {} not found", stream),
        },
        Command::Topics { stream } => print_rows(&client.get_topics(&stream).await?, format)?,
        Command::Users => print_rows(&client.get_users().await?, format)?,
        Command::Clients => print_rows(&client.get_clients().await?, format)?,
        Command::Me => match client.get_me().await? {
            Some(details) => print_client(&details, format)?,
            None => anyhow::bail!("broker returned no session info"),
        },
        Command::Tokens => print_rows(&client.get_personal_access_tokens().await?, format)?,
    }

    client.close().await?;
    Ok(())
}
