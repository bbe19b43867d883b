//! Device-side CLI for the keyword subscription service.
//!
//! Resolves the device token from the push gateway, then calls the
//! subscription API with it. This is the same flow the mobile client
//! follows: identity first, registry second.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use identity_client::IdentityClient;
use std::time::Duration;
use urlencoding::encode;

#[derive(Parser)]
#[command(
    name = "subctl",
    about = "Manage keyword subscriptions for this device",
    version
)]
struct Cli {
    /// Subscription service base URL
    #[arg(long, env = "SUBSCRIPTION_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Push gateway base URL used to resolve the device token
    #[arg(long, env = "IDENTITY_URL", default_value = "http://localhost:9098")]
    identity_url: String,

    /// Use this device token instead of asking the push gateway
    #[arg(long, env = "DEVICE_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subscribe this device to a keyword
    Subscribe { keyword: String },
    /// Remove this device's subscription to a keyword
    Unsubscribe { keyword: String },
    /// List keywords this device is subscribed to
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let token = resolve_token(&cli).await?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("Failed to create HTTP client")?;

    match &cli.command {
        Commands::Subscribe { keyword } => {
            let response = client
                .post(format!("{}/v1/subscriptions", cli.api_url))
                .json(&serde_json::json!({ "keyword": keyword, "token": token }))
                .send()
                .await
                .context("Subscription service unreachable")?;
            check(response).await?;
            println!("Subscribed to '{}'", keyword);
        }
        Commands::Unsubscribe { keyword } => {
            let response = client
                .delete(format!("{}/v1/subscriptions", cli.api_url))
                .json(&serde_json::json!({ "keyword": keyword, "token": token }))
                .send()
                .await
                .context("Subscription service unreachable")?;
            check(response).await?;
            println!("Unsubscribed from '{}'", keyword);
        }
        Commands::List => {
            let response = client
                .get(format!("{}/v1/subscriptions/{}", cli.api_url, encode(&token)))
                .send()
                .await
                .context("Subscription service unreachable")?;
            let body: serde_json::Value = check(response).await?;
            let keywords = body["keywords"].as_array().cloned().unwrap_or_default();
            if keywords.is_empty() {
                println!("No subscriptions for this device");
            } else {
                println!("Subscriptions ({}):", keywords.len());
                for keyword in keywords {
                    println!("  {}", keyword.as_str().unwrap_or_default());
                }
            }
        }
    }

    Ok(())
}

/// Resolve the device token: explicit flag wins, otherwise ask the push
/// gateway. Tokens rotate, so no value is cached between runs.
async fn resolve_token(cli: &Cli) -> Result<String> {
    if let Some(token) = &cli.token {
        return Ok(token.clone());
    }

    let identity = IdentityClient::new(&cli.identity_url, Duration::from_secs(10))
        .context("Failed to create identity client")?;
    identity
        .current_token()
        .await
        .context("Identity provider unavailable")
}

/// Parse a response body, turning API error payloads into readable errors.
async fn check(response: reqwest::Response) -> Result<serde_json::Value> {
    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .unwrap_or(serde_json::Value::Null);

    if !status.is_success() {
        let code = body["code"].as_str().unwrap_or("UNKNOWN");
        let error = body["error"].as_str().unwrap_or("no details");
        bail!("{} ({}): {}", status, code, error);
    }

    Ok(body)
}
