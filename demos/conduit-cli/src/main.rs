//! Command-line Conduit client.
//!
//! Connection settings come from flags or the environment:
//!
//!   CONDUIT_HOST=https://phab.example.com CONDUIT_USER=alice CONDUIT_CERT=... \
//!     cargo run -p conduit-example-cli -- lookup T1 D1
//!
//!   echo 'fn main() {}' | cargo run -p conduit-example-cli -- paste create --language rust

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conduit_client::{Dialer, PasteCreateParams, PasteQueryParams};
use std::io::Read;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "conduit",
    about = "Talk to a Conduit API from the command line"
)]
struct Cli {
    /// Server URL, e.g. https://phab.example.com
    #[arg(long, env = "CONDUIT_HOST")]
    host: String,
    #[arg(long, env = "CONDUIT_USER")]
    user: Option<String>,
    /// Conduit certificate of the user.
    #[arg(long, env = "CONDUIT_CERT", hide_env_values = true)]
    cert: Option<String>,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the server's capabilities.
    Capabilities,
    /// Resolve object names (T1, D42, @alice) to PHIDs.
    Lookup { names: Vec<String> },
    /// Describe objects by PHID.
    Query { phids: Vec<String> },
    #[command(subcommand)]
    Paste(PasteCommand),
    /// Call any method with JSON params.
    Call {
        method: String,
        /// JSON object; omitted means the call takes no params.
        params: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum PasteCommand {
    /// Create a paste from stdin.
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        language: Option<String>,
    },
    /// List pastes.
    Query {
        #[arg(long = "id")]
        ids: Vec<u64>,
        #[arg(long = "author")]
        authors: Vec<String>,
        #[arg(long)]
        offset: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("conduit_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let dialer = Dialer::new()
        .client_name("conduit-cli")
        .timeout(Duration::from_secs(cli.timeout));

    let mut conn = dialer.dial(&cli.host).await?;
    if !matches!(cli.command, Command::Capabilities) {
        let user = cli.user.context("--user or CONDUIT_USER is required")?;
        let cert = cli.cert.context("--cert or CONDUIT_CERT is required")?;
        conn.connect(&user, &cert).await?;
    }

    match cli.command {
        Command::Capabilities => print_json(conn.capabilities())?,
        Command::Lookup { names } => print_json(&conn.phid_lookup(names).await?)?,
        Command::Query { phids } => print_json(&conn.phid_query(phids).await?)?,
        Command::Paste(PasteCommand::Create { title, language }) => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("reading paste content from stdin")?;
            let params = PasteCreateParams {
                content,
                title,
                language,
            };
            let item = conn.paste_create(&params).await?;
            println!("{} {}", item.object_name, item.uri);
        }
        Command::Paste(PasteCommand::Query {
            ids,
            authors,
            offset,
            limit,
        }) => {
            let params = PasteQueryParams {
                ids,
                author_phids: authors,
                offset,
                limit,
                ..PasteQueryParams::default()
            };
            for item in conn.paste_query(&params).await? {
                println!(
                    "{}\t{}\t{}",
                    item.object_name,
                    item.language.as_deref().unwrap_or("-"),
                    item.title.as_deref().unwrap_or("(untitled)")
                );
            }
        }
        Command::Call { method, params } => {
            let params: Option<serde_json::Value> = params
                .map(|p| serde_json::from_str(&p))
                .transpose()
                .context("params must be JSON")?;
            let result: serde_json::Value = conn.invoke(&method, params.as_ref()).await?;
            print_json(&result)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
