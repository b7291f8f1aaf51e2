mod display;
mod session;

use std::time::Duration;

use anyhow::Context;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use lemurkeeper_core::{AppState, CATEGORY_ALL, Sex};
use lemurkeeper_sync::{DEFAULT_ENDPOINT, LemurClient, RetryPolicy};
use tracing_subscriber::EnvFilter;

/// Browse the lemur collection served by a local endpoint.
#[derive(Parser, Debug)]
#[command(name = "lemurkeeper")]
#[command(about = "Zookeeper App: Lemur Manager")]
#[command(version)]
struct Cli {
    /// Base URL of the lemur endpoint; records are read from `<endpoint>/lemurs`
    #[arg(long, env = "LEMURKEEPER_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "LEMURKEEPER_TIMEOUT_SECS", default_value_t = 10, global = true)]
    timeout_secs: u64,

    /// Extra fetch attempts after a failure
    #[arg(long, env = "LEMURKEEPER_RETRIES", default_value_t = 2, global = true)]
    retries: u32,

    /// Delay between fetch attempts in milliseconds
    #[arg(long, env = "LEMURKEEPER_RETRY_DELAY_MS", default_value_t = 500, global = true)]
    retry_delay_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch once, print the filtered cards, and exit
    List {
        /// Case-insensitive substring of the name
        #[arg(short, long, default_value = "")]
        query: String,

        /// Sex to show, or All
        #[arg(short, long, default_value = CATEGORY_ALL, value_parser = category_parser())]
        category: String,
    },
    /// Interactive session: edit the filters and watch the list update
    Browse,
}

impl Cli {
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

fn category_parser() -> PossibleValuesParser {
    let mut values = vec![CATEGORY_ALL];
    values.extend(Sex::ALL.iter().map(|s| s.code()));
    PossibleValuesParser::new(values)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    tracing::info!("lemurkeeper v{}", env!("CARGO_PKG_VERSION"));

    let client = LemurClient::with_timeout(
        cli.endpoint.clone(),
        Duration::from_secs(cli.timeout_secs),
    )
    .context("building HTTP client")?;
    let policy = cli.retry_policy();
    let mut state = AppState::new();

    match cli.command {
        Command::List { query, category } => {
            let fetched = client
                .fetch_with_retry(policy)
                .await
                .with_context(|| format!("fetching {}", client.lemurs_url()))?;
            tracing::info!(attempts = fetched.attempts, "collection loaded");
            state.replace_lemurs(fetched.lemurs);
            state.set_query(query);
            state.set_category(category);

            let total = state.store().len();
            let visible = state.visible();
            let mut out = std::io::stdout().lock();
            display::print_cards(&mut out, &visible, total)?;
        }
        Command::Browse => {
            let stdin = std::io::stdin();
            session::run(
                &mut state,
                &client,
                policy,
                stdin.lock(),
                std::io::stdout().lock(),
            )
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["lemurkeeper", "list"]).unwrap();
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cli.timeout_secs, 10);
        assert_eq!(cli.retry_policy(), RetryPolicy::default());
        match cli.command {
            Command::List { query, category } => {
                assert_eq!(query, "");
                assert_eq!(category, "All");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn list_filters_and_global_endpoint() {
        let cli = Cli::try_parse_from([
            "lemurkeeper",
            "list",
            "--query",
            "Ran",
            "-c",
            "F",
            "--endpoint",
            "http://localhost:3000/",
            "--retries",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.endpoint, "http://localhost:3000/");
        assert_eq!(cli.retry_policy().max_attempts(), 1);
        match cli.command {
            Command::List { query, category } => {
                assert_eq!(query, "Ran");
                assert_eq!(category, "F");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn list_rejects_unoffered_category() {
        assert!(Cli::try_parse_from(["lemurkeeper", "list", "--category", "Old"]).is_err());
    }

    #[test]
    fn browse_parses() {
        let cli = Cli::try_parse_from(["lemurkeeper", "browse"]).unwrap();
        assert!(matches!(cli.command, Command::Browse));
    }
}
