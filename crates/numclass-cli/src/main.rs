use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use numclass_lib::{
    classify, ClassificationError, FactProvider, NumbersApiClient, NumbersApiConfig,
    OfflineFacts, ParseOptions, DEFAULT_NUMBERS_API_BASE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Number classification utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a number and print the result as JSON.
    Classify {
        /// Number to classify, exactly as it would appear in the query string.
        #[arg(allow_hyphen_values = true)]
        number: String,
        /// Skip the trivia lookup and use the fallback fact.
        #[arg(long)]
        offline: bool,
        /// Reject decimal input instead of truncating it.
        #[arg(long = "no-decimal")]
        no_decimal: bool,
        /// Numbers API base URL.
        #[arg(long = "api-url", default_value = DEFAULT_NUMBERS_API_BASE)]
        api_url: String,
        /// Trivia request timeout in milliseconds.
        #[arg(long = "timeout-ms", default_value_t = 3_000)]
        timeout_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Classify {
            number,
            offline,
            no_decimal,
            api_url,
            timeout_ms,
        } => {
            let options = if no_decimal {
                ParseOptions::strict()
            } else {
                ParseOptions::default()
            };
            let provider: Box<dyn FactProvider> = if offline {
                Box::new(OfflineFacts)
            } else {
                let config = NumbersApiConfig::default()
                    .with_base_url(api_url)
                    .with_timeout(Duration::from_millis(timeout_ms));
                Box::new(
                    NumbersApiClient::new(config).context("failed to build Numbers API client")?,
                )
            };
            handle_classify(&number, &options, provider.as_ref()).await
        }
    }
}

async fn handle_classify(
    number: &str,
    options: &ParseOptions,
    provider: &dyn FactProvider,
) -> Result<()> {
    match classify(Some(number), options, provider).await {
        Ok(result) => {
            let json = serde_json::to_string_pretty(&result).context("failed to encode result")?;
            println!("{}", json);
            Ok(())
        }
        Err(err) => {
            let body = ClassificationError::from(&err);
            let json = serde_json::to_string_pretty(&body).context("failed to encode error")?;
            println!("{}", json);
            bail!(err)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
