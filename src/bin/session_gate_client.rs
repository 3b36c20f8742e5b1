use clap::Parser;
use session_gate::client::api::HttpAuthApi;
use session_gate::client::config::{BACKEND_URL_NOTICE, ClientConfig};
use session_gate::client::error::ClientError;
use session_gate::client::shell::{HELP, Shell};
use session_gate::client::storage::MemorySessionStorage;
use session_gate::infrastructure::logging::init_client_logging;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "session_gate_client",
    about = "Interactive client session for the session_gate API"
)]
struct Cli {
    /// API base URL; falls back to VITE_BACKEND_URL and friends.
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    dotenv::dotenv().ok();
    init_client_logging();
    let cli = Cli::parse();

    let config = match ClientConfig::resolve(cli.backend_url.as_deref()) {
        Ok(config) => config,
        Err(ClientError::MissingBackendUrl) => {
            println!("{BACKEND_URL_NOTICE}");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    info!(base_url = %config.base_url, "Client session started");

    let mut shell = Shell::new(HttpAuthApi::new(config)?, MemorySessionStorage::new());
    println!("{HELP}");

    let mut stdout = tokio::io::stdout();
    shell
        .run(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await?;

    // Session storage is dropped here along with the token.
    Ok(())
}
