//! linechat client - line-oriented TCP chat
//!
//! Connects to a chat server, identifies with `HELLO <pseudo>`, then relays
//! lines between the terminal and the server until either side closes.

use std::process::ExitCode;

use tokio::io::AsyncWriteExt;

use linechat_utils::{init_logging_with_config, LinechatError, LogConfig, Result};

mod cli;
mod config;
mod connection;
mod session;

use cli::Args;
use config::ClientConfig;
use connection::connect_to;
use session::{Session, SessionEnd};

fn main() -> ExitCode {
    // Parse command-line arguments first (usage errors exit 1)
    let args = Args::parse_args();

    // A config file named on the command line must load; the default one may not
    let (config, config_warning) = match ClientConfig::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) if args.config.is_none() => (ClientConfig::default(), Some(e)),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_config = if args.debug {
        LogConfig::development()
    } else {
        LogConfig::client_with_default(config.log_filter.as_deref().unwrap_or("warn"))
    };
    if let Err(e) = init_logging_with_config(log_config) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    if let Some(e) = config_warning {
        tracing::warn!("Ignoring config file: {}", e);
    }

    tracing::info!("linechat client starting");
    tracing::debug!("CLI args: {:?}", args);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {}", LinechatError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run_app(args, config));

    // Terminal reads block a helper thread that cannot be cancelled; don't wait on it
    runtime.shutdown_background();

    match result {
        Ok(end) => {
            tracing::info!(?end, "linechat client exiting normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("linechat client error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app(args: Args, config: ClientConfig) -> Result<SessionEnd> {
    let stream = connect_to(&args.host, &args.port).await?;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("Connected to {}:{}\n", args.host, args.port).as_bytes())
        .await?;
    stdout.flush().await?;

    let pseudo = config.resolve_pseudo(args.pseudo);
    let mut session = Session::new(stream, tokio::io::stdin(), stdout);
    let result = session.run(pseudo.as_deref()).await;
    tracing::debug!(state = ?session.state(), "session finished");
    result
}
