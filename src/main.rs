use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, Subcommand};

use askchat::app::App;
use askchat::logging::{self, LogDestination};
use askchat::message::MessageKind;
use askchat::{handler, tui, ui, ChatController, Config, HttpAnswerClient};

#[derive(Parser)]
#[command(name = "askchat", version)]
#[command(about = "Terminal chat client for a question-answering service")]
struct Cli {
    /// Base URL of the answering service
    #[arg(long, global = true, env = "ASKCHAT_ENDPOINT")]
    endpoint: Option<String>,
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat (default)
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// Your question
        question: String,
    },
    /// Check that the service is up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Chat);

    let destination = match command {
        Commands::Chat => LogDestination::File(logging::default_log_path()),
        _ => LogDestination::Stderr,
    };
    logging::init(cli.verbose, destination)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let endpoint = config.endpoint(cli.endpoint.as_deref());
    let client = HttpAnswerClient::new(&endpoint, config.request_timeout())?;
    tracing::info!(%endpoint, "using answering service");

    match command {
        Commands::Chat => run_chat(client, &endpoint).await,
        Commands::Ask { question } => ask_once(client, &question).await,
        Commands::Health => check_health(&client).await,
    }
}

async fn run_chat(client: HttpAnswerClient, endpoint: &str) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(ChatController::new(client), endpoint, events.sender());

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;
            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event)?,
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    result
}

async fn ask_once(client: HttpAnswerClient, question: &str) -> Result<()> {
    let mut controller = ChatController::new(client);
    controller.input_mut().set(question);
    if !controller.ask().await {
        bail!("question is empty");
    }

    let mut failed = false;
    for msg in controller.log().messages() {
        println!("{} {}", msg.role.label(), msg.text);
        match &msg.kind {
            MessageKind::Answer { source } => println!("     Source: {source}"),
            MessageKind::Error => failed = true,
            _ => {}
        }
    }

    if failed {
        bail!("no answer from {}", controller.client().ask_url());
    }
    Ok(())
}

async fn check_health(client: &HttpAnswerClient) -> Result<()> {
    match client.health().await {
        Ok(status) => {
            println!("{}: {}", client.base_url(), status);
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = ?e, "health check failed");
            bail!("{} is not reachable: {e}", client.base_url())
        }
    }
}
