use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use muse_cli::core::{AppEvent, FileAttachment, MessageRole, NotificationLevel};
use muse_cli::{create_backend, ChatController, ChatMode, Config};

#[derive(Parser)]
#[command(name = "muse")]
#[command(author, version, about = "Muse - multimodal AI chat assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session
    Chat {
        /// Initial message to send
        message: Option<String>,

        /// Backend to use (puter, mock)
        #[arg(short, long)]
        backend: Option<String>,

        /// Starting mode (text, image-analysis, image-generation)
        #[arg(short, long)]
        mode: Option<ChatMode>,
    },

    /// Print the configuration file path
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "muse_cli=debug" } else { "muse_cli=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Chat {
            message,
            backend,
            mode,
        } => run_chat(message, backend, mode).await,
        Commands::ConfigPath => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

async fn run_chat(
    initial_message: Option<String>,
    backend_name: Option<String>,
    mode: Option<ChatMode>,
) -> Result<()> {
    let config = Config::load()?;
    let backend_name = backend_name.unwrap_or_else(|| config.chat.default_backend.clone());
    let backend = create_backend(&backend_name, &config)?;

    let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
    let controller = ChatController::new(backend).with_events(events_tx);

    // Print assistant output and notifications as they arrive.
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            match event {
                AppEvent::MessageAdded(msg) if msg.role == MessageRole::Assistant => {
                    println!("assistant> {}", msg.content);
                    if let Some(att) = msg.attachment {
                        println!("           [image: {}]", att.url);
                    }
                }
                AppEvent::Notify(n) => {
                    let tag = match n.level {
                        NotificationLevel::Info => "info",
                        NotificationLevel::Warning => "warn",
                        NotificationLevel::Error => "error",
                    };
                    eprintln!("[{}] {}: {}", tag, n.title, n.description);
                }
                _ => {}
            }
        }
    });

    // Replay the seeded welcome message, which predates the event channel.
    for msg in controller.snapshot().messages() {
        println!("assistant> {}", msg.content);
    }

    if let Some(mode) = mode {
        controller.change_mode(mode);
    }
    if let Some(message) = initial_message {
        controller.send_message(&message, None).await;
    }
    tokio::task::yield_now().await;

    println!("Commands: /mode <text|image-analysis|image-generation>, /attach <path>, /quit");

    let mut staged_attachment: Option<FileAttachment> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();

        if let Some(rest) = line.strip_prefix('/') {
            let mut parts = rest.splitn(2, ' ');
            match (parts.next().unwrap_or(""), parts.next()) {
                ("quit", _) | ("exit", _) => break,
                ("mode", Some(name)) => {
                    let mode: ChatMode = name.trim().parse().unwrap_or_default();
                    controller.change_mode(mode);
                }
                ("attach", Some(path)) => {
                    let attachment = FileAttachment::from_path(path.trim());
                    println!("staged attachment: {}", attachment.name);
                    staged_attachment = Some(attachment);
                }
                _ => println!("unknown command: /{}", rest),
            }
        } else {
            controller.send_message(&line, staged_attachment.take()).await;
        }
        // Let the printer flush before the next prompt.
        tokio::task::yield_now().await;
    }

    // Dropping the controller closes the event channel and ends the printer.
    drop(controller);
    let _ = printer.await;
    Ok(())
}
