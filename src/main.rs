mod api;
mod common;
mod config;
mod network;
mod storage;
mod ui;

use std::error::Error;

use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::net::TcpListener;

use api::ApiState;
use common::{NewMessage, SessionIdentity};
use config::AppConfig;
use network::ApiClient;
use storage::{ClientDatabase, MessageStore};
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "web_chat",
    version,
    about = "Minimal chat: HTTP message API and polling desktop client"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Base URL of the chat server (clients only)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Run the message API server
    Server {
        /// Listen address, e.g. 0.0.0.0:3000
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Print every message once and exit
    List,
    /// Post one message and exit
    Send {
        content: String,
        /// Display name; defaults to the stored username
        #[arg(long)]
        sender: Option<String>,
    },
    /// Show, change or forget this device's username
    Identity {
        /// New username; empty falls back to "Anonymous"
        name: Option<String>,
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(server) = cli.server {
        app_config.server_url = server;
    }

    let result = match cli.mode {
        Some(Mode::Server { bind }) => {
            if let Some(bind) = bind {
                app_config.bind_address = bind;
            }
            run_server(&app_config).await
        }
        Some(Mode::List) => run_list(&app_config).await,
        Some(Mode::Send { content, sender }) => run_send(&app_config, content, sender).await,
        Some(Mode::Identity { name, clear }) => run_identity(&app_config, name, clear),
        None => run_full_client(app_config),
    };

    if let Err(err) = &result {
        log::error!("web_chat terminated: {err}");
    }
    result
}

async fn run_server(app_config: &AppConfig) -> Result<(), Box<dyn Error>> {
    storage::ensure_parent_dir(&app_config.database_path)?;
    let store = MessageStore::with_path(&app_config.database_path)?;
    log::info!(
        "Message store opened at {} ({} messages)",
        app_config.database_path,
        store.count()?
    );

    let allow_origin = HeaderValue::from_str(&app_config.cors_allow_origin)?;
    if app_config.cors_allow_origin == "*" {
        log::warn!("CORS allows any origin; restrict cors_allow_origin outside a demo");
    }

    let app = api::router(ApiState::new(store), allow_origin);
    let listener = TcpListener::bind(app_config.bind_address.as_str()).await?;
    log::info!("Chat API listening on {}", listener.local_addr()?);

    api::serve(listener, app).await?;
    Ok(())
}

async fn run_list(app_config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let api = ApiClient::new(&app_config.server_url);
    for message in api.list_messages().await? {
        println!(
            "[{}] {}: {}",
            message.local_time(),
            message.sender,
            message.content
        );
    }
    Ok(())
}

async fn run_send(
    app_config: &AppConfig,
    content: String,
    sender: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let sender = match sender {
        Some(name) => SessionIdentity::from_input(&name),
        None => stored_identity(app_config).unwrap_or_else(SessionIdentity::anonymous),
    };

    let api = ApiClient::new(&app_config.server_url);
    let created = api
        .send_message(&NewMessage {
            content,
            sender: sender.as_str().to_string(),
        })
        .await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

fn stored_identity(app_config: &AppConfig) -> Option<SessionIdentity> {
    ClientDatabase::with_path(&app_config.client_database_path)
        .and_then(|db| db.load_identity())
        .unwrap_or_else(|err| {
            log::warn!("Failed to read stored username: {err}");
            None
        })
}

fn run_identity(
    app_config: &AppConfig,
    name: Option<String>,
    clear: bool,
) -> Result<(), Box<dyn Error>> {
    storage::ensure_parent_dir(&app_config.client_database_path)?;
    let client_db = ClientDatabase::with_path(&app_config.client_database_path)?;

    if clear {
        client_db.clear_identity()?;
        println!("Username cleared");
        return Ok(());
    }

    if let Some(name) = name {
        client_db.save_identity(&SessionIdentity::from_input(&name))?;
    }
    match client_db.load_identity()? {
        Some(identity) => println!("Posting as: {identity}"),
        None => println!("No username set"),
    }
    Ok(())
}

fn run_full_client(app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    storage::ensure_parent_dir(&app_config.client_database_path)?;
    let client_db = ClientDatabase::with_path(&app_config.client_database_path)?;

    // Read path + write path chạy ngầm trên tokio
    let api = ApiClient::new(&app_config.server_url);
    let channels = network::spawn_client(api, app_config.poll_interval());

    // UI chạy trên Main Thread
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Real-Time Chat",
        options,
        Box::new(move |cc| {
            log::info!("Client started against {}", app_config.server_url);

            Ok(Box::new(ChatApp::new(cc, client_db, channels)))
        }),
    )?;
    Ok(())
}
