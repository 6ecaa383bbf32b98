use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use chatbot_client::{
    config::Config,
    input::{Command, parse_command},
    services::{chat_api::HttpChatApi, chat_session::ChatSession},
    state::Attachment,
    view::ChatView,
};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let session = ChatSession::new(HttpChatApi::new(config.api_url.clone()));
    let view = ChatView::new(config.pane_height);

    // Redraw on every transcript or busy change.
    let mut updates = session.subscribe();
    tokio::spawn(async move {
        print!("{CLEAR_SCREEN}{}", view.render(&updates.borrow_and_update()));
        while updates.changed().await.is_ok() {
            let snap = updates.borrow_and_update().clone();
            print!("{CLEAR_SCREEN}{}", view.render(&snap));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Attach(path) => match Attachment::from_path(path).await {
                Ok(file) => session.on_file_selected(file).await,
                Err(err) => warn!(path = %path, error = %err, "could not read attachment"),
            },
            // Only the reply wait runs in the background; the next line is
            // not read until this one is in the transcript.
            Command::Send(text) => match session.submit(text).await {
                Ok(in_flight) => {
                    tokio::spawn(in_flight.complete());
                }
                Err(outcome) => debug!(?outcome, "nothing sent"),
            },
        }
    }

    Ok(())
}
