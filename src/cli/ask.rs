//! One-shot "ask" command

use std::error::Error;

use crate::api::ApiClient;
use crate::core::session::{ChatSession, SendOutcome};

/// Send a single prompt and print the reply to stdout.
///
/// Runs the same session state machine as the interactive loop so the
/// disabled and failure renditions match the chat screen exactly.
pub async fn run_ask(prompt: Vec<String>) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: contextiq ask <prompt>");
        std::process::exit(1);
    }

    let mut session = ChatSession::new(ApiClient::from_env());
    let outcome = session.submit(&prompt).await;

    let reply = session.last_assistant_text().unwrap_or_default();
    match outcome {
        SendOutcome::Resolved => {
            println!("{reply}");
            Ok(())
        }
        SendOutcome::Disabled | SendOutcome::Failed => {
            eprintln!("{reply}");
            std::process::exit(1);
        }
        SendOutcome::Ignored => Ok(()),
    }
}
