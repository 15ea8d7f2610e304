//! Interactive line-based chat loop

use std::error::Error;
use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::ApiClient;
use crate::core::session::{ChatSession, DISABLED_PLACEHOLDER};

pub async fn run_chat() -> Result<(), Box<dyn Error>> {
    let client = ApiClient::from_env();
    match client.backend().base_url() {
        Some(base) => println!("Backend: {base}"),
        None => println!("{DISABLED_PLACEHOLDER}"),
    }
    let mut session = ChatSession::new(client);
    session.push_system("Ask about your workspace. /quit to exit.");
    for message in session.messages() {
        println!("{}", message.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input == "/quit" || input == "/exit" {
            break;
        }

        let before = session.messages().len();
        session.submit(input).await;
        for message in &session.messages()[before..] {
            if message.is_assistant() {
                println!("[{}] {}", message.timestamp, message.text);
            }
        }
    }

    Ok(())
}
