use anyhow::Result;
use echo_application::{AppContext, CompanionSession};
use echo_core::conversation::{Message, Sender};
use echo_core::persona::Trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const HELP: &str = "Commands: /switch ID, /trait NAME VALUE, /react ID NAME, /search QUERY, /export, /quit";

pub async fn run(context: &AppContext, personality: Option<&str>, token: &str) -> Result<()> {
    let session = context
        .start_session(personality, token)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    for message in session.messages().await {
        print_message(&message);
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            if !handle_command(&session, command).await {
                break;
            }
            continue;
        }

        match session.send(line).await {
            Ok(turn) => print_message(&turn.reply),
            Err(e) => {
                tracing::debug!("[Chat] send failed: {}", e);
                let retry = if e.is_retryable() { " (you can try again)" } else { "" };
                println!("! {}{}", e.user_message(), retry);
            }
        }
    }

    Ok(())
}

/// Returns false when the loop should end.
async fn handle_command(session: &CompanionSession, command: &str) -> bool {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("quit" | "exit", _) => return false,
        ("switch", [id]) => match session.select_personality(id).await {
            Ok(message) => print_message(&message),
            Err(e) => println!("! {}", e.user_message()),
        },
        ("trait", [trait_name, value]) => match (trait_name.parse::<Trait>(), value.parse::<i32>()) {
            (Ok(t), Ok(value)) => {
                let stored = session.set_trait(t, value).await;
                println!("{} set to {}", t.display_name(), stored);
            }
            _ => println!("! usage: /trait empathy|energy|formality|humor|directness 0-100"),
        },
        ("react", [prefix, reaction]) => {
            let messages = session.messages().await;
            match messages.iter().find(|m| m.id.starts_with(prefix)) {
                Some(message) => match session.react(&message.id, reaction).await {
                    Ok(count) => println!("{} x{}", reaction, count),
                    Err(e) => println!("! {}", e.user_message()),
                },
                None => println!("! no message with id {}", prefix),
            }
        }
        ("search", query) => {
            for message in session.search(&query.join(" ")).await {
                print_message(&message);
            }
        }
        ("export", _) => println!("{}", session.export_transcript().await),
        _ => println!("{}", HELP),
    }
    true
}

fn print_message(message: &Message) {
    let who = match message.sender {
        Sender::User => "you".to_string(),
        Sender::Companion => message
            .personality_id
            .clone()
            .unwrap_or_else(|| "companion".to_string()),
    };
    let short_id: String = message.id.chars().take(8).collect();
    println!("[{}] {}: {}", short_id, who, message.text);
}
