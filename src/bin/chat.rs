use std::env;
use std::io::{self, BufRead, Write};

use dotenv::dotenv;

use askdurga::client::{Composer, HistoryStore, Role};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_HISTORY_FILE: &str = "chat_history.json";

#[tokio::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let server_url =
        env::var("ASKDURGA_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let history_file =
        env::var("ASKDURGA_HISTORY_FILE").unwrap_or_else(|_| DEFAULT_HISTORY_FILE.to_string());

    let composer = Composer::new(server_url, HistoryStore::new(history_file));

    for message in composer.transcript() {
        match message.role {
            Role::User => println!("you: {}", message.text),
            Role::Ai => println!("durga: {}\n", message.text),
        }
    }

    let mut language = String::from("english");
    println!("Language is '{language}'. Commands: /lang <name>, /quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("you ({language})> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = line.trim_end();

        if input == "/quit" {
            break;
        }
        if let Some(lang) = input.strip_prefix("/lang ") {
            language = lang.trim().to_string();
            println!("switched to '{language}'");
            continue;
        }

        match composer.submit(&language, input).await {
            Ok(reply) => println!("durga: {reply}\n"),
            Err(err) => println!("{err}"),
        }
    }

    Ok(())
}
