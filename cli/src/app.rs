use anyhow::{Context, Result};
use autodiag_core::RelayReply;
use autodiag_diagnosis::matched_keyword;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::output::{print_diagnosis, print_json, print_no_match, print_reply};
use crate::relay_client::{RelayClient, compose_message};

/// State carried across the symptoms of one invocation
#[derive(Debug)]
pub struct Session {
    json: bool,
    relay: Option<RelayClient>,
    thread_id: Option<String>,
}

impl Session {
    /// `relay` is set when symptoms should also go to the assistant
    pub fn new(json: bool, relay: Option<RelayClient>, thread_id: Option<String>) -> Self {
        Self {
            json,
            relay,
            thread_id,
        }
    }

    /// Diagnoses one symptom locally and, when asking, forwards it to the relay
    pub async fn handle_symptom(&mut self, symptom: &str) -> Result<()> {
        info!("Analyzing symptom: {}", symptom);
        let found = matched_keyword(symptom);
        debug!("Matched keyword: {:?}", found.map(|m| m.keyword));

        if self.json {
            print_json(found.map(|m| m.record))?;
        } else {
            match &found {
                Some(found) => print_diagnosis(found),
                None => print_no_match(symptom),
            }
        }

        let Some(relay) = &self.relay else {
            return Ok(());
        };

        let message = compose_message(symptom, found.map(|m| m.record));
        let spinner = waiting_spinner();
        let result = relay.diagnose(&message, self.thread_id.as_deref()).await;
        spinner.finish_and_clear();

        let reply = result.context("Failed to get a reply from the assistant")?;
        println!();
        print_reply(&reply);
        self.remember(&reply);
        Ok(())
    }

    fn remember(&mut self, reply: &RelayReply) {
        if self.thread_id.as_deref() != Some(reply.thread_id.as_str()) {
            debug!("Continuing on thread {}", reply.thread_id);
            self.thread_id = Some(reply.thread_id.clone());
        }
    }
}

fn waiting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message("Consultando o assistente...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Runs a single symptom through the session
pub async fn run_single_query(symptom: &str, session: &mut Session) -> Result<()> {
    session.handle_symptom(symptom).await
}

/// Reads symptoms line by line until `exit`, `quit` or end of input
pub async fn run_interactive(session: &mut Session) -> Result<()> {
    println!("Descreva o sintoma do veículo. Digite 'exit' ou 'quit' para sair.");
    println!();

    let stdin = io::stdin();
    loop {
        print!("{}: ", "Sintoma".green().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read input")?;
        if read == 0 {
            println!();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_command(input) {
            println!("Encerrando.");
            break;
        }

        if let Err(e) = session.handle_symptom(input).await {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
        }
        println!();
    }

    Ok(())
}

fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}
