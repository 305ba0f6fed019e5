use clap::Parser;

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8080";

/// Vehicle symptom diagnosis from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Symptom description, e.g. "chiado ao frear"
    #[arg(index = 1)] // Positional argument
    pub symptom: Option<String>,

    /// Print the matched record as JSON instead of a card
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Also ask the assistant through the relay daemon
    #[arg(short, long, default_value_t = false)]
    pub ask: bool,

    /// Base URL of the relay daemon
    #[arg(long, env = "AUTODIAG_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,

    /// Continue an existing assistant conversation
    #[arg(long)]
    pub thread_id: Option<String>,

    /// Enter interactive mode
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// List every diagnosis with its keywords
    #[arg(short, long, default_value_t = false)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
