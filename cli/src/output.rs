use anyhow::Result;
use autodiag_core::RelayReply;
use autodiag_diagnosis::{DiagnosisKey, DiagnosisRecord, SymptomMatch, Urgency, keywords_for, lookup};
use colored::*;
use std::fmt::Write;

fn urgency_badge(urgency: Urgency) -> ColoredString {
    let label = format!("urgência {}", urgency.label());
    match urgency {
        Urgency::High => label.red().bold(),
        Urgency::Medium => label.yellow().bold(),
        Urgency::Low => label.green().bold(),
    }
}

/// Render a diagnosis as a terminal card
pub fn render_diagnosis(found: &SymptomMatch) -> String {
    let record = found.record;
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", record.fault.bold(), urgency_badge(record.urgency));
    let zone = record.zone.map(|zone| zone.label()).unwrap_or("-");
    let _ = writeln!(out, "{} {}", "Região:".cyan(), zone);
    let _ = writeln!(out, "{} \"{}\"", "Palavra-chave:".cyan(), found.keyword);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", record.description);
    let _ = writeln!(out);

    let _ = writeln!(out, "{} {}", "Peça:".cyan().bold(), record.part.name);
    let _ = writeln!(out, "  {}", record.part.function.dimmed());
    for symptom in record.part.symptoms {
        let _ = writeln!(out, "  - {}", symptom);
    }
    let _ = writeln!(out);

    let action = &record.action;
    let _ = writeln!(
        out,
        "{} (complexidade {}, {})",
        "Reparo:".cyan().bold(),
        action.complexity.label(),
        action.time_estimate
    );
    for (i, step) in action.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    let _ = writeln!(out, "{} {}", "Ferramentas:".cyan(), action.tools.join(", "));

    out
}

pub fn print_diagnosis(found: &SymptomMatch) {
    print!("{}", render_diagnosis(found));
}

pub fn print_no_match(symptom: &str) {
    println!(
        "{} \"{}\"",
        "Nenhum diagnóstico encontrado para".yellow(),
        symptom.trim()
    );
    println!("Descreva o ruído, o cheiro ou o comportamento do veículo com mais detalhes.");
}

/// Print the record, or `null`, as pretty JSON
pub fn print_json(record: Option<&DiagnosisRecord>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Print an assistant reply and the handle that continues the conversation
pub fn print_reply(reply: &RelayReply) {
    println!("{}: {}", "Assistente".blue().bold(), reply.response);
    println!("{}", format!("thread: {}", reply.thread_id).dimmed());
}

/// Every diagnosis with its keywords, in table order
pub fn render_catalog() -> String {
    let mut out = String::new();
    for key in DiagnosisKey::ALL {
        let record = lookup(key);
        let keywords: Vec<&str> = keywords_for(key).collect();
        let _ = writeln!(out, "{} {}", key.as_str().green().bold(), record.fault.dimmed());
        let _ = writeln!(out, "  {}", keywords.join(", "));
    }
    out
}

pub fn print_catalog() {
    print!("{}", render_catalog());
}

/// Show usage instructions when no symptom or action is provided
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "autodiag \"chiado ao frear\"".green().bold());
    println!("    Match a symptom against the diagnostic table");
    println!();
    println!("  {}", "autodiag --ask \"chiado ao frear\"".green().bold());
    println!("    Also ask the assistant through the relay daemon");
    println!();
    println!("  {}", "autodiag -i".green().bold());
    println!("    Describe symptoms one per line");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --list               List diagnoses and their keywords");
    println!("  --json               Print the matched record as JSON");
    println!("  --relay-url <URL>    Relay daemon address");
    println!("  --thread-id <ID>     Continue an assistant conversation");
    println!("  --help               Show this help message");
    println!();
}
