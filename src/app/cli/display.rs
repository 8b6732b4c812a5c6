//! Rendering of inspection reports

use colored::Colorize;

use crate::app::inspect::Inspection;
use crate::tokenizer::{Token, TokenKind};

use super::args::OutputFormat;

pub fn render(inspection: &Inspection, format: OutputFormat, use_color: bool) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(inspection),
        OutputFormat::Text => Ok(render_text(inspection, use_color)),
    }
}

fn heading(text: &str, use_color: bool) -> String {
    if use_color {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

fn token_label(token: &Token, use_color: bool) -> String {
    let kind = match token.kind {
        TokenKind::Text => "text",
        TokenKind::KeyPrefix => "prefix",
        TokenKind::Quoter => "quote",
        TokenKind::Assignment => "assign",
        TokenKind::Separator => "sep",
    };
    let label = format!("{}[{:?}]", kind, token.text);
    if !use_color {
        return label;
    }
    match token.kind {
        TokenKind::KeyPrefix => label.yellow().to_string(),
        TokenKind::Quoter | TokenKind::Assignment => label.magenta().to_string(),
        TokenKind::Separator => label.dimmed().to_string(),
        TokenKind::Text => label,
    }
}

fn parameter_list(parameters: &[String]) -> String {
    parameters
        .iter()
        .map(|p| format!("{:?}", p))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_text(inspection: &Inspection, use_color: bool) -> String {
    let mut out = Vec::new();
    let profile = &inspection.profile;

    out.push(heading("Profile", use_color));
    out.push(format!(
        "  prefixes {}  quotes {}  assignment {:?}  {:?}",
        profile.prefixes.join(" "),
        profile.quotes.join(" "),
        profile.assignment,
        profile.comparison
    ));

    out.push(heading("Tokens", use_color));
    let tokens: Vec<String> = inspection
        .tokens
        .iter()
        .map(|t| token_label(t, use_color))
        .collect();
    out.push(format!("  {}", tokens.join(" ")));
    if let Some(error) = &inspection.cleanup_error {
        let line = format!("  cleanup stopped: {}", error);
        out.push(if use_color { line.red().to_string() } else { line });
    }

    let allocation = &inspection.allocation;
    out.push(heading("Allocation", use_color));
    if !allocation.unkeyed.parameters.is_empty() {
        out.push(format!("  (unkeyed) {}", parameter_list(&allocation.unkeyed.parameters)));
    }
    for entry in &allocation.entries {
        let key = if use_color {
            entry.key.green().to_string()
        } else {
            entry.key.clone()
        };
        out.push(format!("  {} {}", key, parameter_list(&entry.parameters)));
    }
    if allocation.is_empty() {
        out.push("  (nothing)".to_string());
    }

    let mut problems = Vec::new();
    for key in &allocation.unknown_keys {
        problems.push(format!("  unknown key: {}", key));
    }
    for key in &allocation.repeated_keys {
        problems.push(format!("  repeated key: {}", key));
    }
    if !problems.is_empty() {
        out.push(heading("Problems", use_color));
        out.extend(problems);
    }

    out.join("\n")
}
