use garage_core::types::Tier;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};

pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {e}");
            std::process::exit(1);
        }
    }
}

pub fn output_json_error(command: &str, error: &str) {
    let val = serde_json::json!({
        "success": false,
        "command": command,
        "error": error,
    });
    output_json(&val);
}

pub fn print_success(msg: &str) {
    println!("{}", msg.green());
}

pub fn print_error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Paint a line in its tier colour.
pub fn tier_line(tier: Tier, line: &str) -> String {
    match tier {
        Tier::Red => line.red().bold().to_string(),
        Tier::Orange => line.bright_red().to_string(),
        Tier::Yellow => line.yellow().to_string(),
        Tier::Green => line.green().to_string(),
    }
}
