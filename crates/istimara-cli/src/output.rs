//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print `data` in the selected format; `rows` feeds the table view.
    pub fn print<S: Serialize, R: Tabled>(&self, data: &S, rows: &[R]) {
        match self {
            OutputFormat::Table => {
                if rows.is_empty() {
                    println!("{}", "no results".dimmed());
                } else {
                    println!("{}", Table::new(rows).with(Style::rounded()));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
        }
    }
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}
