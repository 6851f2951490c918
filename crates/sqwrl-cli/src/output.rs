//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use sqwrl_eval::SqwrlBuiltIn;

use crate::script::{Outcome, RunReport};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Color preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => colored::control::unset_override(),
    }
}

/// Format an error for display, with its context chain
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Serialize any report as pretty JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}

/// Render a run report as text: one line per step, then the result rows
pub fn format_report(report: &RunReport) -> String {
    let mut out = format!("{} {}\n", "Query".bold(), report.query.cyan());

    for (index, step) in report.steps.iter().enumerate() {
        let arguments = step
            .arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let status = match &step.outcome {
            Outcome::Succeeded => "ok".green().to_string(),
            Outcome::Failed => "failed".yellow().to_string(),
            Outcome::Error { category, message } => {
                format!("{} ({}: {})", "error".red(), category, message)
            }
        };
        out.push_str(&format!(
            "{:>3}. [{}] {}({}) {}\n",
            index + 1,
            step.phase,
            step.builtin,
            arguments,
            status
        ));
    }

    if report.results.is_empty() {
        out.push_str(&format!("{}\n", "(no result rows)".dimmed()));
    } else {
        out.push_str(&format!("{}\n", "Results".bold()));
        for row in report.results.rows() {
            let cells = row.iter().map(ToString::to_string).collect::<Vec<_>>();
            out.push_str(&format!("  {}\n", cells.join(" | ")));
        }
    }
    out
}

/// One row of the built-in listing
#[derive(Debug, Serialize)]
pub struct BuiltInInfo {
    pub name: &'static str,
    pub iri: String,
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<&'static str>,
}

/// Describe every built-in
pub fn builtin_listing() -> Vec<BuiltInInfo> {
    SqwrlBuiltIn::ALL
        .iter()
        .map(|builtin| BuiltInInfo {
            name: builtin.as_str(),
            iri: builtin.iri(),
            phase: builtin.phase_usage(),
            alias_of: builtin.is_alias().then(|| builtin.canonical().as_str()),
        })
        .collect()
}

/// Render the built-in listing as text
pub fn format_builtins(listing: &[BuiltInInfo]) -> String {
    let mut out = String::new();
    for info in listing {
        let alias = info
            .alias_of
            .map(|target| format!(" (alias of {})", target))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:<22} {}{}\n",
            info.name.bold(),
            info.phase,
            alias.dimmed()
        ));
    }
    out
}
