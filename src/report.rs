//! Renders check results for display.

use patton_core::{BannerResult, DependencyResult, OutputFormat};
use serde::Serialize;
use serde_json::Value;

const DEPENDENCY_HEADER: [&str; 3] = ["DEPENDENCY", "CPES", "CVES"];
const BANNER_HEADER: [&str; 2] = ["BANNER", "VULNERABILITY DATA"];

pub fn render_dependencies(result: &DependencyResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Table => {
            let rows = result
                .iter()
                .map(|(name, vulns)| {
                    vec![
                        name.clone(),
                        join_or_dash(&vulns.cpes),
                        join_or_dash(&vulns.cves),
                    ]
                })
                .collect::<Vec<_>>();
            render_table(&DEPENDENCY_HEADER, &rows)
        }
    }
}

pub fn render_banners(result: &BannerResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Table => {
            let rows = result
                .iter()
                .map(|(banner, data)| vec![banner.clone(), summarize(data)])
                .collect::<Vec<_>>();
            render_table(&BANNER_HEADER, &rows)
        }
    }
}

fn render_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unrenderable result: {}>", e))
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn summarize(data: &Value) -> String {
    match data {
        Value::Null => "-".to_string(),
        Value::Object(map) if map.is_empty() => "-".to_string(),
        Value::Array(items) if items.is_empty() => "-".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == last {
                    cell.to_string()
                } else {
                    format!("{:<width$}", cell, width = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![format_row(header.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    if rows.is_empty() {
        lines.push("(no matches)".to_string());
    }
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }

    lines.join("\n")
}
