//! Terminal rendering of comparison results.

use crate::types::ComparisonResult;
use anyhow::Result;

const HEADERS: [&str; 4] = [
    "Curing age (days)",
    "With PAC (MPa)",
    "Control (MPa)",
    "Change (%)",
];

const GREEN: &str = "32";
const RED: &str = "31";

/// Output mode for the rendered result
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug)]
pub struct ReportOptions {
    pub color: bool,
    pub chart_width: usize,
}

/// Full report: results table, explanatory note and strength chart.
pub fn render_report(result: &ComparisonResult, options: ReportOptions) -> String {
    let mut out = String::new();
    out.push_str("Simulation results\n\n");
    out.push_str(&render_table(result, options.color));
    out.push_str("\n\n");
    out.push_str(
        "Change (%) is the strength gain or loss of your mix compared with an identical\n\
         control mix without PAC sludge or chemical activator.\n\n",
    );
    out.push_str("Strength evolution\n\n");
    out.push_str(&render_chart(result, options.chart_width));
    out
}

pub fn render_json(result: &ComparisonResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Aligned table, change column colored by sign when `color` is set.
pub fn render_table(result: &ComparisonResult, color: bool) -> String {
    let rows: Vec<[String; 4]> = result
        .rows
        .iter()
        .map(|r| {
            [
                r.curing_age_days.to_string(),
                format!("{:.2}", r.treatment_mpa),
                format!("{:.2}", r.control_mpa),
                format!("{:+.2}%", r.improvement_pct),
            ]
        })
        .collect();

    let widths: Vec<usize> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].len())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    let header_line = HEADERS
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{:>width$}", header, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.len());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);

    for (row, source) in rows.iter().zip(&result.rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                let padded = format!("{:>width$}", cell, width = width);
                if color && i == 3 {
                    colorize_change(&padded, source.improvement_pct)
                } else {
                    padded
                }
            })
            .collect();
        lines.push(cells.join("  "));
    }

    lines.join("\n")
}

/// Paired bars per curing age: `█` for the PAC mix, `░` for the control.
pub fn render_chart(result: &ComparisonResult, width: usize) -> String {
    let width = width.max(1);
    let peak = result.peak_strength();

    let bar = |strength: f64, glyph: &str| -> String {
        if peak <= 0.0 {
            return String::new();
        }
        let len = ((strength / peak) * width as f64).round() as usize;
        glyph.repeat(len.min(width))
    };

    let mut lines = Vec::with_capacity(result.rows.len() * 2 + 1);
    lines.push("  █ with PAC   ░ control".to_string());
    for row in &result.rows {
        lines.push(format!(
            "{:>3} d │{:<width$} {:>7.2}",
            row.curing_age_days.days(),
            bar(row.treatment_mpa, "█"),
            row.treatment_mpa,
            width = width
        ));
        lines.push(format!(
            "      │{:<width$} {:>7.2}",
            bar(row.control_mpa, "░"),
            row.control_mpa,
            width = width
        ));
    }
    lines.join("\n")
}

fn colorize_change(value: &str, change: f64) -> String {
    let code = if change > 0.0 {
        Some(GREEN)
    } else if change < 0.0 {
        Some(RED)
    } else {
        None
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}
