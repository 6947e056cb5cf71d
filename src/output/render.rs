//! Lease list rendering

use crate::error::LeaseError;
use crate::leases::Lease;
use anyhow::Result;
use std::str::FromStr;
use std::time::Duration;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// YAML sequence
    Yaml,
    /// Fixed-column text table
    Table,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "table" => Ok(Self::Table),
            _ => Err(LeaseError::configuration(format!(
                "Invalid output format '{s}'. Must be 'json', 'yaml' or 'table'"
            ))
            .into()),
        }
    }
}

/// Render `leases` in the requested format
///
/// # Errors
///
/// Returns an output error if serialization fails
pub fn render(leases: &[Lease], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(leases)
            .map_err(|e| LeaseError::output(format!("Failed to serialize leases as JSON: {e}")).into()),
        OutputFormat::Yaml => serde_yaml::to_string(leases)
            .map_err(|e| LeaseError::output(format!("Failed to serialize leases as YAML: {e}")).into()),
        OutputFormat::Table => Ok(render_table(leases)),
    }
}

const HEADERS: [&str; 5] = ["ADDRESS", "STATE", "HARDWARE", "HOSTNAME", "ENDS"];

fn render_table(leases: &[Lease]) -> String {
    let rows: Vec<[String; 5]> = leases
        .iter()
        .map(|lease| {
            [
                cell(lease.address.as_deref()),
                cell(lease.binding_state.as_deref()),
                cell(lease.hardware.as_deref()),
                cell(lease.client_hostname.as_deref()),
                lease.ends.map_or_else(|| "-".to_owned(), |ends| ends.to_string()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_owned), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn cell(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => "-".to_owned(),
    }
}

fn push_row(out: &mut String, row: &[String; 5], widths: &[usize; 5]) {
    let line = row
        .iter()
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Count line and run time printed after the lease list
#[must_use]
pub fn summary(count: usize, active_only: bool, elapsed: Duration) -> String {
    let kind = if active_only { "active leases" } else { "leases" };
    format!(
        "{count} {kind} retrieved\nRun time: {:.3}s",
        elapsed.as_secs_f64()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lease(address: &str, state: &str, hostname: Option<&str>) -> Lease {
        Lease {
            address: Some(address.to_owned()),
            binding_state: Some(state.to_owned()),
            hardware: Some("00:11:22:33:44:55".to_owned()),
            client_hostname: hostname.map(str::to_owned),
            ends: Some(1_650_000_000),
            ..Lease::default()
        }
    }

    #[test]
    fn parses_formats() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_is_an_array() {
        let out = render(&[lease("10.0.0.5", "ACTIVE", None)], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["address"], "10.0.0.5");
        assert!(value[0].get("client_hostname").is_none());
    }

    #[test]
    fn empty_json_is_empty_array() {
        assert_eq!(render(&[], OutputFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn yaml_lists_leases() {
        let out = render(&[lease("10.0.0.5", "ACTIVE", Some("host1"))], OutputFormat::Yaml).unwrap();
        assert!(out.contains("address: 10.0.0.5"));
        assert!(out.contains("client_hostname: host1"));
    }

    #[test]
    fn table_aligns_columns_and_fills_gaps() {
        let out = render(
            &[
                lease("10.0.0.5", "ACTIVE", Some("printer")),
                lease("10.0.0.100", "FREE", None),
            ],
            OutputFormat::Table,
        )
        .unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ADDRESS     STATE"));
        assert!(lines[1].starts_with("10.0.0.5    ACTIVE"));
        assert!(lines[2].contains("  -  "));
        assert!(lines[2].ends_with("1650000000"));
    }

    #[test]
    fn table_lines_end_with_newline() {
        let out = render(&[lease("10.0.0.5", "ACTIVE", None)], OutputFormat::Table).unwrap();
        assert!(out.ends_with("1650000000\n"));
        assert_eq!(out.matches('\n').count(), 2);

        let empty = render(&[], OutputFormat::Table).unwrap();
        assert_eq!(empty, "ADDRESS  STATE  HARDWARE  HOSTNAME  ENDS\n");
    }

    #[test]
    fn summary_mentions_active_filter() {
        let text = summary(3, true, Duration::from_millis(1500));
        assert_eq!(text, "3 active leases retrieved\nRun time: 1.500s");

        let text = summary(0, false, Duration::ZERO);
        assert!(text.starts_with("0 leases retrieved"));
    }
}
