//! CLI output rendering: aligned tables, CSV and pretty JSON.

use crate::models::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Records that render as a row of text cells
pub trait Tabular {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

const MAX_CELL: usize = 40;

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn short_date(raw: &str) -> String {
    parse_api_datetime(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| or_dash(raw))
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL {
        cell.to_string()
    } else {
        let cut: String = cell.chars().take(MAX_CELL - 3).collect();
        format!("{}...", cut)
    }
}

impl Tabular for Event {
    fn headers() -> &'static [&'static str] {
        &["ID", "Title", "Date", "Time", "Location"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(&self.title),
            short_date(self.date.as_deref().unwrap_or_default()),
            or_dash(&self.time),
            or_dash(&self.location),
        ]
    }
}

impl Tabular for EventParticipant {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Event", "Status", "Created At"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(&self.name),
            self.event_id.to_string(),
            self.rsvp_status()
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| or_dash(&self.status)),
            short_date(&self.created_at),
        ]
    }
}

impl Tabular for Organization {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Description", "Created By", "Created At"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(&self.name),
            or_dash(&self.description),
            or_dash(&self.created_by),
            short_date(&self.created_at),
        ]
    }
}

impl Tabular for Member {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "User", "Role", "Joined At"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(&self.name),
            self.user_id.to_string(),
            or_dash(&self.role),
            short_date(&self.joined_at),
        ]
    }
}

impl Tabular for Review {
    fn headers() -> &'static [&'static str] {
        &["ID", "Event", "Rating", "Comments"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.event_id.to_string(),
            format!("{}/5", self.rating),
            or_dash(&self.comments),
        ]
    }
}

impl Tabular for ChatRoom {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Event", "Created At"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(&self.name),
            self.event_id.to_string(),
            short_date(&self.created_at),
        ]
    }
}

impl Tabular for ChatMessage {
    fn headers() -> &'static [&'static str] {
        &["ID", "User", "Message", "Created At"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.user_id.to_string(),
            or_dash(&self.message),
            or_dash(&self.created_at),
        ]
    }
}

impl Tabular for User {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Username", "Email", "Type", "Status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(&self.full_name()),
            or_dash(&self.user_name),
            or_dash(&self.email),
            or_dash(&self.user_type),
            or_dash(&self.status),
        ]
    }
}

/// Render records in the requested format
pub fn render<T: Tabular + Serialize>(
    format: OutputFormat,
    records: &[T],
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Table => Ok(render_table(records)),
    }
}

fn render_table<T: Tabular>(records: &[T]) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let headers = T::headers();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| r.row().iter().map(|c| truncate(c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.iter().map(|h| h.to_string()).collect()));
    out.push('\n');
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn render_csv<T: Tabular>(records: &[T]) -> Result<String, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(T::headers())?;
    for record in records {
        writer.write_record(record.row())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|e| RenderError::Utf8(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output was not UTF-8: {0}")]
    Utf8(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> Vec<ChatRoom> {
        vec![
            ChatRoom {
                id: 1,
                name: "Career Fair Lobby".into(),
                event_id: 4,
                created_at: "2024-10-01T09:00:00".into(),
            },
            ChatRoom {
                id: 12,
                name: "Open Mic, Backstage".into(),
                event_id: 7,
                created_at: String::new(),
            },
        ]
    }

    #[test]
    fn test_table_aligns_columns() {
        let out = render(OutputFormat::Table, &rooms()).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("ID  Name"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("2024-10-01"));
        assert!(lines[3].starts_with("12  Open Mic, Backstage"));
        assert!(lines[3].ends_with('-'));
    }

    #[test]
    fn test_empty_table() {
        let out = render::<ChatRoom>(OutputFormat::Table, &[]).unwrap();
        assert_eq!(out, "No records found.\n");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let out = render(OutputFormat::Csv, &rooms()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID,Name,Event,Created At");
        assert_eq!(lines[2], "12,\"Open Mic, Backstage\",7,-");
    }

    #[test]
    fn test_json_keeps_wire_names() {
        let out = render(OutputFormat::Json, &rooms()).unwrap();
        assert!(out.contains("\"eventId\": 4"));
    }

    #[test]
    fn test_long_cells_truncated() {
        let review = Review {
            id: 3,
            event_id: 1,
            rating: 5,
            comments: "x".repeat(100),
            ..Default::default()
        };
        let out = render(OutputFormat::Table, &[review]).unwrap();
        assert!(out.lines().nth(2).unwrap().ends_with("..."));
    }
}
