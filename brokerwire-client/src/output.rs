use anyhow::Result;
use brokerwire_protocol::{
    AccessTokenRecord, ClientDetails, ClientRecord, StreamDetails, StreamRecord, TopicRecord,
    UserRecord,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::params::OutputFormat;

/// Broker timestamps are microseconds since the Unix epoch.
pub fn format_micros(micros: u64) -> String {
    i64::try_from(micros)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_micros)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| micros.to_string())
}

pub trait TableRow {
    const HEADER: &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl TableRow for StreamRecord {
    const HEADER: &'static [&'static str] = &["ID", "NAME", "TOPICS", "MESSAGES", "SIZE", "CREATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.topics_count.to_string(),
            self.messages_count.to_string(),
            self.size_bytes.to_string(),
            format_micros(self.created_at),
        ]
    }
}

impl TableRow for TopicRecord {
    const HEADER: &'static [&'static str] =
        &["ID", "NAME", "PARTITIONS", "MESSAGES", "SIZE", "EXPIRY", "CREATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.partitions_count.to_string(),
            self.messages_count.to_string(),
            self.size_bytes.to_string(),
            self.message_expiry
                .map(|d| format!("{}s", d.as_secs()))
                .unwrap_or_else(|| "never".to_string()),
            format_micros(self.created_at),
        ]
    }
}

impl TableRow for UserRecord {
    const HEADER: &'static [&'static str] = &["ID", "USERNAME", "STATUS", "CREATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            format!("{:?}", self.status),
            format_micros(self.created_at),
        ]
    }
}

impl TableRow for ClientRecord {
    const HEADER: &'static [&'static str] = &["CLIENT", "USER", "TRANSPORT", "ADDRESS", "GROUPS"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.client_id.to_string(),
            self.user_id.to_string(),
            format!("{:?}", self.transport),
            self.address.clone(),
            self.consumer_groups_count.to_string(),
        ]
    }
}

impl TableRow for AccessTokenRecord {
    const HEADER: &'static [&'static str] = &["NAME", "EXPIRES"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.expiry
                .map(format_micros)
                .unwrap_or_else(|| "never".to_string()),
        ]
    }
}

pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    let rows: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();
    let mut widths: Vec<usize> = T::HEADER.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = T::HEADER.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

pub fn print_rows<T: TableRow + Serialize>(rows: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Table => print!("{}", render_table(rows)),
    }
    Ok(())
}

pub fn print_stream(details: &StreamDetails, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(details)?),
        OutputFormat::Table => {
            print!("{}", render_table(std::slice::from_ref(&details.stream)));
            println!();
            print!("{}", render_table(&details.topics));
        }
    }
    Ok(())
}

pub fn print_client(details: &ClientDetails, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(details)?),
        OutputFormat::Table => {
            print!("{}", render_table(std::slice::from_ref(&details.client)));
            for group in &details.consumer_groups {
                println!(
                    "  group {} on stream {} topic {}",
                    group.group_id, group.stream_id, group.topic_id
                );
            }
        }
    }
    Ok(())
}
