//! The tabular backup codec.
//!
//! Layout: a header block (format name, version, timestamp), a `Metadata`
//! block of key-value rows, then `Tags`, `Works`, and `Episodes` sections,
//! each with a fixed-arity column schema. Fields containing the delimiter or
//! the quote character are quoted; quotes inside quoted fields are doubled.
//!
//! Rows that do not match the expected arity, or whose typed columns fail to
//! parse, are rejected (logged and skipped) rather than misread. An absent
//! optional field and an empty one serialize identically; on parse, an empty
//! optional column loads as `None`.

use crate::models::{BackupSnapshot, Episode, SnapshotMetadata, Tag, Work};
use crate::services::backup::BackupError;
use std::collections::HashMap;
use tracing::warn;

pub const FORMAT_HEADER: &str = "WatchVault Backup Data";

const WORK_COLUMNS: usize = 13;
const EPISODE_COLUMNS: usize = 10;

const WORKS_HEADER: &str = "ID,Title,Type,Status,Year,Rating,Review,Note,Source,\
Reminder Enabled,Reminder Frequency,Date Added,Date Updated";
const EPISODES_HEADER: &str =
    "Work ID,Episode ID,Number,Title,Description,Type,Season,Watched,Date Watched,Note";

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn join_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits one row into fields, honoring quoting and doubled quotes.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn opt(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

fn opt_owned(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

#[must_use]
pub fn to_table(snapshot: &BackupSnapshot) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(FORMAT_HEADER.to_string());
    lines.push(format!("Version: {}", snapshot.version));
    lines.push(format!("Timestamp: {}", snapshot.timestamp));
    lines.push(String::new());

    lines.push("Metadata".to_string());
    lines.push(format!("Total Works,{}", snapshot.metadata.total_works));
    lines.push(format!("Total Tags,{}", snapshot.metadata.total_tags));
    lines.push(format!(
        "Total Episodes,{}",
        snapshot.metadata.total_episodes
    ));
    lines.push(format!(
        "Watched Episodes,{}",
        snapshot.metadata.watched_episodes
    ));
    lines.push(format!(
        "Completion Rate,{}%",
        snapshot.metadata.completion_rate
    ));
    lines.push(String::new());

    lines.push("Tags".to_string());
    lines.push("ID,Name,Color".to_string());
    for tag in &snapshot.tags {
        lines.push(join_row(&[
            tag.id.to_string(),
            tag.name.clone(),
            tag.color.clone(),
        ]));
    }
    lines.push(String::new());

    lines.push("Works".to_string());
    lines.push(WORKS_HEADER.to_string());
    for work in &snapshot.works {
        lines.push(join_row(&[
            work.id.clone(),
            work.title.clone(),
            work.kind.to_string(),
            work.status.to_string(),
            work.year.map(|y| y.to_string()).unwrap_or_default(),
            work.rating.map(|r| r.to_string()).unwrap_or_default(),
            opt_owned(work.review.as_ref()),
            opt_owned(work.note.as_ref()),
            opt_owned(work.source.as_ref()),
            work.reminder_enabled.to_string(),
            opt_owned(work.reminder_frequency.as_ref()),
            work.date_added.clone(),
            opt_owned(work.date_updated.as_ref()),
        ]));
    }
    lines.push(String::new());

    lines.push("Episodes".to_string());
    lines.push(EPISODES_HEADER.to_string());
    for work in &snapshot.works {
        for episode in &work.episodes {
            lines.push(join_row(&[
                work.id.clone(),
                episode.id.clone(),
                episode.number.to_string(),
                opt_owned(episode.title.as_ref()),
                opt_owned(episode.description.as_ref()),
                episode.kind.clone(),
                episode.season.to_string(),
                episode.watched.to_string(),
                opt_owned(episode.date_watched.as_ref()),
                opt_owned(episode.note.as_ref()),
            ]));
        }
    }

    lines.join("\n")
}

fn parse_work_row(fields: &[String]) -> Result<Work, String> {
    let kind = fields[2].parse()?;
    let status = fields[3].parse()?;
    let year = match fields[4].as_str() {
        "" => None,
        raw => Some(raw.parse().map_err(|_| format!("bad year: {raw}"))?),
    };
    let rating = match fields[5].as_str() {
        "" => None,
        raw => Some(raw.parse().map_err(|_| format!("bad rating: {raw}"))?),
    };

    Ok(Work {
        id: fields[0].clone(),
        title: fields[1].clone(),
        kind,
        status,
        year,
        rating,
        review: opt(&fields[6]),
        note: opt(&fields[7]),
        source: opt(&fields[8]),
        reminder_enabled: fields[9] == "true",
        reminder_frequency: opt(&fields[10]),
        tag_ids: Vec::new(),
        episodes: Vec::new(),
        date_added: fields[11].clone(),
        date_updated: opt(&fields[12]),
    })
}

fn parse_episode_row(fields: &[String]) -> Result<Episode, String> {
    let number = fields[2]
        .parse()
        .map_err(|_| format!("bad episode number: {}", fields[2]))?;
    let season = fields[6]
        .parse()
        .map_err(|_| format!("bad season: {}", fields[6]))?;

    Ok(Episode {
        id: fields[1].clone(),
        number,
        season,
        kind: fields[5].clone(),
        watched: fields[7] == "true",
        date_watched: opt(&fields[8]),
        title: opt(&fields[3]),
        description: opt(&fields[4]),
        note: opt(&fields[9]),
    })
}

pub fn from_table(content: &str) -> Result<BackupSnapshot, BackupError> {
    enum Section {
        Preamble,
        Tags,
        Works,
        Episodes,
    }

    let mut version: Option<String> = None;
    let mut timestamp: Option<String> = None;
    let mut tags: Vec<Tag> = Vec::new();
    let mut works: Vec<Work> = Vec::new();
    let mut work_index: HashMap<String, usize> = HashMap::new();
    let mut section = Section::Preamble;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "Tags" => {
                section = Section::Tags;
                continue;
            }
            "Works" => {
                section = Section::Works;
                continue;
            }
            "Episodes" => {
                section = Section::Episodes;
                continue;
            }
            _ => {}
        }

        match section {
            Section::Preamble => {
                if let Some(rest) = line.strip_prefix("Version: ") {
                    version = Some(rest.to_string());
                } else if let Some(rest) = line.strip_prefix("Timestamp: ") {
                    timestamp = Some(rest.to_string());
                }
                // The format-name line and the Metadata block are
                // informational; metadata is rederived from content below.
            }
            Section::Tags => {
                if line.starts_with("ID,") {
                    continue;
                }
                let fields = split_row(line);
                if fields.len() != 3 {
                    warn!("Skipping tag row with {} columns: {line}", fields.len());
                    continue;
                }
                match fields[0].parse::<i32>() {
                    Ok(id) => tags.push(Tag {
                        id,
                        name: fields[1].clone(),
                        color: fields[2].clone(),
                    }),
                    Err(_) => warn!("Skipping tag row with bad id: {line}"),
                }
            }
            Section::Works => {
                if line.starts_with("ID,") {
                    continue;
                }
                let fields = split_row(line);
                if fields.len() != WORK_COLUMNS {
                    warn!("Skipping work row with {} columns: {line}", fields.len());
                    continue;
                }
                match parse_work_row(&fields) {
                    Ok(work) => {
                        work_index.insert(work.id.clone(), works.len());
                        works.push(work);
                    }
                    Err(reason) => warn!("Skipping work row ({reason}): {line}"),
                }
            }
            Section::Episodes => {
                if line.starts_with("Work ID,") {
                    continue;
                }
                let fields = split_row(line);
                if fields.len() != EPISODE_COLUMNS {
                    warn!("Skipping episode row with {} columns: {line}", fields.len());
                    continue;
                }
                let Some(&index) = work_index.get(fields[0].as_str()) else {
                    warn!("Skipping episode row for unknown work: {}", fields[0]);
                    continue;
                };
                match parse_episode_row(&fields) {
                    Ok(episode) => works[index].episodes.push(episode),
                    Err(reason) => warn!("Skipping episode row ({reason}): {line}"),
                }
            }
        }
    }

    let (Some(version), Some(timestamp)) = (version, timestamp) else {
        return Err(BackupError::InvalidFormat(
            "backup is missing its version or timestamp".to_string(),
        ));
    };

    let metadata = SnapshotMetadata::derive(&works, &tags);

    Ok(BackupSnapshot {
        version,
        timestamp,
        works,
        tags,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_delimiters_and_doubles_quotes() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn split_row_reverses_join_row() {
        let fields = vec![
            "one".to_string(),
            "two, with comma".to_string(),
            "nested \"quote\"".to_string(),
            String::new(),
        ];
        assert_eq!(split_row(&join_row(&fields)), fields);
    }

    #[test]
    fn rejects_rows_with_wrong_arity() {
        let content = "WatchVault Backup Data\n\
                       Version: 1.0.0\n\
                       Timestamp: 2024-01-01T00:00:00Z\n\
                       \n\
                       Tags\n\
                       ID,Name,Color\n\
                       1,Action\n\
                       2,Drama,#00ff00\n";
        let snapshot = from_table(content).unwrap();
        assert_eq!(snapshot.tags.len(), 1);
        assert_eq!(snapshot.tags[0].name, "Drama");
    }

    #[test]
    fn missing_version_is_rejected() {
        let content = "Tags\nID,Name,Color\n1,Action,#ff0000\n";
        assert!(matches!(
            from_table(content),
            Err(BackupError::InvalidFormat(_))
        ));
    }
}
