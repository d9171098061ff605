use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only JSONL log of one browsing session.
pub struct Transcript {
    pub path: PathBuf,
    session_id: String,
    cwd: PathBuf,
    file: File,
}

#[derive(Serialize)]
struct Event<'a> {
    ts: DateTime<Utc>,
    session_id: &'a str,
    cwd: &'a Path,
    #[serde(rename = "type")]
    event_type: &'a str,
    #[serde(flatten)]
    data: serde_json::Value,
}

impl Transcript {
    pub fn new(path: &Path, session_id: &str, cwd: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            session_id: session_id.to_string(),
            cwd: cwd.to_path_buf(),
            file,
        })
    }

    pub fn log(&mut self, event_type: &str, data: serde_json::Value) -> Result<()> {
        let event = Event {
            ts: Utc::now(),
            session_id: &self.session_id,
            cwd: &self.cwd,
            event_type,
            data,
        };
        let line = serde_json::to_string(&event)?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        Ok(())
    }

    /// Log a filter evaluation and how many cards it left visible
    pub fn search_query(&mut self, query: &str, shown: usize, total: usize) -> Result<()> {
        self.log(
            "search_query",
            serde_json::json!({ "query": query, "shown": shown, "total": total }),
        )
    }

    pub fn contact_attempt(&mut self, name: &str, email: &str) -> Result<()> {
        self.log(
            "contact_attempt",
            serde_json::json!({ "name": name, "email": email }),
        )
    }

    /// Log a rejected submission with the full error list
    pub fn contact_rejected(&mut self, errors: &[String]) -> Result<()> {
        self.log("contact_rejected", serde_json::json!({ "errors": errors }))
    }

    /// Log an accepted submission
    pub fn contact_submitted(&mut self, name: &str, email: &str, recipient: &str) -> Result<()> {
        self.log(
            "contact_submitted",
            serde_json::json!({
                "name": name,
                "email": email,
                "recipient": recipient,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_one_json_line_each() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let mut transcript = Transcript::new(&path, "test-session", dir.path()).unwrap();

        transcript.search_query("rust", 1, 2).unwrap();
        transcript
            .contact_rejected(&["Name is required.".to_string()])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "search_query");
        assert_eq!(first["query"], "rust");
        assert_eq!(first["shown"], 1);
        assert_eq!(first["session_id"], "test-session");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["type"], "contact_rejected");
        assert_eq!(second["errors"][0], "Name is required.");
    }
}
