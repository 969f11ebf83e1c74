use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Journal operation types
///
/// Both entity types are create-only, so the journal only ever records
/// inserts. Free-form strings (username, description) are hex-encoded so
/// the pipe framing stays unambiguous.
#[derive(Debug, Clone, PartialEq)]
pub enum JournalOperation {
    AddUser {
        id: String,
        username: String,
    },
    AddExercise {
        id: String,
        user_id: String,
        description: String,
        duration: i64,
        date: NaiveDate,
    },
}

impl JournalOperation {
    fn to_line(&self) -> String {
        match self {
            JournalOperation::AddUser { id, username } => {
                format!("ADD_USER|{}|{}", id, hex::encode(username.as_bytes()))
            }
            JournalOperation::AddExercise {
                id,
                user_id,
                description,
                duration,
                date,
            } => {
                format!(
                    "ADD_EXERCISE|{}|{}|{}|{}|{}",
                    id,
                    user_id,
                    duration,
                    date.format("%Y-%m-%d"),
                    hex::encode(description.as_bytes())
                )
            }
        }
    }

    fn from_line(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split('|').collect();

        match parts.first() {
            Some(&"ADD_USER") => {
                if parts.len() != 3 {
                    bail!("Invalid ADD_USER format");
                }
                let id = parts[1].to_string();
                let username_bytes = hex::decode(parts[2]).context("Invalid username hex")?;
                let username =
                    String::from_utf8(username_bytes).context("Username is not valid UTF-8")?;

                Ok(JournalOperation::AddUser { id, username })
            }
            Some(&"ADD_EXERCISE") => {
                if parts.len() != 6 {
                    bail!("Invalid ADD_EXERCISE format");
                }
                let id = parts[1].to_string();
                let user_id = parts[2].to_string();
                let duration = parts[3].parse::<i64>().context("Invalid duration")?;
                let date = NaiveDate::parse_from_str(parts[4], "%Y-%m-%d")
                    .context("Invalid exercise date")?;
                let description_bytes =
                    hex::decode(parts[5]).context("Invalid description hex")?;
                let description = String::from_utf8(description_bytes)
                    .context("Description is not valid UTF-8")?;

                Ok(JournalOperation::AddExercise {
                    id,
                    user_id,
                    description,
                    duration,
                    date,
                })
            }
            _ => bail!("Unknown operation type"),
        }
    }
}

/// Append-only journal that makes the in-memory stores durable.
///
/// Operations are appended and flushed before the matching store insert,
/// so replaying the file at startup reproduces insertion order exactly.
pub struct Journal {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl Journal {
    pub fn new(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open journal file")?;

        Ok(Journal {
            file: Arc::new(Mutex::new(file)),
            path,
        })
    }

    pub fn log_operation(&self, op: JournalOperation) -> Result<()> {
        let line = op.to_line();
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{}", line).context("Failed to write to journal")?;
        file.flush().context("Failed to flush journal")?;
        Ok(())
    }

    pub fn replay(&self) -> Result<Vec<JournalOperation>> {
        let file = File::open(&self.path).context("Failed to open journal for replay")?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.context("Failed to read line from journal")?;
            let line = line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            match JournalOperation::from_line(line) {
                Ok(op) => operations.push(op),
                Err(e) => {
                    tracing::warn!(
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse journal line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }

    pub fn truncate(&self) -> Result<()> {
        let mut file = self.file.lock().unwrap();
        file.set_len(0).context("Failed to truncate journal")?;
        file.flush().context("Failed to flush journal after truncate")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_operation_serialization() {
        let op = JournalOperation::AddUser {
            id: "a1b2c3d4e5f6a1b2c3d4e5f6".to_string(),
            username: "alice".to_string(),
        };
        let line = op.to_line();
        assert_eq!(
            line,
            format!("ADD_USER|a1b2c3d4e5f6a1b2c3d4e5f6|{}", hex::encode("alice"))
        );
        assert_eq!(JournalOperation::from_line(&line).unwrap(), op);

        let op = JournalOperation::AddExercise {
            id: "ffffffffffffffffffffffff".to_string(),
            user_id: "a1b2c3d4e5f6a1b2c3d4e5f6".to_string(),
            description: "morning run | hills".to_string(),
            duration: 30,
            date: date(2023, 2, 1),
        };
        let line = op.to_line();
        assert_eq!(JournalOperation::from_line(&line).unwrap(), op);
    }

    #[test]
    fn test_pipes_in_strings_survive_roundtrip() {
        // Hex framing must protect delimiter characters in user input
        let op = JournalOperation::AddUser {
            id: "000000000000000000000000".to_string(),
            username: "a|b|c".to_string(),
        };
        let parsed = JournalOperation::from_line(&op.to_line()).unwrap();
        assert_eq!(parsed, op);
    }

    #[test]
    fn test_log_and_replay() {
        let temp_dir = TempDir::new().unwrap();
        let journal = Journal::new(temp_dir.path().join("test.journal")).unwrap();

        journal
            .log_operation(JournalOperation::AddUser {
                id: "a1b2c3d4e5f6a1b2c3d4e5f6".to_string(),
                username: "alice".to_string(),
            })
            .unwrap();

        journal
            .log_operation(JournalOperation::AddExercise {
                id: "ffffffffffffffffffffffff".to_string(),
                user_id: "a1b2c3d4e5f6a1b2c3d4e5f6".to_string(),
                description: "run".to_string(),
                duration: 30,
                date: date(2023, 1, 1),
            })
            .unwrap();

        let operations = journal.replay().unwrap();
        assert_eq!(operations.len(), 2);

        match &operations[0] {
            JournalOperation::AddUser { id, username } => {
                assert_eq!(id, "a1b2c3d4e5f6a1b2c3d4e5f6");
                assert_eq!(username, "alice");
            }
            _ => panic!("Expected AddUser"),
        }

        match &operations[1] {
            JournalOperation::AddExercise {
                description,
                duration,
                date: d,
                ..
            } => {
                assert_eq!(description, "run");
                assert_eq!(*duration, 30);
                assert_eq!(*d, date(2023, 1, 1));
            }
            _ => panic!("Expected AddExercise"),
        }
    }

    #[test]
    fn test_truncate() {
        let temp_dir = TempDir::new().unwrap();
        let journal = Journal::new(temp_dir.path().join("test.journal")).unwrap();

        journal
            .log_operation(JournalOperation::AddUser {
                id: "a1b2c3d4e5f6a1b2c3d4e5f6".to_string(),
                username: "alice".to_string(),
            })
            .unwrap();
        assert_eq!(journal.replay().unwrap().len(), 1);

        journal.truncate().unwrap();
        assert_eq!(journal.replay().unwrap().len(), 0);
    }

    #[test]
    fn test_invalid_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.journal");

        fs::write(
            &path,
            format!(
                "GARBAGE|data\nADD_USER|a1b2c3d4e5f6a1b2c3d4e5f6|{}\nADD_EXERCISE|missing|fields\n",
                hex::encode("bob")
            ),
        )
        .unwrap();

        let journal = Journal::new(path).unwrap();
        let operations = journal.replay().unwrap();

        // One valid line among the garbage
        assert_eq!(operations.len(), 1);
    }
}
