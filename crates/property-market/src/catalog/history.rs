use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::search::normalize_query;

/// Append-only log of user-initiated search expressions.
pub trait SearchHistory: Send + Sync {
    fn record(&self, query: &str) -> Result<(), HistoryError>;
    fn entries(&self) -> Result<Vec<String>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("search history unavailable: {0}")]
    Io(#[from] std::io::Error),
}

/// One expression per line, stored trimmed and lower-cased.
#[derive(Debug, Clone)]
pub struct FileSearchHistory {
    path: PathBuf,
}

impl FileSearchHistory {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SearchHistory for FileSearchHistory {
    fn record(&self, query: &str) -> Result<(), HistoryError> {
        let Some(expression) = normalize_query(query) else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{expression}")?;
        Ok(())
    }

    fn entries(&self) -> Result<Vec<String>, HistoryError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if let Some(expression) = normalize_query(&line) {
                entries.push(expression);
            }
        }
        Ok(entries)
    }
}

#[derive(Debug, Default)]
pub struct InMemorySearchHistory {
    entries: Mutex<Vec<String>>,
}

impl SearchHistory for InMemorySearchHistory {
    fn record(&self, query: &str) -> Result<(), HistoryError> {
        if let Some(expression) = normalize_query(query) {
            self.entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(expression);
        }
        Ok(())
    }

    fn entries(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }
}

/// Most frequent expression; on equal counts the one that reached that
/// count first wins.
pub fn most_frequent<I, S>(entries: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut leader: Option<(String, usize)> = None;

    for entry in entries {
        let expression = entry.as_ref();
        let count = counts.entry(expression.to_string()).or_insert(0);
        *count += 1;

        let beats_leader = match &leader {
            Some((_, best)) => *count > *best,
            None => true,
        };
        if beats_leader {
            leader = Some((expression.to_string(), *count));
        }
    }

    leader.map(|(expression, _)| expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("search-history-{label}-{}-{nanos}.txt", std::process::id()))
    }

    #[test]
    fn most_frequent_breaks_ties_by_first_to_reach_count() {
        let entries = ["loft", "studio", "studio", "loft", "garden"];
        assert_eq!(most_frequent(entries).as_deref(), Some("studio"));
        assert_eq!(most_frequent(Vec::<String>::new()), None);
    }

    #[test]
    fn file_history_appends_normalized_lines() {
        let path = scratch_path("append");
        let history = FileSearchHistory::new(&path);

        assert!(history.entries().expect("missing file reads empty").is_empty());

        history.record("  Cosy LOFT ").expect("record");
        history.record("   ").expect("blank is ignored");
        history.record("studio").expect("record");

        let raw = std::fs::read_to_string(&path).expect("history file written");
        assert_eq!(raw, "cosy loft\nstudio\n");
        assert_eq!(
            history.entries().expect("entries"),
            vec!["cosy loft".to_string(), "studio".to_string()]
        );

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn multi_line_query_is_logged_as_one_entry() {
        let path = scratch_path("multiline");
        let history = FileSearchHistory::new(&path);

        history.record("loft\ncastle").expect("record");
        history.record("Loft\r\nCastle").expect("record");

        let raw = std::fs::read_to_string(&path).expect("history file written");
        assert_eq!(raw, "loft castle\nloft castle\n");
        assert_eq!(
            history.entries().expect("entries"),
            vec!["loft castle".to_string(), "loft castle".to_string()]
        );

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn in_memory_history_normalizes_entries() {
        let history = InMemorySearchHistory::default();
        history.record("Canal VIEW").expect("record");
        assert_eq!(history.entries().expect("entries"), vec!["canal view".to_string()]);
    }
}
