use crate::Result;
use crate::tools::truncate_chars;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("invalid filename regex"));

/// Keep the first `max_chars` characters of `text`, drop everything that is
/// not a word or whitespace character, and join the remaining words with `_`.
pub fn sanitize_for_filename(text: &str, max_chars: usize) -> String {
    NON_WORD
        .replace_all(truncate_chars(text, max_chars), "")
        .trim()
        .replace(' ', "_")
}

/// Writes research output as timestamped text files inside one directory.
pub struct SaveToFile {
    dir: PathBuf,
}

impl SaveToFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes `data` under a header block and returns a confirmation line.
    ///
    /// An existing file with the same name is overwritten. Without a
    /// filename, one is derived from the current time and the start of
    /// `data`.
    pub fn save(&self, data: &str, filename: Option<&str>) -> Result<String> {
        let now = chrono::Local::now();

        let filename = match filename {
            Some(name) => name.to_string(),
            None => format!(
                "research_{}_{}.txt",
                now.format("%Y%m%d_%H%M%S"),
                sanitize_for_filename(data, 20)
            ),
        };

        let formatted = format!(
            "--- Research Output ---\nTimestamp: {}\n\n{}\n\n",
            now.format("%Y-%m-%d %H:%M:%S"),
            data
        );

        let path = self.dir.join(&filename);
        std::fs::write(&path, formatted)?;
        tracing::info!(path = %path.display(), "research output saved");

        Ok(format!("Data saved to {}", path.display()))
    }
}
