use crate::answer::StructuredAnswer;
use crate::research::Orchestrator;
use agent::Result;
use agent::tools::{SaveToFile, sanitize_for_filename};
use chrono::NaiveDateTime;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const EXIT_KEYWORDS: [&str; 3] = ["exit", "quit", "bye"];
const SAVE_TRIGGER: &str = "save to a file";
const TOPIC_FILENAME_CHARS: usize = 30;

const WELCOME: &str = "Welcome to the Research Assistant! Type 'exit' at any time to quit.";
const PROMPT: &str = "\nHi! What would you like to know today? ";
const GOODBYE: &str = "Goodbye! Thanks for using the Research Assistant.";
const EMPTY_INPUT: &str = "Please enter a question or type 'exit' to quit.";

/// Console session: read a question, answer it, print the answer, repeat.
pub struct Repl {
    orchestrator: Orchestrator,
    saver: SaveToFile,
}

impl Repl {
    pub fn new(orchestrator: Orchestrator, saver: SaveToFile) -> Self {
        Self {
            orchestrator,
            saver,
        }
    }

    /// Runs until an exit keyword or end of input. Model and file errors
    /// end the session.
    pub async fn run<R, W>(&self, input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", WELCOME)?;
        let mut lines = input.lines();

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            let question = line.trim();
            let lowered = question.to_lowercase();

            if EXIT_KEYWORDS.contains(&lowered.as_str()) {
                break;
            }

            if question.is_empty() {
                writeln!(out, "{}", EMPTY_INPUT)?;
                continue;
            }

            let answer = self.orchestrator.answer(question).await?;
            display(&mut out, &answer)?;

            if lowered.contains(SAVE_TRIGGER) {
                let filename = output_filename(&answer.topic, chrono::Local::now().naive_local());
                let confirmation = self
                    .saver
                    .save(&serde_json::to_string_pretty(&answer)?, Some(filename.as_str()))?;
                writeln!(out, "\n {}", confirmation)?;
            }
        }

        writeln!(out, "{}", GOODBYE)?;
        Ok(())
    }
}

fn display(out: &mut impl Write, answer: &StructuredAnswer) -> std::io::Result<()> {
    writeln!(out, "\nHere's what I found:")?;
    writeln!(out, "Topic: {}", answer.topic)?;
    writeln!(out, "Summary: {}", answer.summary)?;

    if !answer.sources.is_empty() {
        writeln!(out, "\nSources:")?;
        for source in &answer.sources {
            writeln!(out, "- {}", source)?;
        }
    }

    if !answer.tools_used.is_empty() {
        writeln!(out, "\nTools used: {}", answer.tools_used.join(", "))?;
    }

    Ok(())
}

pub fn output_filename(topic: &str, now: NaiveDateTime) -> String {
    format!(
        "research_{}_{}.txt",
        now.format("%Y%m%d_%H%M%S"),
        sanitize_for_filename(topic, TOPIC_FILENAME_CHARS)
    )
}
