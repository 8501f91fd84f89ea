//! # Program Logs
//!
//! Per-transaction log lines in the ledger's format:
//!
//! ```text
//! Program <id> invoke [1]
//! Program log: Instruction: CreatePixel
//! Program data: <hex>
//! Program <id> success
//! ```
//!
//! A program error adds
//! `Program log: Error Code: <Name>. Error Number: <n>. Error Message: <msg>.`
//! and the run ends with `Program <id> failed: <error>`.

use crate::domain::value_objects::Address;
use crate::errors::LedgerError;

/// Line written once the line budget is spent.
pub const TRUNCATED: &str = "Log truncated";

/// Log buffer for one transaction.
#[derive(Debug, Clone)]
pub struct ProgramLogs {
    program_id: Address,
    lines: Vec<String>,
    max_lines: usize,
    truncated: bool,
}

impl ProgramLogs {
    /// Creates an empty buffer holding at most `max_lines` lines.
    #[must_use]
    pub fn new(program_id: Address, max_lines: usize) -> Self {
        Self {
            program_id,
            lines: Vec::new(),
            max_lines,
            truncated: false,
        }
    }

    /// `Program <id> invoke [1]`
    pub fn invoke(&mut self) {
        self.push(format!("Program {} invoke [1]", self.program_id.to_hex()));
    }

    /// `Program log: <message>`
    pub fn log(&mut self, message: &str) {
        self.push(format!("Program log: {message}"));
    }

    /// `Program data: <hex>`
    pub fn data(&mut self, bytes: &[u8]) {
        self.push(format!("Program data: {}", hex::encode(bytes)));
    }

    /// Records why the program aborted.
    ///
    /// Program errors get the numbered `Error Code` line; ledger errors are
    /// only visible in the closing `failed` line.
    pub fn error(&mut self, error: &LedgerError) {
        if let Some(program_error) = error.program_error() {
            self.log(&format!(
                "Error Code: {}. Error Number: {}. Error Message: {}.",
                program_error.name(),
                program_error.code(),
                program_error.log_message()
            ));
        }
    }

    /// `Program <id> success`
    pub fn success(&mut self) {
        self.push(format!("Program {} success", self.program_id.to_hex()));
    }

    /// `Program <id> failed: <error>`
    pub fn failed(&mut self, error: &LedgerError) {
        let reason = match error.program_error() {
            Some(program_error) => format!("custom program error: {:#x}", program_error.code()),
            None => error.to_string(),
        };
        self.push(format!("Program {} failed: {reason}", self.program_id.to_hex()));
    }

    /// The lines so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the buffer.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// True if any line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    fn push(&mut self, line: String) {
        if self.lines.len() < self.max_lines {
            self.lines.push(line);
        } else if !self.truncated {
            self.truncated = true;
            self.lines.push(TRUNCATED.to_string());
        }
    }
}
