use crate::registration::{DraftField, ReviewRow};
use chrono::{DateTime, Local};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("failed to create print directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write receipt {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Printable rendering of the confirmation view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub institution: String,
    pub printed_at: DateTime<Local>,
    pub rows: Vec<ReviewRow>,
}

impl RegistrationReceipt {
    pub fn new(institution: &str, rows: Vec<ReviewRow>) -> Self {
        Self {
            institution: institution.to_string(),
            printed_at: Local::now(),
            rows,
        }
    }

    pub fn render(&self) -> String {
        let label_width = self
            .rows
            .iter()
            .map(|row| row.label.chars().count() + 1)
            .max()
            .unwrap_or(0);
        let mut lines = vec![
            self.institution.clone(),
            "Registration Details".to_string(),
            format!("Printed: {}", self.printed_at.format("%Y-%m-%d %H:%M")),
            "-".repeat(40),
        ];
        for row in &self.rows {
            let label = format!("{}:", row.label);
            lines.push(format!("{label:<label_width$}  {}", row.value));
        }
        lines.push("-".repeat(40));
        lines.join("\n")
    }

    /// `receipt-<pin>-<timestamp>.txt`, with the PIN reduced to filename-safe characters.
    pub fn file_name(&self) -> String {
        let pin = self
            .rows
            .iter()
            .find(|row| row.field == DraftField::PinNumber)
            .map(|row| row.value.as_str())
            .unwrap_or("");
        let mut safe: String = pin
            .trim()
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        if safe.is_empty() {
            safe = "draft".to_string();
        }
        format!(
            "receipt-{safe}-{}.txt",
            self.printed_at.format("%Y%m%d%H%M%S")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    File(PathBuf),
    Captured { index: usize },
}

impl std::fmt::Display for PrintOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrintOutcome::File(path) => write!(f, "receipt saved to {}", path.display()),
            PrintOutcome::Captured { index } => write!(f, "receipt #{} captured", index + 1),
        }
    }
}

/// Host print capability. The controller only invokes it.
pub trait PrintSink {
    fn print(&self, receipt: &RegistrationReceipt) -> Result<PrintOutcome, PrintError>;
}

#[derive(Debug, Clone)]
pub struct FilePrintSink {
    dir: PathBuf,
}

impl FilePrintSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PrintSink for FilePrintSink {
    fn print(&self, receipt: &RegistrationReceipt) -> Result<PrintOutcome, PrintError> {
        fs::create_dir_all(&self.dir).map_err(|source| PrintError::CreateDir {
            path: self.dir.display().to_string(),
            source,
        })?;
        let path = self.dir.join(receipt.file_name());
        write_receipt_atomically(&path, receipt.render().as_bytes()).map_err(|source| {
            PrintError::Write {
                path: path.display().to_string(),
                source,
            }
        })?;
        Ok(PrintOutcome::File(path))
    }
}

fn write_receipt_atomically(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("receipt path has no parent"))?;
    let tmp_path = parent.join(format!(
        ".{}.tmp-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("receipt"),
        std::process::id()
    ));
    {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&tmp_path)?;
        file.write_all(body)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)
}

/// Keeps rendered receipts in memory; used by scripted runs and tests.
#[derive(Debug, Default)]
pub struct CapturePrintSink {
    receipts: Mutex<Vec<String>>,
}

impl CapturePrintSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipts(&self) -> Vec<String> {
        self.receipts
            .lock()
            .map(|receipts| receipts.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl PrintSink for CapturePrintSink {
    fn print(&self, receipt: &RegistrationReceipt) -> Result<PrintOutcome, PrintError> {
        let mut receipts = self
            .receipts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        receipts.push(receipt.render());
        Ok(PrintOutcome::Captured {
            index: receipts.len() - 1,
        })
    }
}
