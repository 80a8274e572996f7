use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub const PLAIN_TEXT: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("unsupported file type {declared:?} for {name}")]
    InvalidFileType { name: String, declared: String },
    #[error("failed to read {name}: {detail}")]
    FileRead { name: String, detail: String },
}

impl IntakeError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidFileType { .. } => "Por favor, selecione um arquivo .txt válido.",
            Self::FileRead { .. } => "Falha ao ler o arquivo.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            path: path.into(),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = media_type_for(&path);
        Self::new(name, media_type, path)
    }

    pub fn is_plain_text(&self) -> bool {
        self.media_type == PLAIN_TEXT
    }
}

fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("txt") | Some("text") => PLAIN_TEXT,
        Some("csv") => "text/csv",
        Some("md") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        Some("eml") => "message/rfc822",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadTicket {
    token: u64,
    file: SelectedFile,
}

impl ReadTicket {
    pub async fn read(&self) -> io::Result<String> {
        let bytes = tokio::fs::read(&self.file.path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[derive(Debug, Default)]
pub struct InputComposer {
    buffer: String,
    file_name: Option<String>,
    error: Option<IntakeError>,
    latest_read: u64,
}

impl InputComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn error(&self) -> Option<&IntakeError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_text_direct(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
    }

    pub async fn load_from_file(&mut self, file: SelectedFile) -> Result<(), IntakeError> {
        let ticket = self.begin_file_load(file)?;
        let outcome = ticket.read().await;
        self.complete_file_load(ticket, outcome);
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub fn begin_file_load(&mut self, file: SelectedFile) -> Result<ReadTicket, IntakeError> {
        if !file.is_plain_text() {
            tracing::warn!(
                target: "intake",
                file = %file.name,
                media_type = %file.media_type,
                "rejected non text file"
            );
            self.latest_read += 1;
            let err = IntakeError::InvalidFileType {
                name: file.name,
                declared: file.media_type,
            };
            self.error = Some(err.clone());
            return Err(err);
        }

        self.file_name = Some(file.name.clone());
        self.latest_read += 1;
        Ok(ReadTicket {
            token: self.latest_read,
            file,
        })
    }

    /// Returns false when a newer selection superseded this read.
    pub fn complete_file_load(&mut self, ticket: ReadTicket, outcome: io::Result<String>) -> bool {
        if ticket.token != self.latest_read {
            tracing::debug!(
                target: "intake",
                file = %ticket.file.name,
                token = ticket.token,
                latest = self.latest_read,
                "discarding stale file read"
            );
            return false;
        }

        match outcome {
            Ok(text) => {
                tracing::info!(
                    target: "intake",
                    file = %ticket.file.name,
                    chars = text.chars().count(),
                    "file loaded"
                );
                self.buffer = text;
                self.error = None;
            }
            Err(source) => {
                tracing::error!(
                    target: "intake",
                    file = %ticket.file.name,
                    error = %source,
                    "failed to read file"
                );
                self.error = Some(IntakeError::FileRead {
                    name: ticket.file.name,
                    detail: source.to_string(),
                });
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn text_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(SelectedFile::from_path("emails.TXT").media_type, PLAIN_TEXT);
        assert_eq!(SelectedFile::from_path("/tmp/photo.png").media_type, "image/png");
        assert_eq!(SelectedFile::from_path("/tmp/photo.png").name, "photo.png");
        assert_eq!(
            SelectedFile::from_path("README").media_type,
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn png_is_rejected_and_buffer_kept() {
        let mut composer = InputComposer::new();
        composer.set_text_direct("typed by hand");

        let file = SelectedFile::new("photo.png", "image/png", "/does/not/matter.png");
        let err = composer.load_from_file(file).await.unwrap_err();

        assert!(matches!(err, IntakeError::InvalidFileType { .. }));
        assert_eq!(composer.error(), Some(&err));
        assert_eq!(composer.text(), "typed by hand");
        assert_eq!(composer.file_name(), None);
        assert_eq!(err.user_message(), "Por favor, selecione um arquivo .txt válido.");
    }

    #[tokio::test]
    async fn text_file_replaces_buffer() {
        let file = text_file("Olá, feliz natal!\n---\nPreciso do status do pedido.");
        let mut composer = InputComposer::new();
        composer.set_text_direct("old");

        composer
            .load_from_file(SelectedFile::from_path(file.path()))
            .await
            .unwrap();

        assert_eq!(composer.text(), "Olá, feliz natal!\n---\nPreciso do status do pedido.");
        assert!(composer.file_name().unwrap().ends_with(".txt"));
        assert!(composer.error().is_none());
    }

    #[tokio::test]
    async fn empty_file_is_accepted() {
        let file = text_file("");
        let mut composer = InputComposer::new();
        composer.set_text_direct("old");

        composer
            .load_from_file(SelectedFile::from_path(file.path()))
            .await
            .unwrap();
        assert_eq!(composer.text(), "");
    }

    #[tokio::test]
    async fn read_failure_keeps_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.txt");
        let mut composer = InputComposer::new();
        composer.set_text_direct("keep me");

        let err = composer
            .load_from_file(SelectedFile::from_path(&missing))
            .await
            .unwrap_err();

        assert!(matches!(err, IntakeError::FileRead { .. }));
        assert_eq!(err.user_message(), "Falha ao ler o arquivo.");
        assert_eq!(composer.text(), "keep me");
        assert_eq!(composer.file_name(), Some("gone.txt"));
    }

    #[tokio::test]
    async fn stale_read_is_discarded() {
        let first = text_file("first selection");
        let second = text_file("second selection");
        let mut composer = InputComposer::new();

        let older = composer
            .begin_file_load(SelectedFile::from_path(first.path()))
            .unwrap();
        let newer = composer
            .begin_file_load(SelectedFile::from_path(second.path()))
            .unwrap();

        let newer_text = newer.read().await;
        assert!(composer.complete_file_load(newer, newer_text));
        let older_text = older.read().await;
        assert!(!composer.complete_file_load(older, older_text));

        assert_eq!(composer.text(), "second selection");
    }

    #[test]
    fn stale_failure_does_not_set_error() {
        let mut composer = InputComposer::new();
        let older = composer
            .begin_file_load(SelectedFile::new("a.txt", PLAIN_TEXT, "a.txt"))
            .unwrap();
        let newer = composer
            .begin_file_load(SelectedFile::new("b.txt", PLAIN_TEXT, "b.txt"))
            .unwrap();

        assert!(composer.complete_file_load(newer, Ok("b".to_string())));
        let failed = Err(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!composer.complete_file_load(older, failed));
        assert!(composer.error().is_none());
        assert_eq!(composer.text(), "b");
    }

    #[test]
    fn rejected_selection_supersedes_read_in_flight() {
        let mut composer = InputComposer::new();
        composer.set_text_direct("typed");

        let pending = composer
            .begin_file_load(SelectedFile::new("a.txt", PLAIN_TEXT, "a.txt"))
            .unwrap();
        assert!(composer
            .begin_file_load(SelectedFile::new("x.png", "image/png", "x.png"))
            .is_err());

        assert!(!composer.complete_file_load(pending, Ok("from a.txt".to_string())));
        assert_eq!(composer.text(), "typed");
        assert!(matches!(
            composer.error(),
            Some(IntakeError::InvalidFileType { .. })
        ));
    }

    #[tokio::test]
    async fn invalid_utf8_is_decoded_lossily() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(&[b'o', b'l', 0xE1, b'!']).unwrap();
        let mut composer = InputComposer::new();

        composer
            .load_from_file(SelectedFile::from_path(file.path()))
            .await
            .unwrap();
        assert_eq!(composer.text(), "ol\u{FFFD}!");
    }
}
