// Writes playbook text as a paginated PDF into the export directory.
// Layout and rendering are CPU-bound and do blocking file I/O, so async
// callers go through `export_async`, which uses tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{info, warn};

pub use font_metrics::{default_page_setup, PageSetup, HELVETICA};
pub use layout::layout_document;

pub const PDF_MIME: &str = "application/pdf";
const DOCUMENT_TITLE: &str = "Customer Support Playbook";
/// Upper bound on `_N` suffixes tried for one timestamp.
const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("line {line} contains {character:?}, which the document font cannot represent")]
    UnrepresentableCharacter { character: char, line: usize },

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no free file name left for {0}")]
    NameExhausted(String),

    #[error("export task failed: {0}")]
    Task(String),
}

/// A playbook written to disk, plus the bytes to hand to the browser.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: Bytes,
    pub cell_count: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct DocumentExporter {
    output_dir: PathBuf,
    setup: PageSetup,
}

/// `playbook_<YYYYMMDD>_<HHMMSS>.pdf` for the given local time.
pub fn timestamped_filename(now: NaiveDateTime) -> String {
    format!("playbook_{}.pdf", now.format("%Y%m%d_%H%M%S"))
}

/// Name to try on the `attempt`-th collision: `playbook_..._2.pdf`, `_3`, …
fn candidate_name(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        return base.to_string();
    }
    match base.strip_suffix(".pdf") {
        Some(stem) => format!("{stem}_{attempt}.pdf"),
        None => format!("{base}_{attempt}"),
    }
}

/// Writes `bytes` to a freshly created file, removing it again if the write
/// fails so no truncated PDF is left behind.
fn write_or_discard<W: Write>(mut out: W, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let result = out.write_all(bytes).and_then(|_| out.flush());
    if result.is_err() {
        drop(out);
        if let Err(e) = std::fs::remove_file(path) {
            warn!("could not remove partial export {}: {e}", path.display());
        }
    }
    result
}

impl DocumentExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            setup: default_page_setup(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Exports `text` using the current local time for the file name.
    pub fn export(&self, text: &str) -> Result<ExportedDocument, ExportError> {
        self.export_at(text, Local::now().naive_local())
    }

    /// Exports `text` as if it were `now`. Never overwrites an existing file:
    /// a taken name gets a numeric suffix instead.
    pub fn export_at(
        &self,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<ExportedDocument, ExportError> {
        let layout = layout_document(text, &self.setup, &HELVETICA)?;
        let bytes = pdf::render_pdf(&layout, &self.setup, DOCUMENT_TITLE)?;

        let base = timestamped_filename(now);
        let (filename, path) = self.write_new(&base, &bytes)?;

        info!(
            "Rendered {} cells as {} rows on {} pages",
            layout.cell_count,
            layout.row_count(),
            layout.pages.len()
        );

        Ok(ExportedDocument {
            filename,
            path,
            bytes: Bytes::from(bytes),
            cell_count: layout.cell_count,
            page_count: layout.pages.len(),
        })
    }

    /// Runs [`export`](Self::export) on the blocking pool.
    pub async fn export_async(&self, text: String) -> Result<ExportedDocument, ExportError> {
        let exporter = self.clone();
        tokio::task::spawn_blocking(move || exporter.export(&text))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }

    fn write_new(&self, base: &str, bytes: &[u8]) -> Result<(String, PathBuf), ExportError> {
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let filename = candidate_name(base, attempt);
            let path = self.output_dir.join(&filename);

            let file = OpenOptions::new().write(true).create_new(true).open(&path);
            match file {
                Ok(file) => {
                    write_or_discard(file, &path, bytes)
                        .map_err(|source| ExportError::Io {
                            path: path.clone(),
                            source,
                        })?;
                    return Ok((filename, path));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    warn!("{} already exists, trying next suffix", path.display());
                }
                Err(source) => return Err(ExportError::Io { path, source }),
            }
        }
        Err(ExportError::NameExhausted(base.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap()
    }

    fn is_timestamped_name(name: &str) -> bool {
        let Some(rest) = name.strip_prefix("playbook_") else {
            return false;
        };
        let Some(stamp) = rest.strip_suffix(".pdf") else {
            return false;
        };
        let parts: Vec<&str> = stamp.split('_').collect();
        parts.len() == 2
            && parts[0].len() == 8
            && parts[1].len() == 6
            && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn test_timestamped_filename_format() {
        assert_eq!(
            timestamped_filename(fixed_time()),
            "playbook_20250314_092653.pdf"
        );
    }

    #[test]
    fn test_export_writes_file_with_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DocumentExporter::new(dir.path());

        let doc = exporter.export("Greeting\nSolution\nClosing").unwrap();

        assert!(is_timestamped_name(&doc.filename), "bad name {}", doc.filename);
        assert!(doc.cell_count >= 3);
        assert_eq!(doc.page_count, 1);
        let on_disk = std::fs::read(&doc.path).unwrap();
        assert_eq!(on_disk, doc.bytes.to_vec());
        assert!(on_disk.starts_with(b"%PDF"));
    }

    #[test]
    fn test_same_second_exports_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DocumentExporter::new(dir.path());

        let first = exporter.export_at("first", fixed_time()).unwrap();
        let second = exporter.export_at("second", fixed_time()).unwrap();
        let third = exporter.export_at("third", fixed_time()).unwrap();

        assert_eq!(first.filename, "playbook_20250314_092653.pdf");
        assert_eq!(second.filename, "playbook_20250314_092653_2.pdf");
        assert_eq!(third.filename, "playbook_20250314_092653_3.pdf");
        assert_eq!(std::fs::read(&first.path).unwrap(), first.bytes.to_vec());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_unrepresentable_text_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DocumentExporter::new(dir.path());

        let err = exporter.export("✅ Done\n❌ Error: boom").unwrap_err();
        assert!(matches!(
            err,
            ExportError::UnrepresentableCharacter {
                character: '✅',
                line: 1
            }
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_typographic_punctuation_exports() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DocumentExporter::new(dir.path());

        let doc = exporter
            .export("We’re sorry — your order is on its way.\n• Step one\n“Thanks” – Support…")
            .unwrap();
        assert_eq!(doc.cell_count, 3);
        assert!(doc.bytes.starts_with(b"%PDF"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playbook_20250314_092653.pdf");
        std::fs::write(&path, b"%PDF-partial").unwrap();

        let err = write_or_discard(FailingWriter, &path, b"%PDF-1.3").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(!path.exists());
    }

    #[test]
    fn test_successful_write_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let file = std::fs::File::create(&path).unwrap();

        write_or_discard(file, &path, b"%PDF-1.3").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DocumentExporter::new(dir.path().join("does-not-exist"));
        let err = exporter.export("text").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[tokio::test]
    async fn test_export_async_runs_on_blocking_pool() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DocumentExporter::new(dir.path());
        let doc = exporter
            .export_async("a\nb\nc".to_string())
            .await
            .unwrap();
        assert_eq!(doc.cell_count, 3);
        assert!(doc.path.starts_with(dir.path()));
    }

    #[test]
    fn test_candidate_names() {
        assert_eq!(candidate_name("playbook_x.pdf", 1), "playbook_x.pdf");
        assert_eq!(candidate_name("playbook_x.pdf", 4), "playbook_x_4.pdf");
    }
}
