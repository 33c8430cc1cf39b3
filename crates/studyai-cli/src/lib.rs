use indicatif::{ProgressBar, ProgressStyle};
use studyai_core::{SelectedFile, TransferProgress, ValidationError};
use studyai_ui::{Dropzone, FilePicker};
use tokio::sync::mpsc::UnboundedReceiver;

/// Run a file through the picker and the dropzone, as the page would on a drop.
///
/// Returns a dropzone holding the file, or the inline validation error.
pub fn select_file(file: SelectedFile) -> Result<Dropzone, ValidationError> {
    let mut dropzone = Dropzone::default();
    let mut picker = FilePicker::new(|picked: SelectedFile| {
        dropzone.drop(vec![picked]);
    });

    if picker.accept(vec![file]).is_none() {
        return Err(picker
            .last_rejection()
            .cloned()
            .unwrap_or(ValidationError::NothingToGenerate));
    }
    drop(picker);

    Ok(dropzone)
}

/// Byte progress bar for an upload of `total` bytes.
pub fn upload_bar(total: u64, name: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{msg:30} {bar:40} {bytes}/{total_bytes} ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    bar.set_style(style);
    bar.set_message(name.to_string());
    bar
}

/// Mirror transfer events onto the dropzone and the bar until the upload drops its sender.
pub async fn follow_upload(
    dropzone: &mut Dropzone,
    bar: &ProgressBar,
    mut events: UnboundedReceiver<TransferProgress>,
) {
    while let Some(event) = events.recv().await {
        dropzone.record_transfer(event.sent, event.total);
        bar.set_position(event.sent);
    }
}

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_file_keeps_valid_pdf() {
        let file = SelectedFile::new("notes.pdf", "application/pdf", b"%PDF".to_vec());

        let dropzone = select_file(file).unwrap();

        assert_eq!(dropzone.file().map(|f| f.name()), Some("notes.pdf"));
        assert!(dropzone.error().is_none());
    }

    #[test]
    fn select_file_reports_wrong_type() {
        let file = SelectedFile::new("notes.txt", "application/octet-stream", b"hi".to_vec());

        let err = select_file(file).unwrap_err();

        assert_eq!(err.to_string(), "Please upload a PDF file");
    }

    #[tokio::test]
    async fn follow_upload_moves_dropzone_and_bar() {
        let file = SelectedFile::new("notes.pdf", "application/pdf", vec![0u8; 200]);
        let mut dropzone = select_file(file).unwrap();
        dropzone.generate().unwrap();
        let bar = ProgressBar::hidden();
        bar.set_length(200);
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<TransferProgress>();

        tx.send(TransferProgress { sent: 100, total: 200 }).unwrap();
        tx.send(TransferProgress { sent: 200, total: 200 }).unwrap();
        drop(tx);
        follow_upload(&mut dropzone, &bar, rx).await;

        assert_eq!(dropzone.progress(), 100);
        assert_eq!(bar.position(), 200);
        assert!(dropzone.state().is_uploading());
    }

    #[test]
    fn select_file_reports_oversized_pdf() {
        let file = SelectedFile::new("big.pdf", "application/pdf", b"%PDF".to_vec())
            .with_declared_size(26_214_401);

        let err = select_file(file).unwrap_err();

        assert_eq!(err.to_string(), "File size exceeds 25MB limit");
    }
}
