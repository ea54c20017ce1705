//! The upload card on the ReportLens landing page.

use std::time::Duration;

use reportlens_core::intake::{self, FileCandidate};
use reportlens_model::UploadDescriptor;
use tokio::time::sleep;

/// How long an accepted file appears to upload by default.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Where the upload card is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing selected yet.
    #[default]
    Empty,
    /// The file was accepted and is being processed.
    Uploading(UploadDescriptor),
    /// The file is ready to be asked about.
    Ready(UploadDescriptor),
}

/// [`UploadBox`] builder.
pub struct UploadBoxBuilder {
    delay: Duration,
    on_file_upload: Option<Box<dyn Fn(&UploadDescriptor) + Send + Sync>>,
    on_question_submit: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

impl UploadBoxBuilder {
    /// Sets the simulated processing delay.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Attaches a callback invoked once a file is ready.
    #[inline]
    pub fn on_file_upload(
        mut self,
        on_file_upload: impl Fn(&UploadDescriptor) + Send + Sync + 'static,
    ) -> Self {
        self.on_file_upload = Some(Box::new(on_file_upload));
        self
    }

    /// Attaches a callback invoked with every forwarded question.
    #[inline]
    pub fn on_question_submit(
        mut self,
        on_question_submit: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.on_question_submit = Some(Box::new(on_question_submit));
        self
    }

    /// Creates an empty upload box.
    #[inline]
    pub fn build(self) -> UploadBox {
        UploadBox {
            config: self,
            state: UploadState::Empty,
        }
    }
}

/// The upload card.
pub struct UploadBox {
    config: UploadBoxBuilder,
    state: UploadState,
}

impl UploadBox {
    /// Creates a builder with the default delay and no callbacks.
    pub fn builder() -> UploadBoxBuilder {
        UploadBoxBuilder {
            delay: DEFAULT_PROCESSING_DELAY,
            on_file_upload: None,
            on_question_submit: None,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Validates and uploads `candidate`.
    ///
    /// A rejected file leaves the box as it was.
    pub async fn select(
        &mut self,
        candidate: FileCandidate,
    ) -> Result<UploadDescriptor, intake::Error> {
        let descriptor = intake::validate(&candidate).inspect_err(|err| {
            info!(
                file_name = %candidate.name,
                reason = %err.reason(),
                "upload rejected: {err}"
            );
        })?;

        self.state = UploadState::Uploading(descriptor.clone());
        debug!(file_name = %descriptor.file_name, "uploading");
        sleep(self.config.delay).await;

        self.state = UploadState::Ready(descriptor.clone());
        if let Some(on_file_upload) = &self.config.on_file_upload {
            on_file_upload(&descriptor);
        }
        Ok(descriptor)
    }

    /// Clears the selected file.
    #[inline]
    pub fn remove(&mut self) {
        self.state = UploadState::Empty;
    }

    /// Forwards `question` once a file is ready.
    ///
    /// Returns `false` if nothing was forwarded.
    pub fn ask(&self, question: &str) -> bool {
        if !matches!(self.state, UploadState::Ready(_)) {
            debug!("no file ready, question ignored");
            return false;
        }
        if question.trim().is_empty() {
            return false;
        }
        if let Some(on_question_submit) = &self.config.on_question_submit {
            on_question_submit(question);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use reportlens_core::intake::ErrorKind;
    use reportlens_model::MimeCategory;
    use tokio::time::Instant;

    use super::*;

    fn report() -> FileCandidate {
        FileCandidate::new(
            "TATASTEEL_Q4_2024.pdf",
            "application/pdf",
            2_516_582,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_file_becomes_ready_after_delay() {
        let uploaded = Arc::new(Mutex::new(Vec::new()));
        let mut upload_box = UploadBox::builder()
            .on_file_upload({
                let uploaded = Arc::clone(&uploaded);
                move |descriptor| {
                    uploaded.lock().unwrap().push(descriptor.file_name.clone())
                }
            })
            .build();
        assert_eq!(*upload_box.state(), UploadState::Empty);

        let started = Instant::now();
        let descriptor = upload_box.select(report()).await.unwrap();
        assert!(started.elapsed() >= DEFAULT_PROCESSING_DELAY);
        assert_eq!(descriptor.mime_category, MimeCategory::Pdf);
        assert_eq!(*upload_box.state(), UploadState::Ready(descriptor));
        assert_eq!(*uploaded.lock().unwrap(), ["TATASTEEL_Q4_2024.pdf"]);

        upload_box.remove();
        assert_eq!(*upload_box.state(), UploadState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_file_keeps_state() {
        let mut upload_box = UploadBox::builder()
            .with_delay(Duration::from_millis(10))
            .build();
        let ready = upload_box.select(report()).await.unwrap();

        let err = upload_box
            .select(FileCandidate::new("chart.png", "image/png", 10))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(*upload_box.state(), UploadState::Ready(ready));
    }

    #[tokio::test(start_paused = true)]
    async fn test_questions_need_a_ready_file() {
        let asked = Arc::new(Mutex::new(Vec::new()));
        let mut upload_box = UploadBox::builder()
            .on_question_submit({
                let asked = Arc::clone(&asked);
                move |question| asked.lock().unwrap().push(question.to_owned())
            })
            .build();

        assert!(!upload_box.ask("What is the PAT?"));
        upload_box.select(report()).await.unwrap();
        assert!(!upload_box.ask("   "));
        assert!(upload_box.ask("What is the PAT? "));
        assert_eq!(*asked.lock().unwrap(), ["What is the PAT? "]);
    }
}
