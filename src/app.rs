use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use tokio::{io::AsyncReadExt, sync::watch};

use crate::{
    classifier::{BatchClassifier, HttpClassifier},
    cli::Cli,
    config::{AppConfig, ClassifierConfig},
    domain::{BatchRequest, ViewRecord},
    intake::{InputComposer, IntakeError, SelectedFile},
    render::{self, FormView},
    submission::{controller::FailureKind, SubmissionController, SubmissionPhase},
};

const EXIT_EMPTY_INPUT: u8 = 2;
const EXIT_MISCONFIGURED: u8 = 3;

pub struct TriageForm<C> {
    composer: InputComposer,
    controller: SubmissionController<C>,
}

impl<C: BatchClassifier> TriageForm<C> {
    pub fn new(classifier: Arc<C>, config: ClassifierConfig) -> Self {
        Self {
            composer: InputComposer::new(),
            controller: SubmissionController::new(classifier, config),
        }
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.composer.file_name()
    }

    pub fn phase(&self) -> &SubmissionPhase {
        self.controller.phase()
    }

    pub fn results(&self) -> Option<&[ViewRecord]> {
        self.controller.phase().results()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionPhase> {
        self.controller.subscribe()
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.composer.set_text_direct(value);
    }

    pub async fn select_file(&mut self, file: SelectedFile) -> Result<(), IntakeError> {
        self.composer.load_from_file(file).await
    }

    pub fn can_submit(&self) -> bool {
        !self.controller.phase().is_loading() && !self.composer.text().is_empty()
    }

    pub async fn submit(&mut self) -> bool {
        self.composer.clear_error();
        if !self.can_submit() {
            tracing::debug!(target: "app", "submit ignored: nothing to send or already loading");
            return false;
        }
        let text = self.composer.text().to_string();
        self.controller.submit(&text).await;
        true
    }

    // intake errors win over the last submission failure
    pub fn error_message(&self) -> Option<&str> {
        self.composer
            .error()
            .map(IntakeError::user_message)
            .or_else(|| self.controller.phase().failure().map(|f| f.message.as_str()))
    }

    pub fn view(&self) -> FormView<'_> {
        FormView {
            phase: self.controller.phase(),
            error: self.error_message(),
            file_name: self.composer.file_name(),
            can_submit: self.can_submit(),
        }
    }
}

pub async fn run(config: AppConfig, cli: Cli) -> Result<ExitCode> {
    let classifier = Arc::new(
        HttpClassifier::with_user_agent(&config.classifier.user_agent)
            .context("failed to build HTTP client")?,
    );
    let mut form = TriageForm::new(classifier, config.classifier.clone());

    if let Some(request) = BatchRequest::from_emails(&cli.texts) {
        form.set_text(request.text);
    }
    if let Some(path) = cli.file {
        if form.select_file(SelectedFile::from_path(path)).await.is_err() {
            print!("{}", render::render_form(&form.view()));
            return Ok(ExitCode::FAILURE);
        }
    }
    if cli.texts.is_empty() && form.selected_file_name().is_none() {
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("failed to read emails from stdin")?;
        form.set_text(input);
    }

    if !form.can_submit() {
        print!("{}", render::render_form(&form.view()));
        return Ok(ExitCode::from(EXIT_EMPTY_INPUT));
    }

    let progress = spawn_progress_reporter(form.subscribe());
    form.submit().await;
    progress.abort();

    match form.results() {
        Some(records) if cli.json => {
            println!("{}", render::render_json(records)?);
        }
        _ => print!("{}", render::render_form(&form.view())),
    }

    Ok(match form.phase() {
        SubmissionPhase::Success(_) => ExitCode::SUCCESS,
        SubmissionPhase::Error(failure) if failure.kind == FailureKind::Configuration => {
            ExitCode::from(EXIT_MISCONFIGURED)
        }
        _ => ExitCode::FAILURE,
    })
}

fn spawn_progress_reporter(
    mut updates: watch::Receiver<SubmissionPhase>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            if updates.borrow_and_update().is_loading() {
                eprintln!("Analisando...");
            }
        }
    })
}
