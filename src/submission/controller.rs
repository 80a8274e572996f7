use std::sync::Arc;

use tokio::sync::watch;
use url::Url;

use crate::{
    classifier::{BatchClassifier, ClassifyError},
    config::ClassifierConfig,
    domain::{BatchRequest, ClassificationResult, ViewRecord},
};

pub const CONFIGURATION_MESSAGE: &str = "Erro de configuração: A URL da API não foi encontrada.";
pub const REQUEST_MESSAGE: &str = "Falha ao comunicar com a API. Verifique o console.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Request,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmissionFailure {
    fn configuration() -> Self {
        Self {
            kind: FailureKind::Configuration,
            message: CONFIGURATION_MESSAGE.to_string(),
        }
    }

    fn request() -> Self {
        Self {
            kind: FailureKind::Request,
            message: REQUEST_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Loading,
    Error(SubmissionFailure),
    Success(Vec<ViewRecord>),
}

impl SubmissionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn failure(&self) -> Option<&SubmissionFailure> {
        match self {
            Self::Error(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&[ViewRecord]> {
        match self {
            Self::Success(records) => Some(records),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitTicket {
    token: u64,
    endpoint: Url,
    request: BatchRequest,
}

impl SubmitTicket {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn request(&self) -> &BatchRequest {
        &self.request
    }
}

pub struct SubmissionController<C> {
    classifier: Arc<C>,
    config: ClassifierConfig,
    phase: SubmissionPhase,
    updates: watch::Sender<SubmissionPhase>,
    latest_submit: u64,
}

impl<C: BatchClassifier> SubmissionController<C> {
    pub fn new(classifier: Arc<C>, config: ClassifierConfig) -> Self {
        let (updates, _) = watch::channel(SubmissionPhase::Idle);
        Self {
            classifier,
            config,
            phase: SubmissionPhase::Idle,
            updates,
            latest_submit: 0,
        }
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionPhase> {
        self.updates.subscribe()
    }

    pub async fn submit(&mut self, text: &str) {
        let Some(ticket) = self.begin_submit(text) else {
            return;
        };
        let outcome = self
            .classifier
            .classify_batch(ticket.endpoint(), ticket.request())
            .await;
        self.complete_submit(ticket, outcome);
    }

    /// `None` for empty text (phase untouched) or missing configuration (phase is `Error`).
    pub fn begin_submit(&mut self, text: &str) -> Option<SubmitTicket> {
        let Some(request) = BatchRequest::new(text) else {
            tracing::debug!(target: "submission", "ignoring submit with empty text");
            return None;
        };

        self.latest_submit += 1;
        self.set_phase(SubmissionPhase::Loading);

        let endpoint = match self.config.batch_endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => {
                tracing::error!(target: "submission", error = %err, "classifier endpoint not configured");
                self.set_phase(SubmissionPhase::Error(SubmissionFailure::configuration()));
                return None;
            }
        };

        tracing::info!(
            target: "submission",
            endpoint = %endpoint,
            emails = request.email_count(),
            token = self.latest_submit,
            "submitting batch"
        );
        Some(SubmitTicket {
            token: self.latest_submit,
            endpoint,
            request,
        })
    }

    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<Vec<ClassificationResult>, ClassifyError>,
    ) -> bool {
        if ticket.token != self.latest_submit {
            tracing::debug!(
                target: "submission",
                token = ticket.token,
                latest = self.latest_submit,
                "discarding stale classification response"
            );
            return false;
        }

        let next = match outcome {
            Ok(results) => {
                let records: Vec<ViewRecord> = results.into_iter().map(ViewRecord::from).collect();
                tracing::info!(target: "submission", results = records.len(), "batch classified");
                SubmissionPhase::Success(records)
            }
            Err(err) => {
                tracing::error!(
                    target: "submission",
                    endpoint = %ticket.endpoint,
                    error = %err,
                    "classification request failed"
                );
                SubmissionPhase::Error(SubmissionFailure::request())
            }
        };
        self.set_phase(next);
        true
    }

    fn set_phase(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
        self.updates.send_replace(self.phase.clone());
    }
}
