use std::fmt::Write;

use crate::{
    domain::{CategoryTone, ViewRecord},
    submission::SubmissionPhase,
};

#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub phase: &'a SubmissionPhase,
    pub error: Option<&'a str>,
    pub file_name: Option<&'a str>,
    pub can_submit: bool,
}

pub const EMPTY_INPUT_HINT: &str = "Cole os emails separados por uma linha com (---) ou carregue um arquivo .txt.";

pub fn render_form(view: &FormView<'_>) -> String {
    let mut out = String::new();

    if let Some(name) = view.file_name {
        let _ = writeln!(out, "Arquivo selecionado: {name}");
    }
    if view.phase.is_loading() {
        let _ = writeln!(out, "Analisando...");
    }
    if let Some(error) = view.error {
        let _ = writeln!(out, "Erro: {error}");
    }
    if !view.can_submit && matches!(view.phase, SubmissionPhase::Idle) {
        let _ = writeln!(out, "{EMPTY_INPUT_HINT}");
    }
    if let Some(records) = view.phase.results() {
        render_results(&mut out, records);
    }
    out
}

fn render_results(out: &mut String, records: &[ViewRecord]) {
    let _ = writeln!(out, "Resultados da Análise ({} emails)", records.len());
    for (index, record) in records.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Email {}: {}", index + 1, single_line(&record.original_email));
        let _ = writeln!(
            out,
            "  {} {} (Confiança: {})",
            tone_marker(record.category_tone()),
            record.category_label(),
            record.confidence_percent()
        );
        let _ = writeln!(out, "  Sugestão de Resposta:");
        for line in record.suggested_reply.lines() {
            let _ = writeln!(out, "    {line}");
        }
        let _ = writeln!(out, "  Responder por Email: {}", record.reply_link);
    }
}

fn tone_marker(tone: CategoryTone) -> &'static str {
    match tone {
        CategoryTone::Productive => "[+]",
        CategoryTone::Unproductive => "[-]",
        CategoryTone::Other => "[!]",
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn render_json(records: &[ViewRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
