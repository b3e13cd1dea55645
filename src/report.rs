//! Terminal rendering of an audit
//!
//! Sections print in the order the model returned them; each metric gets a
//! ten-cell gauge.

use std::fmt::Write;

use auditor_core::llm::MAX_SCORE;
use auditor_core::{AuditResult, AuditSection, MetricScore};

const GAUGE_FILLED: char = '#';
const GAUGE_EMPTY: char = '-';

/// `[#######---]  7/10`
pub fn render_gauge(score: u8) -> String {
    let filled = usize::from(score.min(MAX_SCORE));
    let empty = usize::from(MAX_SCORE) - filled;
    format!(
        "[{}{}] {:>2}/{}",
        GAUGE_FILLED.to_string().repeat(filled),
        GAUGE_EMPTY.to_string().repeat(empty),
        score,
        MAX_SCORE
    )
}

fn render_scores(out: &mut String, scores: &[MetricScore]) {
    let width = scores.iter().map(|m| m.metric.len()).max().unwrap_or(0);
    for m in scores {
        let _ = writeln!(out, "  {:<width$}  {}", m.metric, render_gauge(m.score));
    }
}

/// Render the full audit as plain text
pub fn render_report(result: &AuditResult) -> String {
    let mut out = String::new();
    for (i, section) in result.sections().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let title = section.name().to_string();
        let _ = writeln!(out, "{}\n{}", title, "=".repeat(title.len()));
        match section {
            AuditSection::AuditReport(text) | AuditSection::Suggestions(text) => {
                let _ = writeln!(out, "{}", text.trim_end());
            }
            AuditSection::MetricScores(scores) => render_scores(&mut out, scores),
        }
    }
    out
}
