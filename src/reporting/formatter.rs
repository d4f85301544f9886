use console::style;

use crate::attacks::ProbeReport;
use crate::models::{BlockAnalysis, Candidate, Confidence, Findings, Prediction, PredictionSource};

fn confidence_label(confidence: Confidence) -> String {
    let label = format!("{:?}", confidence).to_uppercase();
    match confidence {
        Confidence::Exact | Confidence::Derived => style(label).green().bold().to_string(),
        Confidence::Plausible => style(label).yellow().to_string(),
        Confidence::Implausible => style(label).dim().to_string(),
        Confidence::Guess => style(label).red().to_string(),
    }
}

pub fn format_candidate(candidate: &Candidate) -> String {
    let mut line = format!(
        "[{}] {:<16} {}",
        confidence_label(candidate.confidence),
        candidate.method.to_string(),
        candidate.value
    );
    if let Some(score) = &candidate.score {
        line.push_str(&format!(
            "  (printable {:.0}%, words {}, hints {})",
            score.printable_ratio * 100.0,
            score.dictionary_word_hits,
            score.hint_word_hits
        ));
    }
    if let Some(attempts) = candidate.attempts {
        line.push_str(&format!("  after {} attempts", attempts));
    }
    line
}

pub fn format_candidates(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "No candidates.\n".to_string();
    }
    let mut out = String::new();
    for (i, c) in candidates.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, format_candidate(c)));
    }
    out
}

pub fn format_block_analysis(analysis: &BlockAnalysis) -> String {
    let mut out = format!(
        "Decoded {} bytes in {} blocks, {} repeated\n",
        analysis.decoded_len, analysis.block_count, analysis.repeated_blocks
    );
    if analysis.weaknesses.is_empty() {
        out.push_str("Weaknesses: none detected\n");
    } else {
        out.push_str("Weaknesses:\n");
        for w in &analysis.weaknesses {
            out.push_str(&format!("  - {}\n", w.description()));
        }
    }
    for r in &analysis.recommendations {
        out.push_str(&format!("Recommendation: {}\n", r));
    }
    if !analysis.key_size_hints.is_empty() {
        out.push_str("Key size hints (length divisibility only):\n");
        for h in &analysis.key_size_hints {
            out.push_str(&format!("  - {}\n", h));
        }
    }
    out
}

pub fn format_prediction(prediction: &Prediction) -> String {
    let header = match &prediction.source {
        PredictionSource::LcgRecovery { generator } => format!(
            "Recovered LCG '{}' (a={}, c={}, m={})",
            generator.name, generator.a, generator.c, generator.m
        ),
        PredictionSource::LinearExtrapolation { delta } => format!(
            "{} linear extrapolation with delta {}",
            style("NOT AN LCG RECOVERY:").yellow(),
            delta
        ),
        PredictionSource::Insufficient => "Not enough observations (need at least 2)".to_string(),
    };
    let values: Vec<String> = prediction.values.iter().map(|v| v.to_string()).collect();
    format!("{}\nNext values: [{}]\n", header, values.join(", "))
}

pub fn format_probe_report(report: &ProbeReport) -> String {
    let mut out = format!("Discovered prefix: {:?}\n", report.discovered);
    for (i, p) in report.positions.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}: '{}' slowest {:?} fastest {:?}\n",
            i, p.accepted, p.slowest, p.fastest
        ));
    }
    if report.stopped_early {
        out.push_str("Stopped: no timing signal above threshold\n");
    }
    out
}

pub fn format_findings(findings: &Findings) -> String {
    match findings {
        Findings::Digest { preimage } | Findings::Token { secret: preimage } => match preimage {
            Some(c) => format!("{}\n", format_candidate(c)),
            None => "Not found.\n".to_string(),
        },
        Findings::Ciphertext { candidates, blocks } => {
            let mut out = format_candidates(candidates);
            if let Some(b) = blocks {
                out.push('\n');
                out.push_str(&format_block_analysis(b));
            }
            out
        }
        Findings::ObservedSequence { prediction } => format_prediction(prediction),
    }
}
