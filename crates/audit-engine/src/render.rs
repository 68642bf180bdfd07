//! Plain-text rendering of an audit report
//!
//! Output targets legacy Latin-1 sinks (PDF core fonts, old terminals), so
//! characters outside that range are substituted rather than failing.

use std::fmt::Write;

use shared_types::AuditReport;

/// Typographic characters with a readable Latin-1 equivalent
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2026}', "..."),
    ('\u{20B9}', "INR "),
];

/// Best-effort conversion to Latin-1; unmappable characters become '?'
pub fn to_latin1_lossy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some((_, replacement)) = SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
            out.push_str(replacement);
        } else if (c as u32) <= 0xFF {
            out.push(c);
        } else {
            out.push('?');
        }
    }
    out
}

/// Render the report as Latin-1-safe plain text
pub fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write_report(&mut out, report);

    to_latin1_lossy(&out)
}

fn write_report(out: &mut String, report: &AuditReport) -> std::fmt::Result {
    writeln!(out, "LEGAL AUDIT REPORT")?;
    writeln!(out, "==================")?;
    writeln!(out)?;
    writeln!(out, "Risk Density: {:.1}%", report.risk_density * 100.0)?;
    writeln!(out, "Clauses analyzed: {}", report.classified_clauses)?;
    if report.truncated_clauses > 0 {
        writeln!(
            out,
            "Clauses skipped (limit reached): {}",
            report.truncated_clauses
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Risk Analysis ({} detected)", report.risks.len())?;
    writeln!(out, "---------------------------")?;
    if report.risks.is_empty() {
        writeln!(
            out,
            "No high-risk clauses detected. The contract looks standard."
        )?;
    }
    for risk in &report.risks {
        writeln!(
            out,
            "[{}] Confidence: {:.0}%",
            risk.label,
            risk.score * 100.0
        )?;
        writeln!(out, "  \"{}\"", risk.clause)?;
        writeln!(out, "  Negotiation Tip: {}", risk.tip)?;
        writeln!(out)?;
    }
    writeln!(out)?;

    let safe_total = report.safe_points.len() + report.safe_points_omitted;
    writeln!(out, "Verified Safe ({})", safe_total)?;
    writeln!(out, "-----------------")?;
    if report.safe_points.is_empty() {
        writeln!(out, "No explicitly safe points found.")?;
    }
    for point in &report.safe_points {
        writeln!(out, "  + {}", point.clause)?;
    }
    if report.safe_points_omitted > 0 {
        writeln!(
            out,
            "...and {} more safe clauses.",
            report.safe_points_omitted
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Executive Verdict")?;
    writeln!(out, "-----------------")?;
    writeln!(out, "{}", report.summary)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ClauseLabel, RiskFinding, SafeFinding};

    fn report() -> AuditReport {
        AuditReport {
            risk_density: 0.125,
            risks: vec![RiskFinding {
                clause: "Disputes go to arbitration chosen by the provider".to_string(),
                label: ClauseLabel::UnfairArbitration,
                score: 0.664,
                tip: "Propose mutual arbitration or a neutral venue (e.g., AAA rules).".to_string(),
            }],
            safe_points: vec![SafeFinding {
                clause: "Fees are payable in \u{20B9} within 30 days".to_string(),
            }],
            summary: "The agreement \u{201C}covers\u{201D} services \u{2013} monthly.".to_string(),
            classified_clauses: 8,
            truncated_clauses: 0,
            safe_points_omitted: 3,
        }
    }

    #[test]
    fn test_latin1_substitutions() {
        assert_eq!(to_latin1_lossy("\u{2018}a\u{2019}"), "'a'");
        assert_eq!(to_latin1_lossy("\u{20B9}500"), "INR 500");
        assert_eq!(to_latin1_lossy("caf\u{e9}"), "caf\u{e9}");
        assert_eq!(to_latin1_lossy("\u{4E2D}\u{6587}"), "??");
    }

    #[test]
    fn test_render_sections() {
        let text = render_text(&report());
        assert!(text.contains("Risk Density: 12.5%"));
        assert!(text.contains("[Unfair Arbitration] Confidence: 66%"));
        assert!(text.contains("Verified Safe (4)"));
        assert!(text.contains("Fees are payable in INR  within 30 days"));
        assert!(text.contains("...and 3 more safe clauses."));
        assert!(text.contains("The agreement \"covers\" services - monthly."));
    }

    #[test]
    fn test_render_empty_sections() {
        let empty = AuditReport {
            risk_density: 0.0,
            risks: vec![],
            safe_points: vec![],
            summary: "Nothing to report.".to_string(),
            classified_clauses: 0,
            truncated_clauses: 0,
            safe_points_omitted: 0,
        };
        let text = render_text(&empty);
        assert!(text.contains("No high-risk clauses detected. The contract looks standard."));
        assert!(text.contains("No explicitly safe points found."));
        assert!(!text.contains("more safe clauses"));
    }

    #[test]
    fn test_render_output_is_latin1() {
        let text = render_text(&report());
        assert!(text.chars().all(|c| (c as u32) <= 0xFF));
    }
}
