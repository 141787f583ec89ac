// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Rendering of resolution traces and generation summaries

use colored::Colorize;

use crate::errors::MsaconfError;
use crate::generator::GenerationReport;
use crate::output::FileKind;
use crate::resolver::{MsaResolution, ResolutionTrace};
use crate::utils::{print_error, print_info, print_success, print_warning};

/// Emit one tracing event per trace record
pub fn log_trace(msa: &MsaResolution) {
    for applied in &msa.trace.applied {
        tracing::info!(
            msa = %msa.name,
            component = %applied.component,
            target = %applied.target,
            old = applied.old.as_deref().unwrap_or("<unset>"),
            new = %applied.new,
            "applied override"
        );
    }

    for ignored in &msa.trace.ignored {
        tracing::warn!(
            msa = %msa.name,
            component = %ignored.component,
            target = %ignored.target,
            version = %ignored.version,
            reason = %ignored.reason,
            "ignored override"
        );
    }
}

/// Human-readable trace lines
pub fn trace_lines(trace: &ResolutionTrace) -> Vec<String> {
    let mut lines = Vec::new();

    for applied in &trace.applied {
        let old = applied.old.as_deref().unwrap_or("<unset>");
        let line = format!(
            "{}.{}: {} → {}",
            applied.component, applied.target, old, applied.new
        );
        if applied.changes_value() {
            lines.push(line);
        } else {
            lines.push(format!("{} (same as default)", line));
        }
    }

    for ignored in &trace.ignored {
        lines.push(format!(
            "{}.{}: {} ignored ({})",
            ignored.component, ignored.target, ignored.version, ignored.reason
        ));
    }

    lines
}

/// Print a trace to stderr
pub fn print_trace(name: &str, trace: &ResolutionTrace) {
    eprintln!("{}:", format!("Overrides for {}", name).bold());
    if trace.is_empty() {
        eprintln!("  {}", "none".dimmed());
        return;
    }

    for applied in &trace.applied {
        let old = applied.old.as_deref().unwrap_or("<unset>");
        eprintln!(
            "  {} {}.{}: {} → {}",
            "→".blue(),
            applied.component,
            applied.target,
            old.dimmed(),
            applied.new.green()
        );
    }

    for ignored in &trace.ignored {
        eprintln!(
            "  {} {}.{}: {} ({})",
            "⚠".yellow(),
            ignored.component,
            ignored.target,
            ignored.version,
            ignored.reason.to_string().dimmed()
        );
    }
}

/// Print the outcome of one generated document
pub fn print_generation(report: &GenerationReport, verbose: bool) {
    let resolution = &report.resolution;

    println!(
        "{} {} → {}",
        "Generated".bold(),
        report.target.input.display(),
        report.target.output_dir.display()
    );

    for msa in &resolution.msas {
        log_trace(msa);

        let ignored = msa.trace.ignored.len();
        if ignored > 0 {
            print_warning(&format!("{}: {} override(s) ignored", msa.name, ignored));
        }
    }

    match &report.written {
        Some(written) => {
            for file in &written.files {
                let label = match file.kind {
                    FileKind::Link => format!("{} (link to defaults)", file.path.display()),
                    FileKind::File => file.path.display().to_string(),
                };
                if verbose {
                    print_success(&format!("{} {}", label, short_digest(&file.digest).dimmed()));
                } else {
                    print_success(&label);
                }
            }
        }
        None => {
            print_info(&format!(
                "dry run: {} MSA(s), {} unchanged from defaults",
                resolution.msas.len(),
                resolution.unchanged_count()
            ));
        }
    }

    if verbose {
        for msa in resolution.msas.iter().filter(|m| !m.trace.is_empty()) {
            for line in trace_lines(&msa.trace) {
                println!("    {} {}", format!("{}:", msa.name).dimmed(), line);
            }
        }
    }
}

/// Print an error and its recovery steps
pub fn print_failure(error: &MsaconfError) {
    print_error(&error.to_string());

    if let Some(suggestion) = error.recovery() {
        eprintln!();
        eprintln!("{}:", suggestion.action.bold());
        for step in &suggestion.steps {
            eprintln!("  {}", step);
        }
        if !suggestion.commands.is_empty() {
            eprintln!();
            for command in &suggestion.commands {
                eprintln!("  {}", command.cyan());
            }
        }
    }
}

fn short_digest(digest: &str) -> &str {
    &digest[..digest.len().min(12)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{AppliedOverride, IgnoreReason, IgnoredOverride, OverrideTarget};

    #[test]
    fn test_trace_lines() {
        let trace = ResolutionTrace {
            applied: vec![
                AppliedOverride {
                    component: "review".into(),
                    target: OverrideTarget::Service("auth".into()),
                    old: Some("1.0".into()),
                    new: "1.1".into(),
                },
                AppliedOverride {
                    component: "review".into(),
                    target: OverrideTarget::Default,
                    old: Some("1.0".into()),
                    new: "1.0".into(),
                },
            ],
            ignored: vec![
                IgnoredOverride {
                    component: "review".into(),
                    target: OverrideTarget::Service("unknownsvc".into()),
                    version: "9.9".into(),
                    reason: IgnoreReason::UnknownService,
                },
                IgnoredOverride {
                    component: "prcessing".into(),
                    target: OverrideTarget::Default,
                    version: "9".into(),
                    reason: IgnoreReason::UnknownComponent,
                },
            ],
        };

        let lines = trace_lines(&trace);
        assert_eq!(lines[0], "review.services.auth: 1.0 → 1.1");
        assert_eq!(lines[1], "review.default: 1.0 → 1.0 (same as default)");
        assert_eq!(
            lines[2],
            "review.services.unknownsvc: 9.9 ignored (service not declared in defaults)"
        );
        assert_eq!(
            lines[3],
            "prcessing.default: 9 ignored (component not declared in defaults)"
        );
    }

    #[test]
    fn test_short_digest() {
        assert_eq!(short_digest("abcdef0123456789"), "abcdef012345");
        assert_eq!(short_digest("abc"), "abc");
    }
}
