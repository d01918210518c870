//! Text and JSON rendering of per-line results and the final report.

use crate::error::ValidationError;
use crate::line::{LineOutcome, MetricLine};
use crate::report::Report;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Longest line prefix echoed in verbose output, in characters.
pub const VERBOSE_LINE_CHARS: usize = 120;

const RULE: &str = "============================================================";

/// Verbose line: `[OK] L<n>: <text>` or `[INVALID] ...` plus one indented row per error.
/// Skipped lines produce nothing.
pub fn format_line(line: MetricLine<'_>, outcome: &LineOutcome) -> Option<String> {
    let status = match outcome {
        LineOutcome::Skipped => return None,
        LineOutcome::Valid(_) => "OK",
        LineOutcome::Invalid(_) => "INVALID",
    };
    let content = line.content();
    let shown = match content.char_indices().nth(VERBOSE_LINE_CHARS) {
        Some((cut, _)) => &content[..cut],
        None => content,
    };
    let mut out = format!("[{}] L{}: {}", status, line.number, shown);
    for error in outcome.errors() {
        let _ = write!(out, "\n         {}", error);
    }
    Some(out)
}

fn format_error(error: &ValidationError, with_input: bool) -> String {
    match (&error.input, with_input) {
        (Some(input), true) => format!("{}: {}", input, error),
        _ => error.to_string(),
    }
}

/// Human-readable summary. `with_inputs` prefixes each error with its source name, which is
/// only useful when more than one source was validated.
pub fn format_summary(report: &Report, with_inputs: bool) -> String {
    let mut out = format!(
        "\n{rule}\nMINT Validation Summary\n{rule}\n\
         Total data lines:  {}\n\
         Valid:             {}\n\
         Invalid:           {}\n\
         Skipped (empty/#): {}\n\n",
        report.total_data_lines,
        report.valid,
        report.invalid,
        report.skipped,
        rule = RULE,
    );

    if !report.metric_keys.is_empty() {
        out.push_str("Metric keys found:\n");
        for (key, count) in &report.metric_keys {
            let _ = writeln!(out, "  {}: {}", key, count);
        }
        out.push('\n');
    }

    if !report.errors.is_empty() {
        out.push_str("Errors:\n");
        for error in &report.errors {
            let _ = writeln!(out, "  {}", format_error(error, with_inputs));
        }
        out.push('\n');
    }

    if let Some(issues) = &report.completeness {
        if issues.is_empty() {
            out.push_str("Completeness: All expected metrics present for all gateways.\n\n");
        } else {
            out.push_str("Completeness issues:\n");
            for issue in issues {
                let _ = writeln!(out, "  {}", issue);
            }
            out.push('\n');
        }
    }
    out
}

/// Write the report as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(report: &Report, mut writer: W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::line::Validator;

    fn validator() -> Validator {
        Validator::new(ValidatorConfig::without_timestamp_check())
    }

    #[test]
    fn verbose_line_formats() {
        let v = validator();
        let line = MetricLine::new("ok.metric 1\n", 2);
        assert_eq!(
            format_line(line, &v.validate(line)).as_deref(),
            Some("[OK] L2: ok.metric 1")
        );

        let line = MetricLine::new("x 1", 5);
        assert_eq!(
            format_line(line, &v.validate(line)).as_deref(),
            Some("[INVALID] L5: x 1\n         Line 5: Metric key too short (1 < 3): 'x'")
        );

        let line = MetricLine::new("# skip", 1);
        assert!(format_line(line, &v.validate(line)).is_none());
    }

    #[test]
    fn verbose_line_is_truncated() {
        let text = format!("long.metric,k=\"{}\" 1", "\u{e9}".repeat(200));
        let line = MetricLine::new(&text, 1);
        let shown = format_line(line, &validator().validate(line)).unwrap();
        assert_eq!(shown.chars().count(), "[OK] L1: ".len() + VERBOSE_LINE_CHARS);
    }

    #[test]
    fn summary_sections() {
        let v = validator();
        let mut report = Report::new();
        for (i, text) in ["b.metric 1", "a.metric 2", "a.metric 3", "x 1"].iter().enumerate() {
            report.record(&v.validate_line(text, i + 1), Some("in.txt"));
        }
        report.check_completeness();
        let text = format_summary(&report, false);
        let banner = format!(
            "\n{rule}\nMINT Validation Summary\n{rule}\nTotal data lines:  4\nValid:             3\n\
             Invalid:           1\nSkipped (empty/#): 0\n\n",
            rule = RULE
        );
        assert!(text.starts_with(&banner), "{text}");
        assert!(text.contains("Metric keys found:\n  a.metric: 2\n  b.metric: 1\n"));
        assert!(text.contains("Errors:\n  Line 4: Metric key too short (1 < 3): 'x'\n"));
        assert!(text.contains("Completeness: All expected metrics present for all gateways."));

        let text = format_summary(&report, true);
        assert!(text.contains("  in.txt: Line 4: "));
    }

    #[test]
    fn json_report() {
        let v = validator();
        let mut report = Report::new();
        report.record(&v.validate_line("dt.metric 1", 1), None);
        let mut buf = Vec::new();
        write_json(&report, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["invalid"], 1);
        assert_eq!(value["errors"][0]["kind"], "key_reserved_prefix");
        assert_eq!(value["error_counts"]["key_reserved_prefix"], 1);
        assert!(value.get("completeness").is_none());
    }
}
