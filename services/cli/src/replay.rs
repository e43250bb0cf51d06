use clap::Args;
use grade_calc::config::GradingSettings;
use grade_calc::error::AppError;
use grade_calc::grading::{GradeSession, SessionEvent};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct SessionArgs {
    /// JSON-lines file of session events (reads stdin when omitted)
    #[arg(long)]
    pub(crate) events: Option<PathBuf>,
}

pub(crate) fn run_session(args: SessionArgs, settings: &GradingSettings) -> Result<(), AppError> {
    let reader: Box<dyn BufRead> = match &args.events {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut session = GradeSession::new(settings.grading_config(), settings.max_assessments);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = replay_events(reader, &mut session, &mut out)?;
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        "session replay finished"
    );
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ReplaySummary {
    pub(crate) applied: usize,
    pub(crate) rejected: usize,
}

/// Apply each event line, writing one JSON document per line: the new view, or an error object
/// for lines that do not decode or are refused.
pub(crate) fn replay_events<R: BufRead, W: Write>(
    reader: R,
    session: &mut GradeSession,
    out: &mut W,
) -> Result<ReplaySummary, AppError> {
    let mut summary = ReplaySummary::default();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = serde_json::from_str::<SessionEvent>(&line)
            .map_err(|err| err.to_string())
            .and_then(|event| session.apply(event).map_err(|err| err.to_string()));

        match result {
            Ok(view) => {
                summary.applied += 1;
                writeln!(out, "{}", serde_json::to_string(&view)?)?;
            }
            Err(error) => {
                summary.rejected += 1;
                writeln!(out, "{}", json!({ "line": number + 1, "error": error }))?;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_one_document_per_event() {
        let script = "{\"type\":\"edit_weight\",\"id\":1,\"value\":\"100\"}\n\n\
                      {\"type\":\"add_assessment\"}\n\
                      not json\n";
        let mut session = GradeSession::default();
        let mut out = Vec::new();

        let summary =
            replay_events(Cursor::new(script), &mut session, &mut out).expect("replay runs");

        assert_eq!(
            summary,
            ReplaySummary {
                applied: 1,
                rejected: 2,
            }
        );
        let text = String::from_utf8(out).expect("utf8 output");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("100% weight reached"));
        assert!(lines[2].contains("\"line\":4"));
    }
}
