use crate::render::{render_prediction, render_view};
use clap::Args;
use grade_calc::config::GradingSettings;
use grade_calc::error::AppError;
use grade_calc::grading::{predict, read_assessments, GradeSession, PredictionView};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// CSV file with score,max_score,weight columns (blank score = not completed)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Target percentage to predict required scores for
    #[arg(long)]
    pub(crate) target: Option<i32>,
    /// Emit the report as JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs, settings: &GradingSettings) -> Result<(), AppError> {
    let ReportArgs { csv, target, json } = args;

    let file = File::open(&csv)?;
    let inputs = read_assessments(BufReader::new(file), settings.max_assessments)?;
    info!(path = %csv.display(), assessments = inputs.len(), "imported assessments");

    let config = settings.grading_config();
    let session =
        GradeSession::with_assessments(config, settings.max_assessments, inputs.clone())?;
    let mut view = session.view();

    // Arbitrary targets are allowed here, not just the picker values.
    view.prediction = target.map(|target| {
        let outcome = predict(&inputs, f64::from(target), &config);
        PredictionView {
            messages: outcome.messages(config.rounding),
            warning: outcome.is_warning(),
            outcome,
        }
    });
    view.celebrate = view
        .prediction
        .as_ref()
        .map(|prediction| prediction.outcome.celebrate())
        .unwrap_or(false);
    if let Some(target) = target {
        view.selected_target = target;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    render_view(&view);
    if let Some(prediction) = &view.prediction {
        render_prediction(prediction);
    }

    Ok(())
}
