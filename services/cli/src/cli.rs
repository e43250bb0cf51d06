use crate::demo::{run_demo, DemoArgs};
use crate::infra::{parse_boundaries, parse_max_assessments, parse_rounding};
use crate::replay::{run_session, SessionArgs};
use crate::report::{run_report, ReportArgs};
use clap::{Args, Parser, Subcommand};
use grade_calc::config::{AppConfig, GradingSettings};
use grade_calc::error::AppError;
use grade_calc::grading::{BoundaryTable, RoundingMode};
use grade_calc::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "grade-calc",
    about = "Weighted grade calculator with boundary grading and target prediction",
    version
)]
struct Cli {
    #[command(flatten)]
    overrides: GradingOverrides,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grade a CSV of assessments and optionally predict what a target needs
    Report(ReportArgs),
    /// Replay JSON-lines session events, printing the recomputed view after each
    Session(SessionArgs),
    /// Walk through a scripted session covering the common outcomes
    Demo(DemoArgs),
}

/// Per-invocation overrides for the environment-provided grading settings.
#[derive(Args, Debug, Default)]
pub(crate) struct GradingOverrides {
    /// Rounding mode for displayed values (up, down or normal)
    #[arg(long, global = true, value_parser = parse_rounding)]
    pub(crate) rounding: Option<RoundingMode>,
    /// Grade thresholds as first,upper_second,lower_second,third,marginal_fail
    #[arg(long, global = true, value_parser = parse_boundaries)]
    pub(crate) boundaries: Option<BoundaryTable>,
    /// Maximum number of assessments in a session
    #[arg(long, global = true, value_parser = parse_max_assessments)]
    pub(crate) max_assessments: Option<usize>,
}

impl GradingOverrides {
    fn apply(self, settings: &mut GradingSettings) {
        if let Some(rounding) = self.rounding {
            settings.rounding = rounding;
        }
        if let Some(boundaries) = self.boundaries {
            settings.boundaries = boundaries;
        }
        if let Some(limit) = self.max_assessments {
            settings.max_assessments = limit;
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    cli.overrides.apply(&mut config.grading);

    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, rounding = %config.grading.rounding, "grade calculator starting");

    match cli.command {
        Command::Report(args) => run_report(args, &config.grading),
        Command::Session(args) => run_session(args, &config.grading),
        Command::Demo(args) => run_demo(args, &config.grading),
    }
}
