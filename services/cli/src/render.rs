use grade_calc::grading::{PredictionView, SessionView};

pub(crate) fn render_view(view: &SessionView) {
    println!(
        "{:<14} {:>8} {:>6} {:>7} {:>9}",
        "Assessment", "Score", "Max", "Weight", "Weighted"
    );
    for row in &view.assessments {
        println!(
            "{:<14} {:>8} {:>6} {:>7} {:>9}",
            row.label,
            display_or_dash(&row.score),
            display_or_dash(&row.max_score),
            display_or_dash(&row.weight),
            row.weighted
        );
        for error in &row.errors {
            println!("  ! {error}");
        }
    }

    let balance = if view.totals.weight_balanced {
        ""
    } else {
        "  (weights do not add up to 100%)"
    };
    println!("\nTotal weight:   {}{}", view.totals.weight_display, balance);
    println!("Weighted score: {}", view.totals.weighted_score_display);
    println!("Predicted grade: {}", view.totals.grade);

    if let Some(reason) = &view.controls.add_blocked_reason {
        println!("Adding assessments disabled: {reason}");
    }
    if !view.controls.can_calculate {
        println!("Target calculation disabled until weights total 100% with no invalid fields");
    }
}

pub(crate) fn render_prediction(prediction: &PredictionView) {
    let marker = if prediction.warning { "[!]" } else { "[+]" };
    println!("\nTarget prediction {marker}");
    for line in &prediction.messages {
        println!("  {line}");
    }
    if prediction.outcome.celebrate() {
        println!("  Congratulations!");
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
