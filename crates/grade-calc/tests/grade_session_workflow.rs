//! End-to-end session scenarios driven through the public reducer, including the JSON event
//! encoding used by the command-line replay.

use grade_calc::grading::{
    GradeSession, PredictionOutcome, ScenarioOption, SessionError, SessionEvent,
};

fn replay(session: &mut GradeSession, script: &str) -> Vec<Result<serde_json::Value, SessionError>> {
    script
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let event: SessionEvent = serde_json::from_str(line).expect("event decodes");
            session
                .apply(event)
                .map(|view| serde_json::to_value(view).expect("view encodes"))
        })
        .collect()
}

#[test]
fn json_event_script_reaches_a_scenario_list() {
    let mut session = GradeSession::default();
    let script = r#"
{"type":"edit_score","id":1,"value":"60"}
{"type":"edit_weight","id":1,"value":"40"}
{"type":"add_assessment","max_score":"50","weight":"30"}
{"type":"add_assessment","weight":"30"}
{"type":"select_target","value":60}
{"type":"calculate_target"}
"#;

    let views = replay(&mut session, script);

    assert!(views.iter().all(Result::is_ok));
    let last = views.last().expect("views produced").as_ref().expect("ok");
    assert_eq!(last["totals"]["weight_display"], "100%");
    assert_eq!(last["prediction"]["outcome"]["outcome"], "scenarios");
    assert_eq!(
        last["prediction"]["outcome"]["options"]
            .as_array()
            .expect("options array")
            .len(),
        3
    );
    assert_eq!(last["celebrate"], false);
}

#[test]
fn rejected_events_do_not_stop_the_replay() {
    let mut session = GradeSession::default();
    let script = r#"
{"type":"edit_weight","id":1,"value":"100"}
{"type":"add_assessment"}
{"type":"edit_weight","id":1,"value":"50"}
{"type":"add_assessment","weight":"50"}
"#;

    let views = replay(&mut session, script);

    assert!(views[0].is_ok());
    assert!(matches!(views[1], Err(SessionError::AddRejected(_))));
    assert!(views[3].is_ok());
    assert_eq!(session.assessment_ids().len(), 2);
}

#[test]
fn two_assessment_course_needs_sixty_on_the_final() {
    let mut session = GradeSession::default();
    let first = session.assessment_ids()[0];
    for event in [
        SessionEvent::EditScore {
            id: first,
            value: "80".to_string(),
        },
        SessionEvent::EditWeight {
            id: first,
            value: "50".to_string(),
        },
        SessionEvent::add("", "100", "50"),
        SessionEvent::CalculateTarget,
    ] {
        session.apply(event).expect("event applies");
    }

    let view = session.view();
    let prediction = view.prediction.expect("prediction present");
    match prediction.outcome {
        PredictionOutcome::Scenarios(plan) => match plan.options.as_slice() {
            [ScenarioOption::Single {
                required,
                achievable: true,
            }] => {
                assert_eq!(required.score, 60);
                assert_eq!(required.max_score, 100);
            }
            other => panic!("expected one achievable option, got {other:?}"),
        },
        other => panic!("expected scenarios, got {other:?}"),
    }
}
