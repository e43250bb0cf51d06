use grade_calc::config::{parse_assessment_limit, ASSESSMENT_LIMIT_CEILING};
use grade_calc::grading::{BoundaryTable, RoundingMode};

pub(crate) fn parse_rounding(raw: &str) -> Result<RoundingMode, String> {
    raw.parse::<RoundingMode>().map_err(|err| err.to_string())
}

pub(crate) fn parse_boundaries(raw: &str) -> Result<BoundaryTable, String> {
    raw.parse::<BoundaryTable>()
        .map_err(|err| format!("failed to parse '{raw}' as grade boundaries ({err})"))
}

pub(crate) fn parse_max_assessments(raw: &str) -> Result<usize, String> {
    parse_assessment_limit(raw).map_err(|_| {
        format!("'{raw}' is not an assessment limit between 1 and {ASSESSMENT_LIMIT_CEILING}")
    })
}
