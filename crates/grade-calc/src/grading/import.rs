use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::domain::{AssessmentInput, DEFAULT_MAX_SCORE};

#[derive(Debug, thiserror::Error)]
pub enum AssessmentImportError {
    #[error("failed to read assessments CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV holds {found} assessments but at most {limit} are allowed")]
    TooManyAssessments { limit: usize, found: usize },
}

/// Read assessment rows from CSV with `score,max_score,weight` headers. Blank cells stay blank so
/// pending assessments survive the import; a blank max score falls back to 100.
pub fn read_assessments<R: Read>(
    reader: R,
    limit: usize,
) -> Result<Vec<AssessmentInput>, AssessmentImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut inputs = Vec::new();

    for record in csv_reader.deserialize::<AssessmentRow>() {
        inputs.push(record?.into_input());
    }

    if inputs.len() > limit {
        return Err(AssessmentImportError::TooManyAssessments {
            limit,
            found: inputs.len(),
        });
    }

    Ok(inputs)
}

#[derive(Debug, Deserialize)]
struct AssessmentRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weight: Option<String>,
}

impl AssessmentRow {
    fn into_input(self) -> AssessmentInput {
        AssessmentInput {
            score: self.score.unwrap_or_default(),
            max_score: self
                .max_score
                .unwrap_or_else(|| DEFAULT_MAX_SCORE.to_string()),
            weight: self.weight.unwrap_or_default(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
