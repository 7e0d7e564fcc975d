//! Tabular export of a ranked calculation.

use crate::saw::format::format_decimal;
use crate::saw::{CriterionId, SawResult};
use std::collections::HashSet;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write ranking csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush ranking output: {0}")]
    Io(#[from] std::io::Error),
    #[error("ranking output was not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Write one CSV row per ranked alternative, criteria columns in the order
/// the criteria were supplied.
pub fn write_ranking_csv<W: Write>(result: &SawResult, writer: W) -> Result<(), ReportError> {
    let columns = criterion_columns(result);
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![
        "ranking".to_string(),
        "id".to_string(),
        "nama".to_string(),
        "lokasi".to_string(),
    ];
    header.extend(columns.iter().map(|(_, name)| name.clone()));
    header.push("final_score".to_string());
    csv.write_record(&header)?;

    for alternative in &result.normalized_alternatives {
        let mut row = vec![
            alternative.ranking.to_string(),
            alternative.id.to_string(),
            alternative.name.clone(),
            alternative.location.clone(),
        ];
        row.extend(
            columns
                .iter()
                .map(|(id, _)| format_decimal(alternative.normalized(*id), 4)),
        );
        row.push(format_decimal(alternative.final_score, 4));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn ranking_csv_string(result: &SawResult) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    write_ranking_csv(result, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn criterion_columns(result: &SawResult) -> Vec<(CriterionId, String)> {
    let mut seen = HashSet::new();
    result
        .criterias
        .iter()
        .filter(|criterion| seen.insert(criterion.id))
        .map(|criterion| (criterion.id, criterion.name.clone()))
        .collect()
}
