//! Builds decision requests from CSV score matrices.
//!
//! The header row names the alternative column first and one column per
//! criterion after it; every following row is one alternative:
//!
//! ```text
//! supplier,price,quality
//! Acme,120,7.5
//! Globex,95,6
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use super::domain::{Alternative, Criterion, DecisionRequest};

#[derive(Debug)]
pub enum MatrixImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn {
        criterion: String,
    },
    InvalidScore {
        row: usize,
        column: String,
        value: String,
    },
}

impl std::fmt::Display for MatrixImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixImportError::Io(err) => write!(f, "failed to read score matrix: {}", err),
            MatrixImportError::Csv(err) => write!(f, "invalid score matrix CSV: {}", err),
            MatrixImportError::MissingColumn { criterion } => {
                write!(f, "score matrix has no column for criterion '{}'", criterion)
            }
            MatrixImportError::InvalidScore { row, column, value } => write!(
                f,
                "row {} column '{}': '{}' is not a number",
                row, column, value
            ),
        }
    }
}

impl std::error::Error for MatrixImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatrixImportError::Io(err) => Some(err),
            MatrixImportError::Csv(err) => Some(err),
            MatrixImportError::MissingColumn { .. } | MatrixImportError::InvalidScore { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for MatrixImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for MatrixImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct DecisionMatrixImport;

impl DecisionMatrixImport {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        criteria: Vec<Criterion>,
    ) -> Result<DecisionRequest, MatrixImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, criteria)
    }

    /// Read alternatives from `reader`, keeping only the columns `criteria` declare.
    ///
    /// Blank cells are left out so engine validation reports them as missing
    /// scores against the right alternative.
    pub fn from_reader<R: Read>(
        reader: R,
        criteria: Vec<Criterion>,
    ) -> Result<DecisionRequest, MatrixImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let columns = criteria
            .iter()
            .map(|criterion| {
                headers
                    .iter()
                    .skip(1)
                    .position(|header| header == criterion.name)
                    .map(|position| (criterion.name.clone(), position + 1))
                    .ok_or_else(|| MatrixImportError::MissingColumn {
                        criterion: criterion.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut alternatives = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = line + 1;
            let name = record.get(0).unwrap_or_default().to_string();

            let mut scores = BTreeMap::new();
            for (criterion, position) in &columns {
                let raw = record.get(*position).unwrap_or_default();
                if raw.is_empty() {
                    continue;
                }
                let score = raw
                    .parse::<f64>()
                    .map_err(|_| MatrixImportError::InvalidScore {
                        row,
                        column: criterion.clone(),
                        value: raw.to_string(),
                    })?;
                scores.insert(criterion.clone(), score);
            }

            alternatives.push(Alternative { name, scores });
        }

        Ok(DecisionRequest {
            alternatives,
            criteria,
        })
    }
}
