use crate::infra::parse_criterion;
use clap::Args;
use edas::decisions::{Assessment, Criterion, DecisionMatrixImport, DecisionRequest, EdasEngine};
use edas::error::AppError;
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// JSON decision request ({"alternatives": [...], "criteria": [...]})
    #[arg(long, conflicts_with = "matrix", required_unless_present = "matrix")]
    pub(crate) input: Option<PathBuf>,
    /// CSV decision matrix; first column names the alternative
    #[arg(long, requires = "criteria")]
    pub(crate) matrix: Option<PathBuf>,
    /// Criterion for the CSV matrix as name:weight:type (repeatable)
    #[arg(
        long = "criterion",
        id = "criteria",
        value_parser = parse_criterion,
        conflicts_with = "input"
    )]
    pub(crate) criteria: Vec<Criterion>,
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
    /// Include averages, distances and warnings in the output
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let request = load_request(&args)?;
    let assessment = EdasEngine::new().assess(&request)?;

    if args.json {
        let rendered = if args.explain {
            serde_json::to_string_pretty(&assessment)?
        } else {
            serde_json::to_string_pretty(&assessment.into_response())?
        };
        println!("{rendered}");
    } else {
        print!(
            "{}",
            RankingTable {
                assessment: &assessment,
                explain: args.explain,
            }
        );
    }
    Ok(())
}

fn load_request(args: &RankArgs) -> Result<DecisionRequest, AppError> {
    if let Some(path) = &args.input {
        let raw = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&raw)?);
    }

    match &args.matrix {
        Some(path) => Ok(DecisionMatrixImport::from_path(path, args.criteria.clone())?),
        None => Ok(DecisionRequest::default()),
    }
}

/// Plain-text ranking table, optionally followed by the audit trail.
pub(crate) struct RankingTable<'a> {
    pub(crate) assessment: &'a Assessment,
    pub(crate) explain: bool,
}

impl fmt::Display for RankingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assessment = self.assessment;
        let width = assessment
            .ranking
            .iter()
            .map(|entry| entry.name.len())
            .max()
            .unwrap_or(0)
            .max("Alternative".len());

        writeln!(f, "Rank  {:<width$}  Score", "Alternative")?;
        for entry in &assessment.ranking {
            writeln!(
                f,
                "{:>4}  {:<width$}  {:.6}",
                entry.rank, entry.name, entry.score
            )?;
        }

        if self.explain {
            writeln!(f, "\nCriterion averages:")?;
            for average in &assessment.averages {
                writeln!(f, "  {}: {:.6}", average.criterion, average.average)?;
            }

            writeln!(f, "\nDistances (PDA / NDA / NSP / NSN):")?;
            for row in &assessment.breakdown {
                writeln!(
                    f,
                    "  {}: {:.6} / {:.6} / {:.6} / {:.6}",
                    row.name,
                    row.positive_distance,
                    row.negative_distance,
                    row.normalized_positive_distance,
                    row.normalized_negative_distance
                )?;
            }
        }

        if !assessment.warnings.is_empty() {
            writeln!(f, "\nWarnings:")?;
            for warning in &assessment.warnings {
                writeln!(f, "  - {warning}")?;
            }
        }

        Ok(())
    }
}
