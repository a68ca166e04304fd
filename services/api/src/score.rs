use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{
    ReceiptSubmission, ReceiptValidator, ScoreBreakdown, ScoreEngine,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) receipt: PathBuf,
    /// Print the breakdown as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let breakdown = score_file(&args.receipt)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        render_breakdown(&args.receipt, &breakdown);
    }

    Ok(())
}

pub(crate) fn score_file(path: &Path) -> Result<ScoreBreakdown, AppError> {
    let raw = fs::read_to_string(path)?;
    let submission: ReceiptSubmission = serde_json::from_str(&raw)?;
    let receipt = ReceiptValidator::new().validate(&submission)?;
    Ok(ScoreEngine::new().score(&receipt))
}

fn render_breakdown(path: &Path, breakdown: &ScoreBreakdown) {
    println!("Receipt {}", path.display());
    if breakdown.components.is_empty() {
        println!("No rules matched");
    }
    for component in &breakdown.components {
        println!(
            "- {:>4} {}: {}",
            component.points,
            component.rule.label(),
            component.notes
        );
    }
    println!("Total points: {}", breakdown.total_points);
}
