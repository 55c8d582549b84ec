//! Data submission commands
//!
//! `ingest`, `list-submissions` and `validate`.

use super::{exit_code_for, open_context};
use crate::core::use_cases::{
    ingest_data_submission, list_data_submissions_by_provider, validate_data_submission,
};
use clap::Args;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// File to upload
    pub file: String,

    /// Provider submitting the file
    #[arg(short, long)]
    pub provider: String,
}

impl IngestArgs {
    /// Execute the ingest command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        println!("📤 Ingesting {} for {}", self.file, self.provider);

        match ingest_data_submission(&ctx, &self.file, &self.provider).await {
            Ok(Some(submission)) => {
                println!("✅ Submission {} recorded", submission.id);
                println!("   URL: {}", submission.url);
                Ok(0)
            }
            Ok(None) => {
                println!("❌ Submission was not recorded (see log for details)");
                Ok(1)
            }
            Err(e) => Ok(exit_code_for(&e)),
        }
    }
}

/// Arguments for the list-submissions command
#[derive(Args, Debug)]
pub struct ListSubmissionsArgs {
    /// Provider whose submissions to list
    #[arg(short, long)]
    pub provider: String,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListSubmissionsArgs {
    /// Execute the list-submissions command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        let submissions = match list_data_submissions_by_provider(&ctx, &self.provider).await {
            Ok(Some(s)) => s,
            Ok(None) => {
                println!("❌ Provider not found: {}", self.provider);
                return Ok(1);
            }
            Err(e) => return Ok(exit_code_for(&e)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&submissions)?);
            return Ok(0);
        }

        println!("📋 Data submissions for {}", self.provider);
        println!();
        if submissions.is_empty() {
            println!("  (none)");
        }
        for submission in &submissions {
            let validated = if submission.report.is_some() { "✅" } else { "  " };
            println!(
                "  {:>4} {} {}  {}",
                submission.id, validated, submission.file_name, submission.url
            );
        }
        println!();
        Ok(0)
    }
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateSubmissionArgs {
    /// File name the submission was ingested under
    pub file_name: String,

    /// Column map (owned by the submission's provider) to validate with
    #[arg(short = 'm', long)]
    pub column_map: String,
}

impl ValidateSubmissionArgs {
    /// Execute the validate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        println!(
            "🔍 Validating {} with column map {}",
            self.file_name, self.column_map
        );
        println!();

        let report = match validate_data_submission(&ctx, &self.file_name, &self.column_map).await
        {
            Ok(Some(report)) => report,
            Ok(None) => {
                println!("❌ Submission was not validated (see log for details)");
                return Ok(1);
            }
            Err(e) => return Ok(exit_code_for(&e)),
        };

        let overview = &report.overview;
        println!("Validation Summary:");
        println!("  Features: {}", overview.feature_count);
        println!("  Records: {}", overview.records_count);
        println!("  Flagged records: {}", overview.records_flagged);
        if !overview.missing_required_fields.is_empty() {
            println!(
                "  Missing fields: {}",
                overview.missing_required_fields.join(", ")
            );
        }
        println!();
        for feature in &report.features {
            println!(
                "  {:<12} <- {:<24} populated {:>8}  empty {:>8}",
                feature.canonical_field,
                feature.provided_feature_name,
                feature.populated_count,
                feature.null_count
            );
        }
        println!();

        if report.is_clean() {
            println!("✅ Submission is complete");
        } else {
            println!("⚠️  Submission has gaps");
        }
        Ok(0)
    }
}
