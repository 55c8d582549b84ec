//! Data submission ingestion and validation
//!
//! Unknown providers, submissions and column maps are soft failures: they are
//! logged and the use case returns `Ok(None)`.

use crate::core::context::ApplicationContext;
use crate::core::tasks::ValidationRequest;
use crate::core::view_models::DataSubmissionViewModel;
use crate::domain::{storage_key, DataSubmission, DataSubmissionReport, NadError, Result};
use crate::log_soft_failure;

/// Upload a local file for a provider and record the submission
///
/// `file_name` is the path of the file to upload. The object is stored under
/// `"{provider}_{file_name}"`; the recorded URL is the one storage reports for
/// `file_name` itself.
///
/// Nothing is uploaded if `file_name` is empty or the provider is unknown.
/// Nothing is recorded if the upload reports failure. An upload is not undone
/// if recording the submission fails.
///
/// # Errors
///
/// Returns an error if storage or the repository fails.
pub async fn ingest_data_submission(
    ctx: &ApplicationContext,
    file_name: &str,
    provider_name: &str,
) -> Result<Option<DataSubmissionViewModel>> {
    if file_name.is_empty() {
        log_soft_failure!("ingest_data_submission", "File name required");
        return Ok(None);
    }

    let Some(provider) = ctx.providers().get_by_name(provider_name).await? else {
        log_soft_failure!(
            "ingest_data_submission",
            "Provider with that name does not exist"
        );
        return Ok(None);
    };

    let key = storage_key(&provider.name, file_name);
    if !ctx.storage().upload(file_name, &key).await? {
        log_soft_failure!(
            "ingest_data_submission",
            format!("Failed to upload {file_name}")
        );
        return Ok(None);
    }
    let url = ctx.storage().get_file_url(file_name).await?;

    let submission = ctx
        .submissions()
        .add(DataSubmission::new(file_name, url, provider))
        .await?;
    tracing::info!(
        file_name = %submission.file_name,
        provider = %submission.producer.name,
        "Submission added"
    );

    Ok(Some(DataSubmissionViewModel::from(&submission)))
}

/// Submissions recorded for a provider, oldest first
///
/// Returns `Ok(None)` and logs an error if the provider is unknown.
///
/// # Errors
///
/// Returns an error only if a repository fails.
pub async fn list_data_submissions_by_provider(
    ctx: &ApplicationContext,
    provider_name: &str,
) -> Result<Option<Vec<DataSubmissionViewModel>>> {
    let Some(provider) = ctx.providers().get_by_name(provider_name).await? else {
        log_soft_failure!(
            "list_data_submissions_by_provider",
            "Provider with that name does not exist"
        );
        return Ok(None);
    };

    let submissions = ctx.submissions().get_by_producer(&provider).await?;
    tracing::info!("Data submissions for {}", provider.name);
    for submission in &submissions {
        tracing::info!("{}: {}", submission.producer.name, submission.file_name);
    }

    Ok(Some(
        submissions.iter().map(DataSubmissionViewModel::from).collect(),
    ))
}

/// Validate a stored submission against one of its provider's column maps
///
/// The stored object is downloaded to a temporary directory, handed to the
/// validation task and the resulting report is attached to the submission. The
/// temporary directory is removed whether or not validation succeeds.
///
/// Returns `Ok(None)` and logs an error if the submission, the column map or the
/// stored object cannot be found.
///
/// # Errors
///
/// Returns [`NadError::Task`] if the task produces no report, or an error if
/// storage or a repository fails.
pub async fn validate_data_submission(
    ctx: &ApplicationContext,
    file_name: &str,
    column_map_name: &str,
) -> Result<Option<DataSubmissionReport>> {
    let Some(submission) = ctx.submissions().get_by_file_name(file_name).await? else {
        log_soft_failure!(
            "validate_data_submission",
            "Data submission with that filename does not exist"
        );
        return Ok(None);
    };
    let Some(submission_id) = submission.id else {
        return Err(NadError::NotFound(format!(
            "Data submission {file_name} has no id"
        )));
    };

    let Some(column_map) = ctx
        .column_maps()
        .get_by_name_and_producer(column_map_name, &submission.producer)
        .await?
    else {
        log_soft_failure!(
            "validate_data_submission",
            format!(
                "Column map {column_map_name} does not exist for {}",
                submission.producer.name
            )
        );
        return Ok(None);
    };

    let Some(download) = ctx.storage().download_temp(&submission.storage_key()).await? else {
        log_soft_failure!(
            "validate_data_submission",
            format!("Stored file for {file_name} could not be downloaded")
        );
        return Ok(None);
    };

    let handle = ctx.validation_task().delay(ValidationRequest {
        submission_id,
        path: download.extracted_dir.clone(),
        mapping: column_map.mapping().clone(),
    });
    let outcome = handle.get(Some(ctx.task_timeout()), true).await;

    if let Err(e) = ctx.storage().cleanup_temp_dir(&download.temp_dir).await {
        tracing::warn!(
            temp_dir = %download.temp_dir.display(),
            error = %e,
            "Failed to remove temporary directory"
        );
    }

    let report = outcome?.ok_or_else(|| {
        NadError::Task(format!("Validation of {file_name} produced no report"))
    })?;
    ctx.submissions()
        .update_report(submission_id, &report)
        .await?;

    tracing::info!(
        file_name = %file_name,
        "Total number of features: {}",
        report.overview.feature_count
    );
    Ok(Some(report))
}
