//! Loyalty program submission handler.

use axum::extract::multipart::Multipart;
use axum::extract::State;
use axum::Json;
use tracing::{info, warn};

use crate::api::error::{ApiError, ErrorCode};
use crate::api::types::SubmitResponse;
use crate::domain::RawFieldBag;
use crate::infra::{StoredLogo, SubmitError, UploadRejection, LOGO_FIELD, MAX_LOGO_BYTES};
use crate::server::AppState;

/// POST /submit-loyalty-program - Accept a multipart setup submission.
///
/// Text parts are collected into the raw field bag; the logo part is checked
/// against the upload constraints and persisted before the pipeline runs.
/// Rejected uploads never reach the pipeline and leave nothing on disk.
pub async fn submit_loyalty_program(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>, ApiError> {
    info!("received loyalty program submission");

    let (bag, logo) = match collect_parts(&state, multipart).await {
        Ok(parts) => parts,
        Err(CollectError { error, stored }) => {
            // The request was refused mid-collection; drop anything already
            // stored so the aborted submission leaks no temporary file.
            if let Some(logo) = stored {
                if let Err(e) = state.uploads.remove(&logo).await {
                    warn!(error = %e, "failed to clean up upload of aborted request");
                }
            }
            return Err(error);
        }
    };

    let receipt = state.pipeline.process(bag, logo).await?;

    Ok(Json(SubmitResponse {
        success: true,
        message: "Loyalty program setup submitted successfully! Your submission has been \
                  saved and the team will be notified."
            .to_string(),
        submission_id: Some(receipt.submission_id),
        error: None,
    }))
}

struct CollectError {
    error: ApiError,
    stored: Option<StoredLogo>,
}

async fn collect_parts(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(RawFieldBag, Option<StoredLogo>), CollectError> {
    let mut bag = RawFieldBag::new();
    let mut logo: Option<StoredLogo> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(CollectError {
                    error: ApiError::new(
                        ErrorCode::InvalidRequestBody,
                        "Malformed multipart request body.",
                    )
                    .with_detail(e.to_string()),
                    stored: logo,
                });
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == LOGO_FIELD {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let mime_type = field.content_type().unwrap_or_default().to_string();

            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    return Err(CollectError {
                        error: ApiError::new(
                            ErrorCode::InvalidRequestBody,
                            "Failed to read uploaded file.",
                        )
                        .with_detail(e.to_string()),
                        stored: logo,
                    });
                }
            };

            // Browsers submit an empty file part when no logo was chosen.
            if original_name.is_empty() && bytes.is_empty() {
                continue;
            }

            if !mime_type.starts_with("image/") {
                return Err(CollectError {
                    error: SubmitError::UploadRejected(UploadRejection::NotAnImage).into(),
                    stored: logo,
                });
            }
            if bytes.len() as u64 > MAX_LOGO_BYTES {
                return Err(CollectError {
                    error: SubmitError::UploadRejected(UploadRejection::TooLarge).into(),
                    stored: logo,
                });
            }

            match state.uploads.store(&original_name, &mime_type, &bytes).await {
                Ok(stored) => {
                    // At most one logo per submission; a repeated part
                    // replaces the earlier one.
                    if let Some(previous) = logo.replace(stored) {
                        if let Err(e) = state.uploads.remove(&previous).await {
                            warn!(error = %e, "failed to clean up replaced logo upload");
                        }
                    }
                }
                Err(e) => {
                    return Err(CollectError {
                        error: e.into(),
                        stored: logo,
                    });
                }
            }
        } else {
            match field.text().await {
                Ok(value) => bag.insert(name, value),
                Err(e) => {
                    return Err(CollectError {
                        error: ApiError::new(
                            ErrorCode::InvalidRequestBody,
                            "Malformed multipart request body.",
                        )
                        .with_detail(e.to_string()),
                        stored: logo,
                    });
                }
            }
        }
    }

    Ok((bag, logo))
}
