use thiserror::Error;

/// Failures of a single GitHub API call.
///
/// Not-found is split out because callers recover from it differently
/// depending on the operation (skip a missing package, treat a missing
/// version as already deleted).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} does not exist")]
    NotFound(String),

    #[error("github returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to talk to github: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Whether an error is GitHub refusing to delete the sole remaining
/// version of a package through the per-version endpoint.
///
/// GitHub signals this condition only through the wording of the error
/// message, not a dedicated status or error code, so this check has to
/// match on the message text. Keep any update to the wording here.
pub fn is_last_version_refusal(error: &ApiError) -> bool {
    match error {
        ApiError::Status { message, .. } => {
            message.to_lowercase().contains("last version")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_version_refusal_matches_github_wording() {
        let error = ApiError::Status {
            status: 400,
            message: "You cannot delete the last version of a package. \
                      You must delete the package instead."
                .to_string(),
        };
        assert!(is_last_version_refusal(&error));
    }

    #[test]
    fn test_other_status_errors_are_not_refusals() {
        let error = ApiError::Status {
            status: 403,
            message: "Must have admin rights to Repository.".to_string(),
        };
        assert!(!is_last_version_refusal(&error));
    }

    #[test]
    fn test_not_found_is_not_a_refusal() {
        let error = ApiError::NotFound("package foo".to_string());
        assert!(!is_last_version_refusal(&error));
    }
}
