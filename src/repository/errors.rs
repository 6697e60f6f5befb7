use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("No access token; sign in first")]
    AuthMissing,

    #[error("Remote error {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Remote { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::Remote { status, .. } => Some(*status),
            RepositoryError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message the server attached to a failed response, if any.
    #[must_use]
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            RepositoryError::Remote { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RepositoryError::AuthMissing) || self.status() == Some(401)
    }

    /// True when the request never produced an HTTP response.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        match self {
            RepositoryError::Network(err) => err.status().is_none(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_expose_status_and_detail() {
        let err = RepositoryError::Remote {
            status: 404,
            detail: Some("Không tìm thấy bài viết".to_string()),
        };
        assert!(err.is_not_found());
        assert_eq!(err.server_detail(), Some("Không tìm thấy bài viết"));
        assert!(!err.is_connectivity());
    }

    #[test]
    fn auth_missing_counts_as_unauthorized() {
        assert!(RepositoryError::AuthMissing.is_unauthorized());
        assert_eq!(RepositoryError::AuthMissing.status(), None);
    }
}
