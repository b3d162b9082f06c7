//! API request handlers.

mod form;
mod health;
mod preview;
mod process;

pub use health::*;
pub use preview::*;
pub use process::*;

use crate::server::error::ApiError;

/// Run parsing, cleaning and encoding on the blocking pool so large uploads
/// do not stall the async workers.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_blocking_returns_result() {
        let rows = blocking(|| 2 + 3).await.unwrap();
        assert_eq!(rows, 5);
    }

    #[tokio::test]
    async fn test_blocking_panic_is_internal_error() {
        let err = blocking(|| -> usize { panic!("encoder blew up") })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Internal(ref msg) if msg.starts_with("Task join error")));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
