//! Request extractors that report malformed input through the error envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::{AppError, AppErrorWithRevision};
use crate::AppState;

/// JSON body extractor; rejections become `VALIDATION_ERROR` responses.
pub struct AppJson<T>(pub T);

impl<T> FromRequest<AppState> for AppJson<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppErrorWithRevision;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppErrorWithRevision {
                error: json_error(rejection),
                revision_id: state.store.get_revision_id().await,
            }),
        }
    }
}

/// Query string extractor; rejections become `VALIDATION_ERROR` responses.
pub struct AppQuery<T>(pub T);

impl<T> FromRequestParts<AppState> for AppQuery<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppErrorWithRevision;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppErrorWithRevision {
                error: query_error(rejection),
                revision_id: state.store.get_revision_id().await,
            }),
        }
    }
}

fn json_error(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => {
            format!("Invalid JSON syntax: {}", err.body_text())
        }
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        other => other.body_text(),
    };
    AppError::Validation(message)
}

fn query_error(rejection: QueryRejection) -> AppError {
    AppError::Validation(format!("Invalid query: {}", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http;
    use serde::Deserialize;

    use super::*;
    use crate::store::{ReportStore, WorkflowPolicy};

    #[derive(Debug, Deserialize)]
    struct CountBody {
        #[allow(dead_code)]
        count: u32,
    }

    fn state() -> AppState {
        AppState {
            store: Arc::new(ReportStore::new(
                WorkflowPolicy::Permissive,
                Vec::new(),
                Vec::new(),
            )),
        }
    }

    #[tokio::test]
    async fn test_bad_json_becomes_validation_error() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"count": "many"}"#))
            .unwrap();

        let rejection = AppJson::<CountBody>::from_request(req, &state())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection.error, AppError::Validation(_)));
        assert_eq!(rejection.revision_id, 0);
    }

    #[tokio::test]
    async fn test_missing_content_type_becomes_validation_error() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"count": 1}"#))
            .unwrap();

        let rejection = AppJson::<CountBody>::from_request(req, &state())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection.error, AppError::Validation(_)));
    }
}
