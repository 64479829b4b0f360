//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Flatten form and JSON bodies into [`Params`]

use axum::{
    extract::{FromRequest, Request},
    http::{self, header},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::gateway::Params;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// POST payload, accepted as `application/x-www-form-urlencoded` or
/// `application/json`.
#[derive(Debug, Clone, Default)]
pub struct BodyParams(pub Params);

impl<S> FromRequest<S> for BodyParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(map) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(Params::from_json(map)))
        } else {
            let Form(params) = Form::<Params>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[tokio::test]
    async fn test_form_body() {
        let req = http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("user_id=1&variant_id=5&quantity=2"))
            .unwrap();

        let BodyParams(params) = BodyParams::from_request(req, &()).await.unwrap();
        assert_eq!(params.int("user_id").unwrap(), Some(1));
        assert_eq!(params.int("quantity").unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"user_id": 1, "voucher_code": "SALE10"}"#))
            .unwrap();

        let BodyParams(params) = BodyParams::from_request(req, &()).await.unwrap();
        assert_eq!(params.int("user_id").unwrap(), Some(1));
        assert_eq!(params.get("voucher_code"), Some("SALE10"));
    }

    #[test]
    fn test_request_id_is_uuid() {
        let req = http::Request::builder().body(()).unwrap();
        let id = MakeRequestUuidV4.make_request_id(&req).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(text).is_ok());
    }
}
