//! Gateway identity
//!
//! The API runs behind an authenticating gateway that forwards the
//! session's user and organization as headers. This layer turns them into
//! the [`Identity`] the RBAC middleware reads. Requests without the headers
//! pass through untouched and are rejected later by `resolve_principal`.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use kernel::error::app_error::AppError;
use kernel::id::{OrganizationId, UserId};
use rbac::middleware::Identity;
use std::str::FromStr;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ORGANIZATION_ID_HEADER: &str = "x-organization-id";

/// Insert an [`Identity`] built from the gateway headers
pub async fn forward_identity(mut req: Request, next: Next) -> Result<Response, AppError> {
    if let Some(identity) = identity_from_headers(req.headers())? {
        req.extensions_mut().insert(identity);
    }

    Ok(next.run(req).await)
}

fn identity_from_headers(headers: &HeaderMap) -> Result<Option<Identity>, AppError> {
    let (Some(user_id), Some(organization_id)) = (
        header_id::<UserId>(headers, USER_ID_HEADER)?,
        header_id::<OrganizationId>(headers, ORGANIZATION_ID_HEADER)?,
    ) else {
        return Ok(None);
    };

    Ok(Some(Identity {
        user_id,
        organization_id,
    }))
}

fn header_id<T: FromStr>(headers: &HeaderMap, name: &'static str) -> Result<Option<T>, AppError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .map(Some)
        .ok_or_else(|| AppError::bad_request(format!("Malformed {name} header")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_identity_from_headers() {
        let user_id = UserId::new();
        let organization_id = OrganizationId::new();

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_ID_HEADER,
            HeaderValue::from_str(&user_id.to_string()).unwrap(),
        );
        headers.insert(
            ORGANIZATION_ID_HEADER,
            HeaderValue::from_str(&organization_id.to_string()).unwrap(),
        );

        let identity = identity_from_headers(&headers).unwrap().unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.organization_id, organization_id);
    }

    #[test]
    fn test_missing_headers_yield_no_identity() {
        let mut headers = HeaderMap::new();
        assert!(identity_from_headers(&headers).unwrap().is_none());

        headers.insert(
            USER_ID_HEADER,
            HeaderValue::from_str(&UserId::new().to_string()).unwrap(),
        );
        assert!(identity_from_headers(&headers).unwrap().is_none());
    }

    #[test]
    fn test_malformed_header_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        headers.insert(
            ORGANIZATION_ID_HEADER,
            HeaderValue::from_str(&OrganizationId::new().to_string()).unwrap(),
        );

        let err = identity_from_headers(&headers).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
