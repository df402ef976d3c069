//! Verified-user seam
//!
//! Session management lives in an external service; this middleware only
//! decodes the HS256 token it issued and injects the verified user id.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::state::AppState;
use super::types::{ApiResponse, error_codes};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user_id as string)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at
}

/// Verified identity injected into request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

type AuthRejection = (StatusCode, Json<ApiResponse<()>>);

fn reject(status: StatusCode, code: i32, msg: &str) -> AuthRejection {
    (status, Json(ApiResponse::<()>::error(code, msg)))
}

pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            reject(
                StatusCode::UNAUTHORIZED,
                error_codes::MISSING_AUTH,
                "Missing Authorization header",
            )
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        reject(
            StatusCode::UNAUTHORIZED,
            error_codes::AUTH_FAILED,
            "Invalid token format",
        )
    })?;

    let decoding_key = DecodingKey::from_secret(state.jwt_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    let claims = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|_| {
            reject(
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                "Invalid or expired token",
            )
        })?
        .claims;

    let user_id: i64 = claims.sub.parse().map_err(|_| {
        reject(
            StatusCode::UNAUTHORIZED,
            error_codes::AUTH_FAILED,
            "Malformed subject claim",
        )
    })?;

    request.extensions_mut().insert(AuthenticatedUser { user_id });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    #[test]
    fn test_claims_round_trip() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "1001".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, "1001");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "1001".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret-a"),
        )
        .unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret-b"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }
}
