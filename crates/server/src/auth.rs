use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use service::expense::{domain::CallerId, ExpenseService};
use uuid::Uuid;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub expenses: Arc<ExpenseService>,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn new(expenses: ExpenseService, auth: ServerAuthConfig) -> Self {
        Self { expenses: Arc::new(expenses), auth }
    }
}

/// Claims accepted from the token issuer. The caller id is `uid`, or `sub` when `uid` is absent.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
}

impl Claims {
    fn caller(&self) -> Option<CallerId> {
        let raw = self.uid.as_deref().or(self.sub.as_deref())?;
        Uuid::parse_str(raw).ok().map(CallerId)
    }
}

/// Read `Authorization: Bearer <token>`, falling back to the `auth_token` cookie.
///
/// A header without the Bearer scheme is rejected outright (401); no token at all is 400.
fn extract_token(headers: &HeaderMap) -> Result<String, JsonApiError> {
    if let Some(authz) = headers.get(header::AUTHORIZATION) {
        let value = authz.to_str().unwrap_or_default();
        let Some(token) = value.strip_prefix("Bearer ") else {
            tracing::warn!("invalid Authorization format (expect Bearer)");
            return Err(JsonApiError::unauthorized("Not authorized, invalid token"));
        };
        let token = token.trim();
        if token.is_empty() {
            return Err(JsonApiError::bad_request("Not authorized, no token"));
        }
        return Ok(token.to_string());
    }

    // Cookie 回退：Authorization 缺失时读取 auth_token
    let jar = CookieJar::from_headers(headers);
    match jar.get(AUTH_COOKIE).map(|c| c.value().trim()) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => {
            tracing::warn!("missing Authorization header and auth_token cookie");
            Err(JsonApiError::bad_request("Not authorized, no token"))
        }
    }
}

/// Verify an HS256 token (signature and `exp`) and resolve the caller id.
pub fn verify_token(token: &str, secret: &str) -> Result<CallerId, JsonApiError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::warn!(err = %e, "token validation failed");
        JsonApiError::unauthorized("Not authorized, invalid token")
    })?;

    data.claims.caller().ok_or_else(|| {
        tracing::warn!("token subject is not a user id");
        JsonApiError::unauthorized("Not authorized, invalid token")
    })
}

/// 中间件：校验 Bearer token，并将 CallerId 注入请求扩展
/// 缺失 token 返回 400，非法或过期返回 401
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let token = extract_token(req.headers())?;
    let caller = verify_token(&token, &state.auth.jwt_secret)?;
    tracing::debug!(%caller, path = %req.uri().path(), "caller authenticated");
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "unit-secret";

    fn now() -> usize {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
    }

    fn mint(claims: &Claims, secret: &str) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn claims(uid: Option<String>, sub: Option<String>, exp: usize) -> Claims {
        Claims { uid, sub, exp, iat: Some(now()) }
    }

    #[test]
    fn uid_claim_wins_over_sub() {
        let uid = Uuid::new_v4();
        let token = mint(&claims(Some(uid.to_string()), Some(Uuid::new_v4().to_string()), now() + 600), SECRET);
        assert_eq!(verify_token(&token, SECRET).unwrap(), CallerId(uid));
    }

    #[test]
    fn sub_claim_is_fallback() {
        let sub = Uuid::new_v4();
        let token = mint(&claims(None, Some(sub.to_string()), now() + 600), SECRET);
        assert_eq!(verify_token(&token, SECRET).unwrap(), CallerId(sub));
    }

    #[test]
    fn rejects_wrong_secret_expired_and_non_uuid_subject() {
        let id = Some(Uuid::new_v4().to_string());
        let wrong_secret = mint(&claims(id.clone(), None, now() + 600), "other");
        let expired = mint(&claims(id, None, now() - 3600), SECRET);
        let not_uuid = mint(&claims(Some("alice".into()), None, now() + 600), SECRET);
        for token in [wrong_secret, expired, not_uuid, "garbage".to_string()] {
            let err = verify_token(&token, SECRET).unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn token_from_header_or_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers).unwrap_err().status, StatusCode::BAD_REQUEST);

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; auth_token=from-cookie"));
        assert_eq!(extract_token(&headers).unwrap(), "from-cookie");

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_token(&headers).unwrap(), "from-header");

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_token(&headers).unwrap_err().status, StatusCode::UNAUTHORIZED);
    }
}
