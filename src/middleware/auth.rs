use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Roles that count as staff for the careers module. Role management
/// itself lives in the surrounding platform; we only consume the claim.
const STAFF_ROLES: [&str; 4] = ["admin", "hr", "recruiter", "hiring_manager"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response();
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => {
            req.extensions_mut().insert(data.claims);
            next.run(req).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"invalid_token"})),
        )
            .into_response(),
    }
}

/// Resolve the acting staff member from verified claims; rejects callers
/// whose role is outside the staff set.
pub fn staff_actor(claims: &Claims) -> Result<Uuid> {
    let role = claims.role.as_deref().unwrap_or_default();
    if !STAFF_ROLES.contains(&role) {
        return Err(Error::Forbidden(format!(
            "Role '{}' may not manage job postings",
            role
        )));
    }
    Uuid::parse_str(&claims.sub)
        .map_err(|_| Error::Unauthorized("Invalid subject claim".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: Option<&str>) -> Claims {
        Claims {
            sub: sub.to_string(),
            exp: 4102444800, // 2100-01-01
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn staff_roles_resolve_to_an_actor() {
        let id = Uuid::new_v4();
        for role in STAFF_ROLES {
            let actor = staff_actor(&claims(&id.to_string(), Some(role))).unwrap();
            assert_eq!(actor, id);
        }
    }

    #[test]
    fn non_staff_roles_are_forbidden() {
        let id = Uuid::new_v4().to_string();
        assert!(matches!(
            staff_actor(&claims(&id, Some("candidate"))),
            Err(Error::Forbidden(_))
        ));
        assert!(matches!(
            staff_actor(&claims(&id, None)),
            Err(Error::Forbidden(_))
        ));
    }

    #[test]
    fn malformed_subject_is_unauthorized() {
        assert!(matches!(
            staff_actor(&claims("not-a-uuid", Some("hr"))),
            Err(Error::Unauthorized(_))
        ));
    }
}
