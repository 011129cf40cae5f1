use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID
    pub id: String,
    /// `USER` or `COACH` at the time the token was issued
    pub role: String,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp)
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            id: "user-id-123".to_string(),
            role: "COACH".to_string(),
            iat: 1234567800,
            exp: 1234567890,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""id":"user-id-123""#));
        assert!(serialized.contains(r#""role":"COACH""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"id":"user-id-456","role":"USER","iat":9999999900,"exp":9999999999}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.id, "user-id-456");
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.exp, 9999999999);
    }
}
