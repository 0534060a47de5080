use serde::{Deserialize, Serialize};

use super::UserId;

/// A registered user as held by the persistence gateway.
///
/// The password credential travels with the record inside the service but is
/// never serialized into a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub avatar: Option<String>,
}

impl User {
    /// Builds a new user record with a freshly generated id.
    ///
    /// `email` is normalized the same way sign-in lookups are.
    pub fn new(name: String, email: &str, password_hash: String, avatar: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            name,
            email: normalize_email(email),
            password_hash,
            avatar,
        }
    }
}

/// Canonical form used for storing and looking up email addresses.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com",
            "$2b$04$secret".to_string(),
            None,
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["id"], user.id.to_string());
    }

    #[test]
    fn test_email_is_normalized() {
        let user = User::new("Ada".into(), "  Ada@Example.COM ", String::new(), None);
        assert_eq!(user.email, "ada@example.com");
    }
}
