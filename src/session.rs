//! Current-session value
//!
//! The value the surrounding application persists across restarts: the
//! minimal identity snapshot taken when the authentication provider reports
//! a signed-in user. The facade itself stays value-agnostic; this type and
//! key constant are a convenience for the one value the app actually stores.

use serde::{Deserialize, Serialize};

/// Well-known key under which the current session is stored
pub const CURRENT_SESSION_KEY: &str = "currentUser";

/// Minimal identity snapshot of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-assigned user id
    pub uid: String,

    /// Email address, when the provider reports one
    pub email: Option<String>,
}

impl Session {
    /// Create a session snapshot
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Session {
            uid: uid.into(),
            email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let session = Session::new("u1", Some("a@b.com".to_string()));
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_missing_email() {
        let session = Session::new("u2", None);
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.uid, "u2");
        assert!(back.email.is_none());
    }

    #[test]
    fn test_field_names() {
        // Stored content is human-inspectable; field names are part of the format
        let json = serde_json::to_string(&Session::new("u1", Some("a@b.com".into()))).unwrap();
        assert_eq!(json, r#"{"uid":"u1","email":"a@b.com"}"#);
    }
}
