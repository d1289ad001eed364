use serde::{Deserialize, Serialize};

/// Well-known claim types carried by user principals
pub mod claim_types {
    /// Display name shown in the management UI
    pub const DISPLAY_NAME: &str = "urn:squidex:name";
}

/// A single typed claim of a principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// Identity principal attached to user-bearing events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Subject (user ID)
    pub id: String,
    /// Login email
    pub email: String,
    /// Claims in the order they were issued
    #[serde(default)]
    pub claims: Vec<Claim>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            claims: Vec::new(),
        }
    }

    /// Add a claim, keeping issue order
    pub fn with_claim(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_type, value));
        self
    }

    /// Set the display name claim
    pub fn with_display_name(self, name: impl Into<String>) -> Self {
        self.with_claim(claim_types::DISPLAY_NAME, name)
    }

    /// First claim whose type matches, ignoring ASCII case
    pub fn claim(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type.eq_ignore_ascii_case(claim_type))
            .map(|c| c.value.as_str())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.claim(claim_types::DISPLAY_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_lookup_ignores_case() {
        let user = User::new("u1", "jane@example.com").with_claim("Role", "editor");

        assert_eq!(user.claim("role"), Some("editor"));
        assert_eq!(user.claim("ROLE"), Some("editor"));
        assert_eq!(user.claim("team"), None);
    }

    #[test]
    fn test_display_name_from_claim() {
        let user = User::new("u1", "jane@example.com").with_display_name("Jane");
        assert_eq!(user.display_name(), Some("Jane"));

        let anonymous = User::new("u2", "anon@example.com");
        assert_eq!(anonymous.display_name(), None);
    }

    #[test]
    fn test_first_matching_claim_wins() {
        let user = User::new("u1", "jane@example.com")
            .with_claim("team", "first")
            .with_claim("TEAM", "second");

        assert_eq!(user.claim("team"), Some("first"));
    }

    #[test]
    fn test_deserialize_claims() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "email": "jane@example.com",
            "claims": [{ "type": "urn:squidex:name", "value": "Jane" }]
        }))
        .unwrap();

        assert_eq!(user.display_name(), Some("Jane"));
    }
}
