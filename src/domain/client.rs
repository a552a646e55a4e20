use serde::{Deserialize, Serialize};

use crate::domain::types::ClientId;

/// Client account owning projects.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    #[serde(default)]
    pub full_name: Option<String>,
    pub email: String,
}

impl Client {
    /// Name shown in pick lists, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }

    /// Case-insensitive substring match on the email address.
    pub fn email_matches(&self, needle: &str) -> bool {
        self.email.to_lowercase().contains(&needle.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(full_name: Option<&str>) -> Client {
        Client {
            id: ClientId::new(1).unwrap(),
            full_name: full_name.map(str::to_string),
            email: "Buyer@Example.com".to_string(),
        }
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(client(Some("Ada Buyer")).display_name(), "Ada Buyer");
        assert_eq!(client(Some("  ")).display_name(), "Buyer@Example.com");
        assert_eq!(client(None).display_name(), "Buyer@Example.com");
    }

    #[test]
    fn email_match_ignores_case() {
        assert!(client(None).email_matches("buyer@"));
        assert!(!client(None).email_matches("seller"));
    }
}
