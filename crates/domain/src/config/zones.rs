use serde::{Deserialize, Serialize};

/// One conditional-forwarding zone: queries under `domain` go to this
/// zone's servers instead of the default upstreams.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForwardZone {
    pub domain: String,

    pub servers: Vec<String>,
}

impl ForwardZone {
    pub fn validate_domain(domain: &str) -> Result<(), String> {
        if domain.is_empty() {
            return Err("Zone domain cannot be empty".to_string());
        }
        if domain.len() > 253 {
            return Err("Zone domain cannot exceed 253 characters".to_string());
        }
        let valid = domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_');
        if !valid {
            return Err(
                "Zone domain contains invalid characters (only alphanumeric, hyphens, dots and underscores are allowed)".to_string(),
            );
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        Self::validate_domain(&self.domain)?;
        if self.servers.is_empty() {
            return Err(format!("Zone '{}' has no servers", self.domain));
        }
        Ok(())
    }
}
