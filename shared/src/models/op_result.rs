//! Mutation result payload

use serde::{Deserialize, Serialize};

/// Result of a staff/catalog mutation, rendered by the frontend as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResult {
    pub success: bool,
    /// Create operations return the new record's ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<i64>,
    /// Human-readable confirmation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OpResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            created_id: None,
            message: None,
        }
    }

    pub fn created(id: i64) -> Self {
        Self {
            success: true,
            created_id: Some(id),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_with_message() {
        let r = OpResult::created(42).with_message("Employee added");
        assert!(r.success);
        assert_eq!(r.created_id, Some(42));
        assert_eq!(r.message.as_deref(), Some("Employee added"));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_string(&OpResult::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
