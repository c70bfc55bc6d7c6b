//! Chat domain models — conversations and messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A two-party conversation between a buyer and a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    /// Exactly two participants.
    pub participant_ids: Vec<String>,
}

/// A chat message. Immutable once created; delivered at-least-once to
/// subscribers of its conversation, so consumers deduplicate by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_decodes_camel_case() {
        let json = r#"{
            "id": "m1",
            "conversationId": "c1",
            "senderId": "u1",
            "text": "hello",
            "createdAt": "2026-01-05T10:00:00Z"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.conversation_id, "c1");
        let expected: DateTime<Utc> = "2026-01-05T10:00:00Z".parse().unwrap();
        assert_eq!(msg.created_at, expected);
    }
}
