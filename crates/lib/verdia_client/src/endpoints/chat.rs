//! Chat REST endpoints — conversation and message CRUD.
//!
//! Push delivery of new messages is the realtime channel's job
//! (see [`crate::realtime`]); these bindings cover history and setup.

use verdia_core::models::auth::UserProfile;
use verdia_core::models::chat::{Conversation, Message};

use crate::auth::Acknowledgement;
use crate::error::ApiResult;
use crate::gateway::ApiClient;
use crate::request::ApiRequest;

impl ApiClient {
    /// `GET /chat/sellers` — sellers the user can start a conversation with.
    pub async fn chat_sellers(&self) -> ApiResult<Vec<UserProfile>> {
        self.send_json(&ApiRequest::get("/chat/sellers")).await
    }

    /// `GET /chat/users` — buyers who contacted the seller.
    pub async fn chat_users(&self) -> ApiResult<Vec<UserProfile>> {
        self.send_json(&ApiRequest::get("/chat/users")).await
    }

    /// `POST /chat/conversation` — open (or return) the conversation with a peer.
    pub async fn create_conversation(&self, peer_id: &str) -> ApiResult<Conversation> {
        let request = ApiRequest::post("/chat/conversation")
            .json(&serde_json::json!({ "peerId": peer_id }))?;
        self.send_json(&request).await
    }

    /// `GET /chat/conversation` — the user's conversations.
    pub async fn conversations(&self) -> ApiResult<Vec<Conversation>> {
        self.send_json(&ApiRequest::get("/chat/conversation")).await
    }

    /// `GET /chat/message/:conversationId` — message history.
    pub async fn messages(&self, conversation_id: &str) -> ApiResult<Vec<Message>> {
        self.send_json(&ApiRequest::get(format!("/chat/message/{conversation_id}")))
            .await
    }

    /// `POST /chat/message` — send a message.
    pub async fn send_message(&self, conversation_id: &str, text: &str) -> ApiResult<Message> {
        let request = ApiRequest::post("/chat/message").json(&serde_json::json!({
            "conversationId": conversation_id,
            "text": text,
        }))?;
        self.send_json(&request).await
    }

    /// `POST /chat/read/:conversationId` — mark a conversation read.
    pub async fn mark_read(&self, conversation_id: &str) -> ApiResult<Acknowledgement> {
        self.send_json(&ApiRequest::post(format!("/chat/read/{conversation_id}")))
            .await
    }
}
