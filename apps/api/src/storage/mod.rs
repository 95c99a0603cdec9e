//! Injected repository interface over resumes, conversations, and messages.
//!
//! Handlers only see the `Store` trait, so the in-memory backend can be
//! swapped for a persistent one without touching the HTTP layer.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::chat::{Conversation, Message, NewMessage};
use crate::models::resume::{NewResume, ParsedDocument, Resume};

pub use memory::MemStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resume {0} not found")]
    ResumeNotFound(Uuid),
}

#[async_trait]
pub trait Store: Send + Sync {
    // Resume operations
    async fn create_resume(&self, new: NewResume) -> Resume;
    async fn resume(&self, id: Uuid) -> Option<Resume>;
    /// The most recently uploaded resume, if any.
    async fn latest_resume(&self) -> Option<Resume>;
    async fn update_parsed_data(
        &self,
        id: Uuid,
        parsed: ParsedDocument,
    ) -> Result<Resume, StoreError>;

    // Conversation operations
    async fn create_conversation(&self, resume_id: Option<Uuid>) -> Conversation;
    async fn conversation(&self, id: Uuid) -> Option<Conversation>;
    /// The most recently created conversation, optionally restricted to one
    /// resume.
    async fn latest_conversation(&self, resume_id: Option<Uuid>) -> Option<Conversation>;

    // Message operations
    async fn create_message(&self, new: NewMessage) -> Message;
    /// All messages of a conversation, oldest first.
    async fn messages_by_conversation(&self, conversation_id: Uuid) -> Vec<Message>;
}
