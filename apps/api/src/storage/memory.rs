//! In-memory `Store` backend. Unbounded and non-persistent: suitable for a
//! single-process site where the uploaded resume and chat history may vanish
//! on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::chat::{Conversation, Message, NewMessage};
use crate::models::resume::{NewResume, ParsedDocument, Resume};
use crate::storage::{Store, StoreError};

#[derive(Default)]
pub struct MemStore {
    resumes: RwLock<HashMap<Uuid, Resume>>,
    conversations: RwLock<HashMap<Uuid, Conversation>>,
    messages: RwLock<HashMap<Uuid, Message>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create_resume(&self, new: NewResume) -> Resume {
        let resume = Resume {
            id: Uuid::new_v4(),
            filename: new.filename,
            content: new.content,
            parsed_data: None,
            uploaded_at: Utc::now(),
        };
        self.resumes
            .write()
            .await
            .insert(resume.id, resume.clone());
        resume
    }

    async fn resume(&self, id: Uuid) -> Option<Resume> {
        self.resumes.read().await.get(&id).cloned()
    }

    async fn latest_resume(&self) -> Option<Resume> {
        self.resumes
            .read()
            .await
            .values()
            .max_by_key(|r| r.uploaded_at)
            .cloned()
    }

    async fn update_parsed_data(
        &self,
        id: Uuid,
        parsed: ParsedDocument,
    ) -> Result<Resume, StoreError> {
        let mut resumes = self.resumes.write().await;
        let resume = resumes.get_mut(&id).ok_or(StoreError::ResumeNotFound(id))?;
        resume.parsed_data = Some(parsed);
        Ok(resume.clone())
    }

    async fn create_conversation(&self, resume_id: Option<Uuid>) -> Conversation {
        let now = Utc::now();
        let conversation = Conversation {
            id: Uuid::new_v4(),
            resume_id,
            created_at: now,
            updated_at: now,
        };
        self.conversations
            .write()
            .await
            .insert(conversation.id, conversation.clone());
        conversation
    }

    async fn conversation(&self, id: Uuid) -> Option<Conversation> {
        self.conversations.read().await.get(&id).cloned()
    }

    async fn latest_conversation(&self, resume_id: Option<Uuid>) -> Option<Conversation> {
        self.conversations
            .read()
            .await
            .values()
            .filter(|c| resume_id.is_none() || c.resume_id == resume_id)
            .max_by_key(|c| c.created_at)
            .cloned()
    }

    async fn create_message(&self, new: NewMessage) -> Message {
        let message = Message {
            id: Uuid::new_v4(),
            conversation_id: new.conversation_id,
            role: new.role,
            content: new.content,
            timestamp: Utc::now(),
        };
        self.messages
            .write()
            .await
            .insert(message.id, message.clone());
        message
    }

    async fn messages_by_conversation(&self, conversation_id: Uuid) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .messages
            .read()
            .await
            .values()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        messages
    }
}
