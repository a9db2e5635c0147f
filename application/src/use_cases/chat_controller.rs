//! Chat Controller use case.
//!
//! The command handler of the chat UI. Every user action becomes a
//! [`ChatCommand`]; [`ChatController::handle`] applies it to the
//! [`SessionStore`] and, for submissions, drives the model reply through
//! [`ConversationDriver`]. A render step afterwards reads the store through
//! [`ChatController::store`].
//!
//! # Submission flow
//!
//! 1. Blank input is ignored
//! 2. No credential → [`ChatError::MissingCredential`], nothing appended
//! 3. Gateway construction fails → [`ChatError::ClientInit`], nothing appended;
//!    the next submission tries again
//! 4. Title derived (first turn only), user turn appended
//! 5. Reply streamed; on success the assistant turn is appended, on failure
//!    the partial reply is dropped and the user turn stays

use crate::config::{ChatConfig, Credential};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, GatewayFactory, LlmGateway};
use crate::ports::progress::ConversationProgress;
use crate::use_cases::drive_conversation::{ConversationDriver, DriveError, DriveInput};
use serde_json::json;
use solochat_domain::{DomainError, SessionId, SessionStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A user action against the chat UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Start a fresh conversation and make it active.
    NewChat,
    /// Switch the active conversation.
    Select(SessionId),
    /// Remove a conversation.
    Delete(SessionId),
    /// Send a message in the active conversation.
    Submit(String),
}

/// What a successfully handled command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Created(SessionId),
    Selected(SessionId),
    Deleted {
        id: SessionId,
        /// Session created to repair the active pointer, if any.
        recreated: Option<SessionId>,
    },
    Replied {
        session: SessionId,
        text: String,
    },
    /// Blank submission; nothing changed.
    Ignored,
}

/// Errors surfaced to the user. None of them is fatal.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("API key not found. Set it in the environment to chat.")]
    MissingCredential,

    #[error("Error initializing client: {0}")]
    ClientInit(GatewayError),

    #[error("An error occurred: {0}")]
    Stream(DriveError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ChatError {
    /// Warnings disable an action; everything else is an error banner.
    pub fn is_warning(&self) -> bool {
        matches!(self, ChatError::MissingCredential)
    }
}

/// Owns the session store and handles chat commands.
pub struct ChatController {
    store: SessionStore,
    config: ChatConfig,
    credential: Option<Credential>,
    factory: Arc<dyn GatewayFactory>,
    gateway: Option<Arc<dyn LlmGateway>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatController {
    /// Create a controller with one empty active session.
    pub fn new(
        config: ChatConfig,
        credential: Option<Credential>,
        factory: Arc<dyn GatewayFactory>,
    ) -> Self {
        let mut store = SessionStore::new();
        store.ensure_active();
        Self {
            store,
            config,
            credential,
            factory,
            gateway: None,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Whether the submit path is enabled.
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Apply one command to the store.
    pub async fn handle(
        &mut self,
        command: ChatCommand,
        progress: &dyn ConversationProgress,
    ) -> Result<ChatOutcome, ChatError> {
        debug!(?command, "Handling chat command");
        let outcome = match command {
            ChatCommand::NewChat => {
                let id = self.store.create_session();
                self.log("session_created", json!({ "session": id }));
                Ok(ChatOutcome::Created(id))
            }
            ChatCommand::Select(id) => {
                self.store.select_session(&id)?;
                self.log("session_selected", json!({ "session": id }));
                Ok(ChatOutcome::Selected(id))
            }
            ChatCommand::Delete(id) => {
                let was_active = self.store.delete_session(&id)?;
                self.log(
                    "session_deleted",
                    json!({ "session": id, "was_active": was_active }),
                );
                let recreated = self.store.ensure_active();
                if let Some(new_id) = &recreated {
                    self.log("session_created", json!({ "session": new_id }));
                }
                Ok(ChatOutcome::Deleted { id, recreated })
            }
            ChatCommand::Submit(text) => self.submit(text, progress).await,
        };

        if let Err(e) = &outcome {
            warn!("Chat command failed: {}", e);
        }
        outcome
    }

    async fn submit(
        &mut self,
        text: String,
        progress: &dyn ConversationProgress,
    ) -> Result<ChatOutcome, ChatError> {
        if text.trim().is_empty() {
            return Ok(ChatOutcome::Ignored);
        }

        let credential = self
            .credential
            .clone()
            .ok_or(ChatError::MissingCredential)?;
        let gateway = self.gateway(&credential)?;

        if let Some(id) = self.store.ensure_active() {
            self.log("session_created", json!({ "session": id }));
        }
        let session_id = self
            .store
            .active_id()
            .cloned()
            .ok_or_else(|| DomainError::TurnOrder("no active session".to_string()))?;

        let history = self
            .store
            .get(&session_id)
            .map(|s| s.turns().to_vec())
            .unwrap_or_default();

        self.store.rename_on_first_turn(&session_id, &text)?;
        self.store.append_user_turn(&session_id, text.clone())?;
        self.log(
            "user_turn",
            json!({ "session": session_id, "content": text }),
        );

        let driver = ConversationDriver::new(gateway);
        let input = DriveInput::new(history, text, self.config.model.clone());

        match driver.execute(input, progress).await {
            Ok(reply) => {
                self.store
                    .append_assistant_turn(&session_id, reply.clone())?;
                self.log(
                    "assistant_turn",
                    json!({ "session": session_id, "content": reply }),
                );
                info!(session = %session_id.short(), bytes = reply.len(), "Reply stored");
                Ok(ChatOutcome::Replied {
                    session: session_id,
                    text: reply,
                })
            }
            Err(e) => {
                self.log(
                    "stream_failed",
                    json!({
                        "session": session_id,
                        "error": e.to_string(),
                        "discarded": e.partial(),
                    }),
                );
                Err(ChatError::Stream(e))
            }
        }
    }

    /// Build the gateway on first use; a failed build is retried next time.
    fn gateway(&mut self, credential: &Credential) -> Result<Arc<dyn LlmGateway>, ChatError> {
        if let Some(gateway) = &self.gateway {
            return Ok(gateway.clone());
        }
        let gateway = self
            .factory
            .build(credential)
            .map_err(ChatError::ClientInit)?;
        info!(model = %self.config.model, "Model client initialized");
        self.gateway = Some(gateway.clone());
        Ok(gateway)
    }

    fn log(&self, event_type: &'static str, payload: serde_json::Value) {
        self.conversation_logger
            .log(ConversationEvent::new(event_type, payload));
    }
}
