//! Chat parameters used by the controller.

use solochat_domain::Model;

/// Static parameters of a chat run.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    /// Model every session talks to.
    pub model: Model,
}

impl ChatConfig {
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }
}
