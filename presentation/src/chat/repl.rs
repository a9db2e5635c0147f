//! REPL (Read-Eval-Print Loop) for multi-session chat
//!
//! Each line becomes a [`ReplInput`]; chat actions are forwarded to the
//! [`ChatController`] as [`ChatCommand`]s and the resulting state is rendered
//! afterwards.

use super::command::ReplInput;
use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::StreamingReporter;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use solochat_application::{
    ChatCommand, ChatController, ChatOutcome, ConversationProgress, NoProgress,
};
use solochat_domain::SessionId;
use tracing::debug;

const PROMPT: &str = "Ask me anything> ";

/// Whether the loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: ChatController,
    config: ReplConfig,
}

impl ChatRepl {
    pub fn new(controller: ChatController, config: ReplConfig) -> Self {
        Self { controller, config }
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        print!(
            "{}",
            ConsoleFormatter::welcome(self.controller.config().model.as_str())
        );

        let progress = StreamingReporter::new(self.config.show_spinner);

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if self.execute(ReplInput::parse(line), &progress).await == Flow::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("{}", ConsoleFormatter::error(&format!("{:?}", err)));
                    break;
                }
            }
        }

        if let Some(path) = &self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Apply one parsed line.
    pub async fn execute(&mut self, input: ReplInput, progress: &dyn ConversationProgress) -> Flow {
        debug!(?input, "REPL input");
        match input {
            ReplInput::Message(text) => {
                println!();
                self.send(ChatCommand::Submit(text), progress).await;
            }
            ReplInput::NewChat => self.send(ChatCommand::NewChat, &NoProgress).await,
            ReplInput::List => print!("{}", ConsoleFormatter::sidebar(self.controller.store())),
            ReplInput::Switch(selector) => {
                if let Some(id) = self.resolve(&selector) {
                    self.send(ChatCommand::Select(id), &NoProgress).await;
                }
            }
            ReplInput::Delete(selector) => {
                if let Some(id) = self.resolve(&selector) {
                    self.send(ChatCommand::Delete(id), &NoProgress).await;
                }
            }
            ReplInput::History => {
                if let Some(session) = self.controller.store().active() {
                    print!("{}", ConsoleFormatter::transcript(session));
                }
            }
            ReplInput::Title => {
                if let Some(session) = self.controller.store().active() {
                    print!("{}", ConsoleFormatter::title(session));
                }
            }
            ReplInput::Help => print!("{}", ConsoleFormatter::help()),
            ReplInput::Quit => {
                println!("Bye!");
                return Flow::Quit;
            }
            ReplInput::MissingArgument(command) => {
                eprintln!(
                    "{}",
                    ConsoleFormatter::error(&format!("{} needs a chat number or id", command))
                );
            }
            ReplInput::Unknown(command) => {
                println!("Unknown command: {}", command);
                println!("Type /help for available commands");
            }
        }
        Flow::Continue
    }

    fn resolve(&self, selector: &str) -> Option<SessionId> {
        let id = self.controller.store().resolve(selector);
        if id.is_none() {
            eprintln!(
                "{}",
                ConsoleFormatter::error(&format!("No chat matches '{}'. Try /list.", selector))
            );
        }
        id
    }

    async fn send(&mut self, command: ChatCommand, progress: &dyn ConversationProgress) {
        match self.controller.handle(command, progress).await {
            Ok(outcome) => self.render(&outcome),
            Err(e) if e.is_warning() => println!("{}", ConsoleFormatter::warning(&e.to_string())),
            Err(e) => eprintln!("{}", ConsoleFormatter::error(&e.to_string())),
        }
    }

    fn render(&self, outcome: &ChatOutcome) {
        let store = self.controller.store();
        match outcome {
            ChatOutcome::Created(_) => {
                println!("{}", ConsoleFormatter::notice("Started a new chat."));
            }
            ChatOutcome::Selected(_) => {
                if let Some(session) = store.active() {
                    print!("{}", ConsoleFormatter::transcript(session));
                }
            }
            ChatOutcome::Deleted { id, recreated } => {
                println!(
                    "{}",
                    ConsoleFormatter::notice(&format!("Deleted chat {}.", id.short()))
                );
                if recreated.is_some() {
                    println!("{}", ConsoleFormatter::notice("Started a new chat."));
                }
                print!("{}", ConsoleFormatter::sidebar(store));
            }
            ChatOutcome::Replied { .. } => println!(),
            ChatOutcome::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use solochat_application::{
        ChatConfig, Credential, GatewayError, GatewayFactory, LlmGateway, LlmSession,
        StreamHandle,
    };
    use solochat_domain::{Model, StreamEvent, Turn};
    use std::sync::Arc;

    struct CannedSession(Model);

    #[async_trait]
    impl LlmSession for CannedSession {
        fn model(&self) -> &Model {
            &self.0
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            Ok("Hi there!".to_string())
        }

        async fn send_streaming(&self, _content: &str) -> Result<StreamHandle, GatewayError> {
            Ok(StreamHandle::from_events(vec![
                StreamEvent::Delta("Hi".to_string()),
                StreamEvent::Delta(" there!".to_string()),
                StreamEvent::Completed("Hi there!".to_string()),
            ]))
        }
    }

    struct CannedGateway;

    #[async_trait]
    impl LlmGateway for CannedGateway {
        async fn create_session(
            &self,
            model: &Model,
            _history: &[Turn],
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(CannedSession(model.clone())))
        }
    }

    struct CannedFactory;

    impl GatewayFactory for CannedFactory {
        fn build(&self, _credential: &Credential) -> Result<Arc<dyn LlmGateway>, GatewayError> {
            Ok(Arc::new(CannedGateway))
        }
    }

    fn repl(credential: Option<&str>) -> ChatRepl {
        let controller = ChatController::new(
            ChatConfig::default(),
            credential.and_then(Credential::new),
            Arc::new(CannedFactory),
        );
        ChatRepl::new(controller, ReplConfig::default())
    }

    fn message(text: &str) -> ReplInput {
        ReplInput::Message(text.to_string())
    }

    #[tokio::test]
    async fn test_message_gets_reply() {
        let mut repl = repl(Some("key"));
        let flow = repl.execute(message("hello"), &NoProgress).await;

        assert_eq!(flow, Flow::Continue);
        let session = repl.controller().store().active().unwrap();
        assert_eq!(session.title(), "hello");
        assert_eq!(
            session.turns(),
            &[Turn::user("hello"), Turn::assistant("Hi there!")]
        );
    }

    #[tokio::test]
    async fn test_message_without_credential_changes_nothing() {
        let mut repl = repl(None);
        repl.execute(message("hello"), &NoProgress).await;

        assert!(repl.controller().store().active().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_switch_by_list_number() {
        let mut repl = repl(Some("key"));
        repl.execute(message("first"), &NoProgress).await;
        repl.execute(ReplInput::NewChat, &NoProgress).await;
        repl.execute(message("second"), &NoProgress).await;

        // Newest first: "second" is 1, "first" is 2
        repl.execute(ReplInput::Switch("2".to_string()), &NoProgress)
            .await;
        assert_eq!(repl.controller().store().active().unwrap().title(), "first");
    }

    #[tokio::test]
    async fn test_switch_to_unknown_keeps_active() {
        let mut repl = repl(Some("key"));
        repl.execute(message("only"), &NoProgress).await;
        let before = repl.controller().store().active_id().cloned();

        repl.execute(ReplInput::Switch("9".to_string()), &NoProgress)
            .await;
        assert_eq!(repl.controller().store().active_id().cloned(), before);
    }

    #[tokio::test]
    async fn test_delete_only_chat_starts_fresh_one() {
        let mut repl = repl(Some("key"));
        repl.execute(message("doomed"), &NoProgress).await;

        repl.execute(ReplInput::Delete("1".to_string()), &NoProgress)
            .await;

        let store = repl.controller().store();
        assert_eq!(store.len(), 1);
        assert!(store.active().unwrap().is_empty());
        assert!(store.sidebar().is_empty());
    }

    #[tokio::test]
    async fn test_quit_stops_loop() {
        let mut repl = repl(None);
        assert_eq!(repl.execute(ReplInput::Quit, &NoProgress).await, Flow::Quit);
        assert_eq!(repl.execute(ReplInput::Help, &NoProgress).await, Flow::Continue);
    }
}
