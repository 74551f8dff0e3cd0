//! Chat session actor

use super::{RuntimeError, SseEvent};
use crate::generator::{GenerateError, GenerationRequest, ResponseGenerator};
use crate::session::{transition, Effect, Event, Message, MessageHistory, SessionContext, SessionState};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// What the presentation surface renders for the conversation
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub pending: bool,
}

/// Handle to the running chat session
#[derive(Clone)]
pub struct SessionHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
    next_request_id: Arc<AtomicU64>,
}

impl SessionHandle {
    /// Spawn the session runtime on the current tokio runtime
    pub fn spawn(generator: Arc<dyn ResponseGenerator>, context: SessionContext) -> Self {
        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);

        let history = MessageHistory::with_welcome(&context.welcome_text);
        let state = SessionState::Idle;
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot {
            messages: history.messages().to_vec(),
            pending: state.is_pending(),
        });

        let runtime = ChatRuntime {
            context,
            state,
            history,
            generator,
            event_rx,
            event_tx: event_tx.clone(),
            broadcast_tx: broadcast_tx.clone(),
            snapshot_tx,
        };
        tokio::spawn(runtime.run());

        Self {
            event_tx,
            broadcast_tx,
            snapshot_rx,
            next_request_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Queue a user message. Empty text and sends while a request is
    /// pending are dropped by the session.
    pub async fn send_message(&self, text: impl Into<String>) -> Result<(), RuntimeError> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.event_tx
            .send(Event::UserMessage {
                text: text.into(),
                request_id,
            })
            .await
            .map_err(|_| RuntimeError::Closed("session"))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SseEvent> {
        self.broadcast_tx.subscribe()
    }
}

struct ChatRuntime {
    context: SessionContext,
    state: SessionState,
    history: MessageHistory,
    generator: Arc<dyn ResponseGenerator>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl ChatRuntime {
    async fn run(mut self) {
        tracing::info!(generator = %self.generator.name(), "Starting session runtime");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!("Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(e) => {
                // Validation rejections are silent for the user
                tracing::debug!(error = %e, "Session event rejected");
                return;
            }
        };

        self.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage {
                role,
                text,
                category,
            } => {
                let msg = self.history.append(role, text, category);
                tracing::debug!(sequence_id = msg.sequence_id, role = ?msg.role, "Message appended");
                let msg_json = serde_json::to_value(msg).unwrap_or(Value::Null);
                let _ = self
                    .broadcast_tx
                    .send(SseEvent::Message { message: msg_json });
            }

            Effect::PublishState => {
                self.snapshot_tx.send_replace(SessionSnapshot {
                    messages: self.history.messages().to_vec(),
                    pending: self.state.is_pending(),
                });
                let state_json = serde_json::to_value(self.state).unwrap_or(Value::Null);
                let _ = self
                    .broadcast_tx
                    .send(SseEvent::StateChange { state: state_json });
            }

            Effect::NotifyError { message } => {
                tracing::warn!(error = %message, "Notifying surface of failure");
                let _ = self.broadcast_tx.send(SseEvent::Error { message });
            }

            Effect::RequestGeneration {
                request_id,
                request,
            } => self.spawn_generation(request_id, request),
        }
    }

    /// Run the generator in the background. Every outcome, including a
    /// panic inside the generator, is converted into exactly one settle event.
    fn spawn_generation(&self, request_id: u64, request: GenerationRequest) {
        let generator = Arc::clone(&self.generator);
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            tracing::info!(request_id, category = ?request.category, "Requesting generation (background)");

            let call = tokio::spawn(async move { generator.generate(&request).await });
            let event = match call.await {
                Ok(Ok(generation)) => Event::GenerationComplete {
                    request_id,
                    text: generation.text,
                },
                Ok(Err(error)) => Event::GenerationFailed { request_id, error },
                Err(join_error) => {
                    tracing::error!(request_id, error = %join_error, "Generator task failed");
                    Event::GenerationFailed {
                        request_id,
                        error: GenerateError::transport(format!(
                            "generator task failed: {join_error}"
                        )),
                    }
                }
            };

            if event_tx.send(event).await.is_err() {
                tracing::warn!(request_id, "Session runtime gone before generation settled");
            }
        });
    }
}
