//! Events that can occur in a conversation

use crate::generator::GenerateError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserMessage {
        text: String,
        /// Assigned by the handle so transitions stay pure
        request_id: u64,
    },

    // Generator events
    GenerationComplete {
        request_id: u64,
        text: String,
    },
    GenerationFailed {
        request_id: u64,
        error: GenerateError,
    },
}
