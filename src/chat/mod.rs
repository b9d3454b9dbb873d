//! Venue chat
//!
//! Per-venue conversation sessions, the prompt and fallback tables, and
//! the assistant that answers questions about the rolled venue.

pub mod assistant;
pub mod cache;
pub mod export;
pub mod fallback;
pub mod prompts;
pub mod session;

pub use assistant::{AssistantReply, VenueAssistant};
pub use cache::{MemoryStats, ResponseStats, SearchHit, SessionCache};
pub use export::ChatExport;
pub use session::{ConversationEntry, ConversationSession, Role, SessionKey};
