pub mod controller;
pub mod conversation;
pub mod providers;
pub mod session;
pub mod usage;
pub mod window;

pub use controller::{GenerationSettings, InteractionController, TurnOutcome, FALLBACK_ANSWER};
pub use conversation::{ConversationError, ConversationState};
pub use session::{ChatSession, InteractionState};
pub use usage::{CostRate, InvalidCostRate, SessionUsage, UsageAccountant, UsageRecord};
pub use window::HistoryWindow;
