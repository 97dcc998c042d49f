pub mod error;
pub mod message;
pub mod traits;

pub use error::{FileReadError, RemoteServiceError};
pub use message::{Message, Role};
pub use traits::{ChatCompletion, ChatProvider, ChatRequest, TokenUsage};
