mod auth;
mod provider;
mod serde_api;
mod transport;
mod types;

pub use provider::{DEFAULT_GEMINI_MODEL, GeminiProvider};
pub use transport::{GEMINI_BASE_URL, GeminiHttpTransport, GeminiTransport};
pub use types::{
    GeminiAuth, GeminiCallingMode, GeminiContent, GeminiFinishReason, GeminiFunctionDeclaration,
    GeminiPart, GeminiRequest, GeminiResponse, GeminiRole, GeminiUsage,
};
