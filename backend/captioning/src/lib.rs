pub mod codec;
pub mod gemini;
pub mod mock;

pub use gemini::GeminiCaptioner;
pub use mock::MockCaptioner;
