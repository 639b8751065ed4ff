pub mod gong;
pub mod transcript;
pub mod whisper;

pub use gong::*;
pub use transcript::*;
pub use whisper::*;
