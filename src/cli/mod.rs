pub mod orchestration;

pub use orchestration::{run_generate, run_send, GenerateArgs, GenerateResult, SendArgs};
