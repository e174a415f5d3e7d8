// Chat assistant: personalized answers over the job board.
// Flow: fetch context → summarize applications → classify intent →
//       (status digest) or (locate jobs → hosted model or rule-based fallback).
// Data access goes through `ChatStore`; model calls go through `llm_client::ChatModel`.

pub mod context;
pub mod fallback;
pub mod handlers;
pub mod intent;
pub mod jobs;
pub mod location;
pub mod prompts;
pub mod responder;
pub mod store;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;
