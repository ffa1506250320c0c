//! Response generator interface for carehub.
//!
//! A [`Generator`] turns a conversation into a lazily produced sequence of
//! text tokens. [`HttpProvider`] speaks the OpenAI-compatible streaming
//! chat completions protocol over Server-Sent Events; [`Echo`] answers
//! offline.

pub use echo::Echo;
pub use generator::Generator;
#[cfg(feature = "http")]
pub use http::HttpProvider;
pub use message::{Message, Role};
#[cfg(feature = "http")]
pub use reqwest::{self, Client};
pub use sse::SseDecoder;
pub use stream::{Choice, Delta, StreamChunk, parse_token};

mod echo;
mod generator;
#[cfg(feature = "http")]
mod http;
mod message;
mod sse;
mod stream;
