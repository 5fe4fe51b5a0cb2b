pub mod client;
pub mod types;

pub use client::{use_api, ApiClient, TokenSource};
pub use types::*;
