//! Text-generation service client.

pub mod client;

pub use client::OpenAiGenerator;
