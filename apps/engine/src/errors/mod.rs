//! Error handling for the word-chain engine.

pub mod domain;

pub use domain::GameError;
