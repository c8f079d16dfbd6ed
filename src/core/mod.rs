//! Core library components.
//!
//! The tree model, the traversal, the decryption backends and the passes
//! that tie them together.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod decrypt;
pub mod node;
pub mod traverse;
