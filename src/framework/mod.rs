//! Generic actor framework for resource management.
//!
//! This module provides the building blocks every service in the crate is made of:
//! a type-safe actor that owns a collection of entities, and a cloneable client that
//! talks to it over channels.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that manages entities
//! - [`ResourceClient`] - Type-safe handle for sending requests to an actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
