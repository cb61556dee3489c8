// crates/pstore-core/src/runtime/mod.rs
// ============================================================================
// Module: Parameter Store Runtime
// Description: In-memory store and walkthrough procedures.
// Purpose: Provide runnable implementations over the core interfaces.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime components built on [`crate::interfaces::ParameterStore`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod memory;
pub mod walkthrough;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use memory::Clock;
pub use memory::InMemoryParameterStore;
pub use walkthrough::Step;
pub use walkthrough::UnknownStep;
pub use walkthrough::Walkthrough;
pub use walkthrough::WalkthroughError;
pub use walkthrough::WalkthroughSettings;
