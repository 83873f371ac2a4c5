//! # Formbook Architecture
//!
//! Formbook is a **UI-agnostic contact book library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! This distinction drives the entire architecture and should guide all
//! development.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over the controllers                         │
//! │  - Normalizes inputs (paths → picture handles + previews)   │
//! │  - Keeps form and list coherent across submits and deletes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Controller Layer (form.rs, list.rs)                        │
//! │  - Pure business logic: validation, upsert, pagination      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract KeyValueStore trait, one well-known key         │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, controllers, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<SubmitOutcome>`, `&[Entry]`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! The one asynchronous edge—reading picture bytes for a preview—is
//! expressed as a ticket the caller resolves, so the core never blocks on
//! a file read it didn't ask for. This means the same core could serve a
//! REST API, a desktop shell, or any other UI.
//!
//! ## Testing Strategy
//!
//! The architecture enables focused testing at each layer:
//!
//! 1. **Controllers** (`form.rs`, `list.rs`): Thorough unit tests of the
//!    validation, submit, and pagination rules over `InMemoryStore`.
//!    This is where the lion's share of testing lives.
//!
//! 2. **API** (`api.rs`): Dispatch tests verifying the facade keeps form,
//!    list, and store coherent—not the logic itself.
//!
//! 3. **CLI** (`args.rs` + thin `main.rs`): Integration tests driving the
//!    built binary against a temporary data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`form`]: The entry form controller (draft, validation, submit)
//! - [`list`]: The paged entry list controller
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Entry`, `Address`)
//! - [`picture`]: Picture handles, previews, and data URLs
//! - [`validate`]: Field rules and their messages
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod model;
pub mod picture;
pub mod store;
pub mod validate;
