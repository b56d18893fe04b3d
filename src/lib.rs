//! # `taskstore`
//!
//! An in-memory task list served as a JSON HTTP API.
//!
//! The collection is seeded once from a JSON file at startup, lives only in
//! process memory, and is exposed through list/filter/sort, single-task
//! lookup, create, partial update, and delete endpoints.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use taskstore::{init_router, store::seed};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = seed::load_or_empty(Path::new("task.json"));
//!     let router = init_router(store);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod server;
pub mod store;

pub use server::init_router;
pub use store::{Priority, Task, TaskStore};
