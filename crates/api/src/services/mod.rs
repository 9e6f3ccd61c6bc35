//! Service layer: orchestrates lookups, mutations and paged queries over
//! the store traits. Handlers hold no logic beyond binding and validation.
//!
//! Each service receives its store handles at construction; nothing is
//! looked up from global state.

pub mod category;
pub mod task;

pub use category::CategoryService;
pub use task::TaskService;
