//! Row models and the request shapes that create or modify them.

pub mod category;
pub mod task;

pub use category::{Category, CreateCategory, NewCategory, UpdateCategory};
pub use task::{NewTask, Task, TaskRequest};
