pub mod error;
pub mod model;
pub mod simulator;
pub mod source;
pub mod store;

pub use error::TaskError;
pub use model::{GenerationTask, MediaRef, Stage, TaskId};
pub use store::{TaskSnapshot, TaskStore};
