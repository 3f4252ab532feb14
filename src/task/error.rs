use thiserror::Error;

use super::model::TaskId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task already exists: {0}")]
    DuplicateId(TaskId),

    #[error("Task not found: {0}")]
    NotFound(TaskId),
}
