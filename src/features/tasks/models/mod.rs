mod task;

pub use task::{NewTaskHistory, NewTaskInstance, TaskHistory, TaskInstance, TaskPatch, TaskTemplate};
