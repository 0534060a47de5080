pub mod id;
pub mod task_list;
pub mod todo;
pub mod user;

pub use id::{TaskListId, ToDoId, UserId};
pub use task_list::{progress, AddMemberInput, TaskList, TaskListDetail, TaskListInput};
pub use todo::{NewToDoInput, ToDo, ToDoDetail, ToDoPatch};
pub use user::{normalize_email, User};
