//! Record types shared by the todos workspace.
//!
//! Records are plain values built fresh from query results. Nothing in this
//! crate talks to a database; `todos-db` owns the row mapping and hands
//! these types back to callers.

use serde::{Deserialize, Serialize};

/// A single task belonging to exactly one [`List`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Database-assigned primary key.
    pub id: i64,
    /// Task text.
    pub name: String,
    /// Whether the task has been completed.
    pub completed: bool,
}

/// A named collection of todos.
///
/// `todos` is always loaded eagerly and ordered by ascending todo id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Database-assigned primary key.
    pub id: i64,
    /// Display name of the list.
    pub name: String,
    /// Todos in this list, ascending by id.
    pub todos: Vec<Todo>,
}

impl List {
    /// Total number of todos in the list.
    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of todos not yet completed.
    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// A list is done once it has at least one todo and none remain.
    pub fn is_done(&self) -> bool {
        self.todos_count() > 0 && self.todos_remaining_count() == 0
    }
}
