//! The persistence gateway.
//!
//! Each public operation on [`TodoGateway`] is one parameterized statement
//! run through [`TodoGateway::execute`] or [`TodoGateway::query`], both of
//! which log the statement before handing it to SQLite. Rows are turned
//! into records by the two mappers at the bottom of this file and nowhere
//! else.

use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection, Row};
use todos_types::{List, Todo};

use crate::connection::{open_connection, ConnectionError, DbRuntimeSettings};
use crate::error::GatewayError;
use crate::logger::{format_statement, StatementLogger, TracingLogger};

/// Text spelling of `true` accepted in the `completed` column.
///
/// SQLite stores booleans as integers, so this only matters for rows
/// written by tools that store PostgreSQL-style text booleans.
pub const COMPLETED_TRUE_LITERAL: &str = "t";

/// Translates list and todo operations into SQL against one connection.
///
/// The gateway owns its connection and performs no locking; hosts serving
/// concurrent requests hold one gateway per worker.
pub struct TodoGateway<L = TracingLogger> {
    conn: Connection,
    logger: L,
}

impl TodoGateway<TracingLogger> {
    /// Builds a gateway that logs statements through `tracing`.
    pub fn with_tracing(conn: Connection) -> Self {
        Self::new(conn, TracingLogger)
    }
}

impl<L: StatementLogger> TodoGateway<L> {
    /// Wraps an already open connection.
    pub fn new(conn: Connection, logger: L) -> Self {
        Self { conn, logger }
    }

    /// Opens the database named `db_name` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the connection cannot be opened.
    pub fn connect(
        db_name: &str,
        settings: DbRuntimeSettings,
        logger: L,
    ) -> Result<Self, ConnectionError> {
        let conn = open_connection(db_name, settings)?;
        Ok(Self::new(conn, logger))
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the gateway and returns its connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Logs and runs a statement that returns no rows.
    ///
    /// Returns the number of rows changed. Statements that produce rows
    /// must go through [`TodoGateway::query`] instead.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Database` with the driver error unchanged.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize, GatewayError> {
        self.log_statement(sql, params);
        let affected = self.conn.execute(sql, params_from_iter(params.iter()))?;
        tracing::debug!(affected, "statement executed");
        Ok(affected)
    }

    /// Logs and runs a statement, mapping every returned row with `map`.
    ///
    /// Rows come back in the order the statement produces them.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Database` if preparing, running, or mapping
    /// any row fails.
    pub fn query<T, F>(&self, sql: &str, params: &[Value], map: F) -> Result<Vec<T>, GatewayError>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.log_statement(sql, params);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), map)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        tracing::debug!(rows = records.len(), "query returned rows");
        Ok(records)
    }

    /// Fetches one list with its todos.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::ListNotFound` if no list has this id.
    pub fn find_list(&self, id: i64) -> Result<List, GatewayError> {
        let header = self
            .query(
                "SELECT * FROM lists WHERE id = ?1",
                &[Value::Integer(id)],
                map_row_to_list_header,
            )?
            .into_iter()
            .next()
            .ok_or(GatewayError::ListNotFound(id))?;

        self.attach_todos(header)
    }

    /// Fetches the oldest list with exactly this name, if any.
    ///
    /// Names are not unique; the lowest id wins.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Database` if either lookup fails.
    pub fn find_list_by_name(&self, name: &str) -> Result<Option<List>, GatewayError> {
        let header = self
            .query(
                "SELECT * FROM lists WHERE name = ?1 ORDER BY id LIMIT 1",
                &[Value::Text(name.to_string())],
                map_row_to_list_header,
            )?
            .into_iter()
            .next();

        header.map(|h| self.attach_todos(h)).transpose()
    }

    /// Fetches every list, ascending by id, each with its todos.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Database` if the list query or any todo
    /// query fails.
    pub fn all_lists(&self) -> Result<Vec<List>, GatewayError> {
        self.query("SELECT * FROM lists ORDER BY id", &[], map_row_to_list_header)?
            .into_iter()
            .map(|header| self.attach_todos(header))
            .collect()
    }

    /// Inserts a new list. The id is assigned by the database.
    pub fn create_list(&self, name: &str) -> Result<usize, GatewayError> {
        self.execute(
            "INSERT INTO lists (name) VALUES (?1)",
            &[Value::Text(name.to_string())],
        )
    }

    /// Deletes a list. What happens to its todos is up to the schema.
    pub fn delete_list(&self, id: i64) -> Result<usize, GatewayError> {
        self.execute("DELETE FROM lists WHERE id = ?1", &[Value::Integer(id)])
    }

    /// Renames a list.
    pub fn update_list_name(&self, id: i64, new_name: &str) -> Result<usize, GatewayError> {
        self.execute(
            "UPDATE lists SET name = ?1 WHERE id = ?2",
            &[Value::Text(new_name.to_string()), Value::Integer(id)],
        )
    }

    /// Adds a todo to a list. `completed` takes the schema default.
    ///
    /// # Errors
    ///
    /// A missing list surfaces as a driver constraint violation; see
    /// [`GatewayError::is_constraint_violation`].
    pub fn create_todo(&self, list_id: i64, name: &str) -> Result<usize, GatewayError> {
        self.execute(
            "INSERT INTO todos (list_id, name) VALUES (?1, ?2)",
            &[Value::Integer(list_id), Value::Text(name.to_string())],
        )
    }

    /// Deletes a todo only if it belongs to `list_id`.
    ///
    /// Returns 0 when the todo lives in a different list.
    pub fn delete_todo(&self, list_id: i64, todo_id: i64) -> Result<usize, GatewayError> {
        self.execute(
            "DELETE FROM todos WHERE id = ?1 AND list_id = ?2",
            &[Value::Integer(todo_id), Value::Integer(list_id)],
        )
    }

    /// Sets the completed flag of a todo scoped to `list_id`.
    pub fn update_todo_status(
        &self,
        list_id: i64,
        todo_id: i64,
        completed: bool,
    ) -> Result<usize, GatewayError> {
        self.execute(
            "UPDATE todos SET completed = ?1 WHERE list_id = ?2 AND id = ?3",
            &[
                Value::from(completed),
                Value::Integer(list_id),
                Value::Integer(todo_id),
            ],
        )
    }

    /// Marks every todo in a list as completed.
    pub fn mark_all_completed(&self, list_id: i64) -> Result<usize, GatewayError> {
        self.execute(
            "UPDATE todos SET completed = true WHERE list_id = ?1",
            &[Value::Integer(list_id)],
        )
    }

    fn load_todos_for_list(&self, list_id: i64) -> Result<Vec<Todo>, GatewayError> {
        self.query(
            "SELECT * FROM todos WHERE list_id = ?1 ORDER BY id",
            &[Value::Integer(list_id)],
            map_row_to_todo,
        )
    }

    fn attach_todos(&self, header: ListHeader) -> Result<List, GatewayError> {
        let todos = self.load_todos_for_list(header.id)?;
        Ok(List {
            id: header.id,
            name: header.name,
            todos,
        })
    }

    // Logging never fails, so it cannot hide the execution error that follows.
    fn log_statement(&self, sql: &str, params: &[Value]) {
        self.logger.info(&format_statement(sql, params));
    }
}

/// A `lists` row before its todos are attached.
struct ListHeader {
    id: i64,
    name: String,
}

/// Decodes the `completed` column into a boolean.
///
/// An integer is `true` only when it equals `1` (how SQLite stores `TRUE`).
/// Text is `true` only when it equals [`COMPLETED_TRUE_LITERAL`]. Anything
/// else, `NULL` included, is `false`.
pub fn decode_completed(value: ValueRef<'_>) -> bool {
    match value {
        ValueRef::Integer(i) => i == 1,
        ValueRef::Text(text) => text == COMPLETED_TRUE_LITERAL.as_bytes(),
        _ => false,
    }
}

fn map_row_to_list_header(row: &Row<'_>) -> rusqlite::Result<ListHeader> {
    Ok(ListHeader {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn map_row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get("id")?,
        name: row.get("name")?,
        completed: decode_completed(row.get_ref("completed")?),
    })
}
