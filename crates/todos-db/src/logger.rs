//! Statement logging.
//!
//! Every statement the gateway runs is reported to a [`StatementLogger`]
//! before it reaches the driver. Hosts that already log through `tracing`
//! use [`TracingLogger`]; tests plug in their own recorder.

use std::rc::Rc;
use std::sync::Arc;

use rusqlite::types::Value;

/// Sink for one line per executed statement.
pub trait StatementLogger {
    /// Records an informational message.
    fn info(&self, message: &str);
}

/// Forwards statement lines to `tracing` at `INFO` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl StatementLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "todos_db::statement", "{message}");
    }
}

impl<T: StatementLogger + ?Sized> StatementLogger for &T {
    fn info(&self, message: &str) {
        (**self).info(message);
    }
}

impl<T: StatementLogger + ?Sized> StatementLogger for Box<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }
}

impl<T: StatementLogger + ?Sized> StatementLogger for Arc<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }
}

impl<T: StatementLogger + ?Sized> StatementLogger for Rc<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }
}

/// Renders a statement and its bound parameters as a single log line.
///
/// The format is `<sql>: [<param>, ...]` with text parameters quoted.
pub fn format_statement(sql: &str, params: &[Value]) -> String {
    let rendered: Vec<String> = params.iter().map(render_value).collect();
    format!("{}: [{}]", sql.trim(), rendered.join(", "))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => format!("{s:?}"),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
