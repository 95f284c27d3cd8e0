//! JSON line I/O for the CLI
//!
//! - Input: one JSON object per line
//! - Output: one JSON object per line, flushed after each response
//! - UTF-8 only

use std::io::Write;

use serde_json::{json, Value};

use super::errors::CliResult;

/// Build a success response
pub fn ok_response(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Build an error response
pub fn error_response(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write one response line
pub fn write_line<W: Write>(writer: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
