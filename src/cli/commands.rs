//! CLI command implementations
//!
//! `demo` exercises the store with a fixed scenario. `serve` runs a request
//! loop over stdin/stdout; each line is answered independently, so a bad
//! request never ends the loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::StoreConfig;
use crate::observability::{Event, LogLevel, Logger};
use crate::store::Store;

use super::args::Command;
use super::errors::CliResult;
use super::io::{error_response, ok_response, write_line};

/// Error code for lines that do not decode into a request
pub const BAD_REQUEST: &str = "AERO_KV_CLI_BAD_REQUEST";

/// One request line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase", deny_unknown_fields)]
pub enum Request {
    /// `{"op":"insert","key":..,"field":..,"record":..,"timestamp":..,"ttl":..}`
    Insert {
        key: String,
        field: String,
        record: String,
        timestamp: i64,
        #[serde(default)]
        ttl: Option<i64>,
    },
    /// `{"op":"scan","prefix":..,"timestamp":..}`
    Scan { prefix: String, timestamp: i64 },
    /// `{"op":"sweep","now":..}`
    Sweep { now: i64 },
    /// `{"op":"stats"}`
    Stats,
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Demo => demo(&mut io::stdout()),
        Command::Serve { config, log_level } => serve(config.as_deref(), log_level),
    }
}

/// Insert three records and print the scan for prefix `user`.
pub fn demo<W: Write>(out: &mut W) -> CliResult<()> {
    let mut store = Store::with_config(StoreConfig::quiet());

    writeln!(out, "aerokv demo: basic insert and scan_by_prefix")?;
    store.insert("user1", "name", "Alice", 100, None);
    store.insert("user1", "age", "30", 101, None);
    store.insert("user2", "name", "Bob", 90, None);

    for row in store.scan_by_prefix("user", 150) {
        writeln!(out, "{}:{} = {}", row.key, row.field, row.record)?;
    }
    out.flush()?;
    Ok(())
}

/// Serve requests from stdin until EOF.
pub fn serve(config_path: Option<&Path>, log_level: Option<LogLevel>) -> CliResult<()> {
    let mut config = match config_path {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    if let Some(level) = log_level {
        config.log_level = level;
    }

    let logger = Logger::new(config.log_level);
    if let Some(path) = config_path {
        let path = path.display().to_string();
        logger.event(Event::ConfigLoaded, &[("path", path.as_str())]);
    }
    logger.event(Event::Serving, &[]);

    let mut store = Store::with_config(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    serve_stream(&mut store, &logger, stdin.lock(), &mut stdout)
}

/// Answer every non-blank line of `reader` on `writer`.
pub fn serve_stream<R: BufRead, W: Write>(
    store: &mut Store,
    logger: &Logger,
    reader: R,
    writer: &mut W,
) -> CliResult<()> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(store, request),
            Err(err) => {
                let reason = err.to_string();
                logger.event(Event::RequestRejected, &[("reason", reason.as_str())]);
                error_response(BAD_REQUEST, &format!("Invalid request: {}", err))
            }
        };
        write_line(writer, &response)?;
    }
    Ok(())
}

/// Execute one decoded request against the store.
pub fn handle_request(store: &mut Store, request: Request) -> Value {
    match request {
        Request::Insert {
            key,
            field,
            record,
            timestamp,
            ttl,
        } => match store.try_insert(&key, &field, &record, timestamp, ttl) {
            Ok(()) => ok_response(json!({ "inserted": true })),
            Err(err) => error_response(err.code(), &err.to_string()),
        },
        Request::Scan { prefix, timestamp } => {
            let rows = store.scan_by_prefix(&prefix, timestamp);
            ok_response(json!(rows))
        }
        Request::Sweep { now } => ok_response(json!(store.sweep(now))),
        Request::Stats => ok_response(json!({
            "keys": store.key_count(),
            "indexed_keys": store.indexed_key_count(),
            "pending_expirations": store.pending_expirations(),
            "next_expiry": store.next_expiry(),
            "metrics": store.metrics(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_lines(input: &str) -> Vec<Value> {
        let mut store = Store::with_config(StoreConfig::quiet());
        let mut output = Vec::new();
        serve_stream(&mut store, &Logger::disabled(), input.as_bytes(), &mut output).unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_demo_output() {
        let mut output = Vec::new();
        demo(&mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(
            lines,
            vec!["user1:age = 30", "user1:name = Alice", "user2:name = Bob"]
        );
    }

    #[test]
    fn test_parse_insert_without_ttl() {
        let request: Request = serde_json::from_str(
            r#"{"op":"insert","key":"k","field":"f","record":"v","timestamp":3}"#,
        )
        .unwrap();

        assert_eq!(
            request,
            Request::Insert {
                key: "k".into(),
                field: "f".into(),
                record: "v".into(),
                timestamp: 3,
                ttl: None,
            }
        );
    }

    #[test]
    fn test_insert_then_scan() {
        let responses = run_lines(concat!(
            r#"{"op":"insert","key":"k","field":"f","record":"v1","timestamp":0,"ttl":10}"#,
            "\n",
            r#"{"op":"scan","prefix":"k","timestamp":5}"#,
            "\n",
            r#"{"op":"scan","prefix":"k","timestamp":10}"#,
            "\n",
        ));

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["data"]["inserted"], true);
        assert_eq!(
            responses[1]["data"],
            json!([{"key": "k", "field": "f", "record": "v1"}])
        );
        assert_eq!(responses[2]["data"], json!([]));
    }

    #[test]
    fn test_rejected_insert_reports_code() {
        let responses = run_lines(concat!(
            r#"{"op":"insert","key":"k","field":"f","record":"v","timestamp":0}"#,
            "\n",
            r#"{"op":"insert","key":"k","field":"f","record":"w","timestamp":0}"#,
            "\n",
        ));

        assert_eq!(responses[1]["status"], "error");
        assert_eq!(responses[1]["code"], "AERO_KV_DUPLICATE_TIMESTAMP");
    }

    #[test]
    fn test_bad_lines_do_not_stop_the_loop() {
        let responses = run_lines(concat!(
            "not json\n",
            "\n",
            r#"{"op":"drop"}"#,
            "\n",
            r#"{"op":"stats"}"#,
            "\n",
        ));

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["code"], BAD_REQUEST);
        assert_eq!(responses[1]["code"], BAD_REQUEST);
        assert_eq!(responses[2]["status"], "ok");
        assert_eq!(responses[2]["data"]["keys"], 0);
    }

    #[test]
    fn test_sweep_and_stats() {
        let responses = run_lines(concat!(
            r#"{"op":"insert","key":"a","field":"f","record":"v","timestamp":0,"ttl":1}"#,
            "\n",
            r#"{"op":"stats"}"#,
            "\n",
            r#"{"op":"sweep","now":1}"#,
            "\n",
            r#"{"op":"stats"}"#,
            "\n",
        ));

        assert_eq!(responses[1]["data"]["pending_expirations"], 1);
        assert_eq!(responses[1]["data"]["next_expiry"], 1);
        assert_eq!(responses[2]["data"]["keys_evicted"], 1);
        assert_eq!(responses[3]["data"]["keys"], 0);
        assert_eq!(responses[3]["data"]["metrics"]["versions_expired"], 1);
    }
}
