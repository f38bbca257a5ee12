use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use serde_json::{Value, json};
use tracing::warn;

use crate::protocol::response_body;

/// Where raw request/response bodies are written.
#[derive(Debug, Clone)]
pub enum MessageLog {
    Stdout,
    File(PathBuf),
}

pub(crate) struct MessageLogger {
    out: Box<dyn Write + Send>,
}

impl MessageLogger {
    pub fn open(target: &MessageLog) -> io::Result<Self> {
        let out: Box<dyn Write + Send> = match target {
            MessageLog::Stdout => Box::new(io::stdout()),
            MessageLog::File(path) => Box::new(
                OpenOptions::new().create(true).append(true).open(path)?,
            ),
        };
        Ok(Self { out })
    }

    pub fn log_request(&mut self, method: &str, url: &str, body: Option<&Value>) {
        let body = body.map(redact_credentials);
        let entry = json!({
            "ts": Utc::now().to_rfc3339(),
            "dir": "req",
            "method": method,
            "url": url,
            "body": body,
        });
        self.write_line(&entry);
    }

    pub fn log_response(&mut self, method: &str, url: &str, status: u16, body: &str) {
        let body = response_body(body);
        let entry = json!({
            "ts": Utc::now().to_rfc3339(),
            "dir": "resp",
            "method": method,
            "url": url,
            "status": status,
            "body": body,
        });
        self.write_line(&entry);
    }

    fn write_line(&mut self, entry: &Value) {
        if let Ok(line) = serde_json::to_string(entry)
            && let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush())
        {
            warn!("failed to write log entry: {e}");
        }
    }
}

/// Copy of a request body with the login password masked.
fn redact_credentials(body: &Value) -> Value {
    let mut body = body.clone();
    if let Some(pass) = body.pointer_mut("/idpw/pass") {
        *pass = Value::String(REDACTED.to_string());
    }
    body
}

const REDACTED: &str = "<redacted>";

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn read_lines(path: &std::path::Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn log_request_writes_ndjson() {
        let tmp = NamedTempFile::new().unwrap();
        let mut logger = MessageLogger::open(&MessageLog::File(tmp.path().into())).unwrap();
        logger.log_request("POST", "https://host/auth/login", Some(&json!({"idpw": {}})));

        let lines = read_lines(tmp.path());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["dir"], "req");
        assert_eq!(lines[0]["method"], "POST");
        assert!(lines[0]["body"]["idpw"].is_object());
        assert!(lines[0]["ts"].as_str().is_some());
    }

    #[test]
    fn login_password_is_masked() {
        let tmp = NamedTempFile::new().unwrap();
        let mut logger = MessageLogger::open(&MessageLog::File(tmp.path().into())).unwrap();
        let body = crate::protocol::login_message("u", "hunter2");
        logger.log_request("POST", "https://host/auth/login", Some(&body));

        let raw = std::fs::read_to_string(tmp.path()).unwrap();
        assert!(!raw.contains("hunter2"));
        let lines = read_lines(tmp.path());
        assert_eq!(lines[0]["body"]["idpw"]["id"], "u");
        assert_eq!(lines[0]["body"]["idpw"]["pass"], REDACTED);
    }

    #[test]
    fn log_response_keeps_json_and_text_bodies() {
        let tmp = NamedTempFile::new().unwrap();
        let mut logger = MessageLogger::open(&MessageLog::File(tmp.path().into())).unwrap();
        logger.log_response("GET", "https://host/devices", 200, r#"{"ac_list": []}"#);
        logger.log_response("GET", "https://host/devices", 502, "Bad Gateway");

        let lines = read_lines(tmp.path());
        assert_eq!(lines[0]["dir"], "resp");
        assert_eq!(lines[0]["status"], 200);
        assert!(lines[0]["body"]["ac_list"].is_array());
        assert_eq!(lines[1]["status"], 502);
        assert_eq!(lines[1]["body"], "Bad Gateway");
    }

    #[test]
    fn file_log_appends() {
        let tmp = NamedTempFile::new().unwrap();
        let target = MessageLog::File(tmp.path().into());
        MessageLogger::open(&target).unwrap().log_request("GET", "/a", None);
        MessageLogger::open(&target).unwrap().log_request("GET", "/b", None);

        let lines = read_lines(tmp.path());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["url"], "/b");
        assert!(lines[1]["body"].is_null());
    }
}
