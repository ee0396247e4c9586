use crate::fault::Fault;
use crate::frames::{Selection, TraceEntry};
use crate::snippet::CodeSnippet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Report severity. Every captured fault is currently reported as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
}

/// HTTP request data injected by the host. The pipeline never reads it from
/// the environment itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: serde_json::Value,
}

/// Runtime and environment metadata injected by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppContext {
    pub runtime_version: String,
    pub environment: String,
    pub framework_version: String,
    pub locale: String,
}

/// The record assembled for one fault. Constructed once, serialized,
/// transmitted, discarded — never persisted or retried.
///
/// `file`/`line` always locate the throw site, independent of which frame
/// was selected for deep inspection. `trace` and `code_snippet` hold the
/// resolver's selection and always have equal length (0 or 1).
#[derive(Debug, Clone, Serialize)]
pub struct FaultReport {
    pub exception_name: String,
    pub message: String,
    pub code: i64,
    pub file: String,
    pub line: usize,
    pub occurred_at: DateTime<Utc>,
    pub severity: Severity,
    pub trace: Vec<TraceEntry>,
    pub code_snippet: Vec<CodeSnippet>,
}

impl FaultReport {
    pub fn new(fault: &Fault, selection: Selection) -> Self {
        Self {
            exception_name: fault.kind.clone(),
            message: fault.message.clone(),
            code: fault.code,
            file: fault.file.clone(),
            line: fault.line,
            occurred_at: Utc::now(),
            severity: Severity::Error,
            trace: selection.trace,
            code_snippet: selection.code_snippet,
        }
    }

    /// Serialize into the collector's wire shape.
    ///
    /// The collector expects nested documents as JSON-encoded strings: the
    /// report body itself, each trace entry and snippet inside their arrays,
    /// the arrays again, and the request's header map. Context fields come
    /// through as `null` when absent; each one is encoded on its own so a
    /// failure in one never drops the others.
    pub fn to_wire(
        &self,
        request: Option<&RequestContext>,
        user: Option<&serde_json::Value>,
        app: Option<&AppContext>,
    ) -> WirePayload {
        let trace: Vec<String> = self
            .trace
            .iter()
            .filter_map(|entry| serde_json::to_string(entry).ok())
            .collect();
        let code_snippet: Vec<String> = self
            .code_snippet
            .iter()
            .filter_map(|snippet| serde_json::to_string(snippet).ok())
            .collect();

        let body = StackTraceBody {
            exception_name: &self.exception_name,
            message: &self.message,
            code: self.code,
            file: &self.file,
            line: self.line,
            occurrence_times: self.occurred_at.to_rfc3339(),
            severity: self.severity,
            trace: serde_json::to_string(&trace).unwrap_or_else(|_| "[]".to_string()),
            code_snippet: serde_json::to_string(&code_snippet)
                .unwrap_or_else(|_| "[]".to_string()),
        };

        WirePayload {
            stack_trace: serde_json::to_string(&body).unwrap_or_default(),
            request_detail: request.and_then(encode_request),
            user: user.and_then(|value| serde_json::to_string(value).ok()),
            app: app.and_then(|context| serde_json::to_string(context).ok()),
        }
    }
}

/// Body behind the `stack_trace` wire field.
#[derive(Serialize)]
struct StackTraceBody<'a> {
    exception_name: &'a str,
    message: &'a str,
    code: i64,
    file: &'a str,
    line: usize,
    occurrence_times: String,
    severity: Severity,
    trace: String,
    code_snippet: String,
}

/// Payload shape the collector accepts at `/register-exception`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePayload {
    pub stack_trace: String,
    pub request_detail: Option<String>,
    pub user: Option<String>,
    pub app: Option<String>,
}

fn encode_request(request: &RequestContext) -> Option<String> {
    #[derive(Serialize)]
    struct WireRequest<'a> {
        method: &'a str,
        url: &'a str,
        headers: String,
        body: &'a serde_json::Value,
    }

    let headers = serde_json::to_string(&request.headers).ok()?;
    serde_json::to_string(&WireRequest {
        method: &request.method,
        url: &request.url,
        headers,
        body: &request.body,
    })
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_report() -> FaultReport {
        let fault = Fault::new("app::DbError", "connection refused")
            .with_code(500)
            .at("/srv/app/src/db.rs", 42);
        let selection = Selection {
            trace: vec![TraceEntry {
                file: "/src/db.rs".to_string(),
                line: 42,
            }],
            code_snippet: vec![CodeSnippet::default()],
        };
        FaultReport::new(&fault, selection)
    }

    #[test]
    fn test_report_keeps_throw_site_origin() {
        let report = sample_report();
        assert_eq!(report.file, "/srv/app/src/db.rs");
        assert_eq!(report.line, 42);
        assert_eq!(report.severity, Severity::Error);
        assert_eq!(report.trace.len(), report.code_snippet.len());
    }

    #[test]
    fn test_wire_payload_has_documented_keys() {
        let payload = sample_report().to_wire(None, None, None);
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert!(object.contains_key("stack_trace"));
        assert_eq!(object["request_detail"], Value::Null);
        assert_eq!(object["user"], Value::Null);
        assert_eq!(object["app"], Value::Null);
    }

    #[test]
    fn test_stack_trace_body_round_trips() {
        let payload = sample_report().to_wire(None, None, None);
        let body: Value = serde_json::from_str(&payload.stack_trace).unwrap();

        assert_eq!(body["exception_name"], "app::DbError");
        assert_eq!(body["message"], "connection refused");
        assert_eq!(body["code"], 500);
        assert_eq!(body["file"], "/srv/app/src/db.rs");
        assert_eq!(body["line"], 42);
        assert_eq!(body["severity"], "Error");

        let trace: Vec<String> = serde_json::from_str(body["trace"].as_str().unwrap()).unwrap();
        assert_eq!(trace.len(), 1);
        let entry: Value = serde_json::from_str(&trace[0]).unwrap();
        assert_eq!(entry["file"], "/src/db.rs");
        assert_eq!(entry["line"], 42);

        let snippets: Vec<String> =
            serde_json::from_str(body["code_snippet"].as_str().unwrap()).unwrap();
        assert_eq!(snippets.len(), 1);
    }

    #[test]
    fn test_request_headers_are_encoded_as_string() {
        let mut headers = BTreeMap::new();
        headers.insert("host".to_string(), "api.example".to_string());
        let request = RequestContext {
            method: "POST".to_string(),
            url: "https://api.example/orders".to_string(),
            headers,
            body: serde_json::json!({"qty": 3}),
        };

        let payload = sample_report().to_wire(Some(&request), None, None);
        let detail: Value =
            serde_json::from_str(payload.request_detail.as_deref().unwrap()).unwrap();

        assert_eq!(detail["method"], "POST");
        assert!(detail["headers"].is_string());
        let headers: Value = serde_json::from_str(detail["headers"].as_str().unwrap()).unwrap();
        assert_eq!(headers["host"], "api.example");
        assert_eq!(detail["body"]["qty"], 3);
    }

    #[test]
    fn test_user_and_app_contexts_are_independent() {
        let app = AppContext {
            runtime_version: "1.75.0".to_string(),
            environment: "production".to_string(),
            framework_version: "0.7.4".to_string(),
            locale: "en".to_string(),
        };

        let payload = sample_report().to_wire(None, None, Some(&app));
        assert!(payload.user.is_none());

        let app_value: Value = serde_json::from_str(payload.app.as_deref().unwrap()).unwrap();
        assert_eq!(app_value["environment"], "production");
    }
}
