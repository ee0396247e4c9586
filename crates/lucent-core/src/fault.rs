use serde::{Deserialize, Serialize};
use std::panic::PanicHookInfo;

/// One call-stack entry as provided by the host. Fields default so partial
/// trace entries (host internals without a file or line) still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackFrame {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl StackFrame {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
            function: None,
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }
}

/// A thrown error as handed in by the host: kind, message, the throw-site
/// location, and the caller chain (throw site excluded from `trace`,
/// innermost caller first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fault {
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub trace: Vec<StackFrame>,
}

impl Fault {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            code: 0,
            file: String::new(),
            line: 0,
            trace: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Set the throw-site location.
    pub fn at(mut self, file: impl Into<String>, line: usize) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    pub fn with_trace(mut self, trace: Vec<StackFrame>) -> Self {
        self.trace = trace;
        self
    }

    /// Build a fault from a panic, using the panic location as the throw
    /// site. Installing the hook itself stays host-owned:
    ///
    /// ```ignore
    /// std::panic::set_hook(Box::new(|info| {
    ///     let fault = Fault::from_panic(info);
    ///     // hand the fault to the reporting handler
    /// }));
    /// ```
    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let message = if let Some(text) = info.payload().downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = info.payload().downcast_ref::<String>() {
            text.clone()
        } else {
            "panic".to_string()
        };

        let mut fault = Self::new("panic", message);
        if let Some(location) = info.location() {
            fault = fault.at(location.file(), location.line() as usize);
        }
        fault
    }
}
