//! External job descriptor and its scheduler record formatter.
//!
//! A [`JobDescriptor`] holds everything the downstream scheduler needs to
//! launch one external simulator run: executable selection (portable path
//! or per-platform overrides), environment variables, arguments, and I/O
//! redirection files. The descriptor is built incrementally through the
//! setters and finally rendered with [`JobDescriptor::write_python_record`],
//! which emits the Python-literal record the scheduler evaluates.
//!
//! The record layout is a fixed wire contract, not general-purpose
//! serialization: spacing and comma placement are byte-exact, so it is
//! hand-rolled here rather than routed through a generic library.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::error::CoreError;

/// Leading spaces on every record field after the first (cosmetic only;
/// the downstream reader ignores whitespace).
const FIELD_INDENT: &str = "  ";

/// Configuration for one external simulator run.
///
/// Mutators never fail and always take the last write: optional fields are
/// replaced unconditionally, mapping inserts overwrite an existing key, and
/// arguments are appended verbatim (duplicates and empty strings included).
/// Paths are opaque to the descriptor; nothing is checked against the
/// filesystem.
///
/// The maps use sorted key order, so two descriptors built from the same
/// entries render identically regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDescriptor {
    /// Scheduling hint consumed by the dispatch ordering, opaque here.
    /// See [`crate::scheduling`] for the conventional values.
    priority: i32,
    portable_exe: Option<String>,
    init_code: Option<String>,
    target_file: Option<String>,
    #[serde(rename = "stdout")]
    stdout_file: Option<String>,
    #[serde(rename = "stderr")]
    stderr_file: Option<String>,
    #[serde(rename = "stdin")]
    stdin_file: Option<String>,
    #[serde(rename = "argList")]
    arguments: Vec<String>,
    environment: BTreeMap<String, String>,
    platform_exe: BTreeMap<String, String>,
}

impl JobDescriptor {
    /// Create an empty descriptor with the given scheduling priority.
    ///
    /// Every optional field starts unset (rendered as `None`), both maps
    /// start empty, and the argument list starts empty.
    pub fn new(priority: i32) -> Self {
        Self {
            priority,
            portable_exe: None,
            init_code: None,
            target_file: None,
            stdout_file: None,
            stderr_file: None,
            stdin_file: None,
            arguments: Vec::new(),
            environment: BTreeMap::new(),
            platform_exe: BTreeMap::new(),
        }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Set the platform-independent executable path.
    pub fn set_portable_exe(&mut self, path: impl Into<String>) {
        self.portable_exe = Some(path.into());
    }

    /// Set the initialization snippet run by the scheduler before launch.
    /// Opaque text here; never executed by this crate.
    pub fn set_init_code(&mut self, code: impl Into<String>) {
        self.init_code = Some(code.into());
    }

    /// Set the file whose presence marks the job as complete.
    pub fn set_target_file(&mut self, path: impl Into<String>) {
        self.target_file = Some(path.into());
    }

    pub fn set_stdout_file(&mut self, path: impl Into<String>) {
        self.stdout_file = Some(path.into());
    }

    pub fn set_stderr_file(&mut self, path: impl Into<String>) {
        self.stderr_file = Some(path.into());
    }

    pub fn set_stdin_file(&mut self, path: impl Into<String>) {
        self.stdin_file = Some(path.into());
    }

    /// Register a per-platform executable override. Inserting an existing
    /// platform name replaces its path.
    pub fn add_platform_exe(&mut self, platform: impl Into<String>, exe_path: impl Into<String>) {
        self.platform_exe.insert(platform.into(), exe_path.into());
    }

    /// Set an environment variable for the job. Inserting an existing name
    /// replaces its value.
    pub fn add_environment_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.environment.insert(name.into(), value.into());
    }

    /// Append one command-line argument. The argument list must not include
    /// the executable itself; the scheduler prepends it.
    pub fn add_argument(&mut self, arg: impl Into<String>) {
        self.arguments.push(arg.into());
    }

    /// Check that the descriptor names at least one executable, portable or
    /// per-platform. A descriptor without one is meaningless downstream.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.portable_exe.is_none() && self.platform_exe.is_empty() {
            return Err(CoreError::Validation(
                "Job has no executable: set a portable executable or add a platform override"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Render the scheduler record for this descriptor.
    ///
    /// Format (byte-exact; unset optional fields render as `None`):
    ///
    /// ```text
    ///  {"portable_exe" : "/bin/flow",
    ///   "init_code" : None,
    ///   ...
    ///   "argList" : ["--version"],
    ///   "environment" : {"OMP_NUM_THREADS":"1"},
    ///   "platform_exe" : {}}
    /// ```
    pub fn python_record(&self) -> String {
        let mut buf = String::new();
        buf.push_str(" {");
        push_py_string(&mut buf, "portable_exe", self.portable_exe.as_deref());
        end_field(&mut buf);
        push_py_string(&mut buf, "init_code", self.init_code.as_deref());
        end_field(&mut buf);
        push_py_string(&mut buf, "target_file", self.target_file.as_deref());
        end_field(&mut buf);
        push_py_string(&mut buf, "stdout", self.stdout_file.as_deref());
        end_field(&mut buf);
        push_py_string(&mut buf, "stderr", self.stderr_file.as_deref());
        end_field(&mut buf);
        push_py_string(&mut buf, "stdin", self.stdin_file.as_deref());
        end_field(&mut buf);
        push_py_list(&mut buf, "argList", &self.arguments);
        end_field(&mut buf);
        push_py_map(&mut buf, "environment", &self.environment);
        end_field(&mut buf);
        push_py_map(&mut buf, "platform_exe", &self.platform_exe);
        buf.push_str("}\n");
        buf
    }

    /// Write the scheduler record to `out`.
    ///
    /// The record is rendered into a buffer first and written with a single
    /// call, so a failing stream never observes a half-written record. A
    /// stream failure propagates unmodified as [`CoreError::Write`]; the
    /// descriptor itself is untouched and the call can be retried.
    pub fn write_python_record(&self, out: &mut impl Write) -> Result<(), CoreError> {
        out.write_all(self.python_record().as_bytes())?;
        Ok(())
    }

    /// JSON view of the descriptor, for diagnostics and API surfaces. The
    /// scheduler consumes [`JobDescriptor::python_record`], not this.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("descriptor has no non-serializable fields")
    }
}

// ---------------------------------------------------------------------------
// Record formatting helpers
// ---------------------------------------------------------------------------

/// Terminate a record field: trailing comma, newline, indent for the next.
fn end_field(buf: &mut String) {
    buf.push_str(",\n");
    buf.push_str(FIELD_INDENT);
}

/// `"key" : "value"`, or `"key" : None` when unset.
fn push_py_string(buf: &mut String, key: &str, value: Option<&str>) {
    buf.push('"');
    buf.push_str(key);
    buf.push_str("\" : ");
    match value {
        Some(v) => push_py_quoted(buf, v),
        None => buf.push_str("None"),
    }
}

/// `"key" : ["a","b"]` in insertion order; empty renders as `[]`.
fn push_py_list(buf: &mut String, key: &str, items: &[String]) {
    buf.push('"');
    buf.push_str(key);
    buf.push_str("\" : [");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        push_py_quoted(buf, item);
    }
    buf.push(']');
}

/// `"key" : {"k":"v","k2":"v2"}` in sorted key order; empty renders as `{}`.
fn push_py_map(buf: &mut String, key: &str, map: &BTreeMap<String, String>) {
    buf.push('"');
    buf.push_str(key);
    buf.push_str("\" : {");
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        push_py_quoted(buf, k);
        buf.push(':');
        push_py_quoted(buf, v);
    }
    buf.push('}');
}

/// Emit a double-quoted string verbatim.
///
/// The record format carries no escaping, so an embedded `"` corrupts the
/// record on the consumer side. Kept verbatim for wire compatibility;
/// logged so a corrupt record can be traced back to its source.
fn push_py_quoted(buf: &mut String, value: &str) {
    if value.contains('"') {
        tracing::warn!(value, "embedded double quote will corrupt the job record");
    }
    buf.push('"');
    buf.push_str(value);
    buf.push('"');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
