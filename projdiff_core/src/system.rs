use projdiff_common::{ProjectSnapshot, SystemError};
use std::collections::BTreeMap;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Injectable abstraction for environment-dependent operations.
///
/// Resolving effective build settings requires invoking an external
/// toolchain; putting that behind a trait keeps the one comparator that
/// needs it testable and swappable. Failures must surface as typed errors,
/// never as an empty answer.
pub trait System: Send + Sync {
    /// Resolves the effective build settings for one target and
    /// configuration of the given project snapshot.
    fn resolve_settings(
        &self,
        project: &ProjectSnapshot,
        target: &str,
        configuration: &str,
    ) -> Result<BTreeMap<String, String>, SystemError>;
}

/// Production [`System`] implementation backed by an external resolver
/// command.
///
/// The command is invoked as
/// `<command> --project <name> --target <target> --configuration <config>`
/// and is expected to print one `KEY = VALUE` line per resolved setting.
/// Without a timeout the call blocks until the command exits; callers
/// running untrusted or slow resolvers should always set one.
pub struct DefaultSystem {
    command: Option<String>,
    timeout: Option<Duration>,
}

/// Environment variable consulted when no resolver command is given.
pub const RESOLVER_ENV: &str = "PROJDIFF_RESOLVER";

impl DefaultSystem {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            timeout: None,
        }
    }

    /// Reads the resolver command from [`RESOLVER_ENV`]; resolution fails
    /// with [`SystemError::NoResolver`] if the variable is unset.
    pub fn from_env() -> Self {
        Self {
            command: std::env::var(RESOLVER_ENV).ok(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn run_resolver(
        &self,
        command_line: &str,
        project: &str,
        target: &str,
        configuration: &str,
    ) -> Result<String, SystemError> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| SystemError::InvalidOutput("empty resolver command".to_string()))?;

        let mut command = Command::new(program);
        command
            .args(parts)
            .arg("--project")
            .arg(project)
            .arg("--target")
            .arg(target)
            .arg("--configuration")
            .arg(configuration)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Invoking settings resolver: {} ({target}/{configuration})", command_line);

        let mut child = command.spawn()?;

        let mut stdout_pipe = child.stdout.take().expect("stdout was piped");
        let mut stderr_pipe = child.stderr.take().expect("stderr was piped");
        let stdout_reader = std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = stdout_pipe.read_to_string(&mut buf);
            buf
        });
        let stderr_reader = std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = stderr_pipe.read_to_string(&mut buf);
            buf
        });

        let status = match self.timeout {
            None => child.wait()?,
            Some(timeout) => {
                let deadline = Instant::now() + timeout;
                loop {
                    if let Some(status) = child.try_wait()? {
                        break status;
                    }
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(SystemError::Timeout {
                            command: command_line.to_string(),
                            seconds: timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();

        if !status.success() {
            return Err(SystemError::CommandFailed {
                command: command_line.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout)
    }
}

impl Default for DefaultSystem {
    fn default() -> Self {
        Self::from_env()
    }
}

impl System for DefaultSystem {
    fn resolve_settings(
        &self,
        project: &ProjectSnapshot,
        target: &str,
        configuration: &str,
    ) -> Result<BTreeMap<String, String>, SystemError> {
        let command_line = self.command.as_deref().ok_or(SystemError::NoResolver)?;
        let output = self.run_resolver(command_line, &project.name, target, configuration)?;
        parse_settings_output(&output)
    }
}

/// Parses `KEY = VALUE` lines; other lines (headers, blank lines) are
/// skipped. Non-empty output that yields no settings at all is rejected.
pub fn parse_settings_output(output: &str) -> Result<BTreeMap<String, String>, SystemError> {
    let mut settings = BTreeMap::new();
    for line in output.lines() {
        let line = line.trim();
        if let Some((key, value)) = line.split_once(" = ") {
            let key = key.trim();
            if !key.is_empty() && !key.contains(' ') {
                settings.insert(key.to_string(), value.trim().to_string());
            }
        }
    }

    if settings.is_empty() && !output.trim().is_empty() {
        return Err(SystemError::InvalidOutput(
            "resolver produced no KEY = VALUE lines".to_string(),
        ));
    }

    Ok(settings)
}

/// Canned [`System`] implementation for tests and offline use.
///
/// Responses are keyed by (project, target, configuration); a missing entry
/// answers with [`SystemError::NotAvailable`] rather than an empty map.
#[derive(Debug, Clone, Default)]
pub struct StaticSystem {
    responses: BTreeMap<(String, String, String), BTreeMap<String, String>>,
}

impl StaticSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings<I, K, V>(
        mut self,
        project: &str,
        target: &str,
        configuration: &str,
        settings: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.responses.insert(
            (
                project.to_string(),
                target.to_string(),
                configuration.to_string(),
            ),
            settings
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }
}

impl System for StaticSystem {
    fn resolve_settings(
        &self,
        project: &ProjectSnapshot,
        target: &str,
        configuration: &str,
    ) -> Result<BTreeMap<String, String>, SystemError> {
        self.responses
            .get(&(
                project.name.clone(),
                target.to_string(),
                configuration.to_string(),
            ))
            .cloned()
            .ok_or_else(|| SystemError::NotAvailable {
                target: target.to_string(),
                configuration: configuration.to_string(),
            })
    }
}
