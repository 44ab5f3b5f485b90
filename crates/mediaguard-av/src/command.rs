//! Builder for executing external tool commands with timeout support.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use crate::{Error, Result};

/// Default command timeout: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// Arguments are kept as `OsString`s so file names reach the tool byte for
/// byte, including names that are not valid UTF-8.
///
/// # Example
///
/// ```no_run
/// use mediaguard_av::ToolCommand;
/// use std::path::PathBuf;
///
/// let output = ToolCommand::new(PathBuf::from("ffprobe"))
///     .args(["-v", "error", "-of", "json", "-show_streams"])
///     .arg("/path/to/video.mp4")
///     .execute()?;
/// println!("{}", output.stdout);
/// # Ok::<(), mediaguard_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl AsRef<OsStr>>) -> &mut Self {
        self.args
            .extend(iter.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// Set the maximum execution time. [`Duration::ZERO`] waits forever.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Execute the command from synchronous code.
    ///
    /// Runs [`execute_async`](Self::execute_async) on a current-thread
    /// runtime. When called from inside a tokio runtime, that runtime is
    /// left alone and the command runs on a scoped helper thread instead.
    pub fn execute(&self) -> Result<ToolOutput> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return std::thread::scope(|s| {
                s.spawn(|| self.block_on())
                    .join()
                    .unwrap_or_else(|_| {
                        Err(Error::tool_failed(self.program_name(), "runner thread panicked"))
                    })
            });
        }
        self.block_on()
    }

    fn block_on(&self) -> Result<ToolOutput> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.execute_async())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// The child is killed and reaped before any error other than a failed
    /// spawn or a non-zero exit is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program does not exist.
    /// - [`Error::Timeout`] if the process outlives the timeout.
    /// - [`Error::ToolFailed`] if the process exits with a non-zero status
    ///   (message includes stderr), cannot be spawned, or its output cannot
    ///   be read.
    pub async fn execute_async(&self) -> Result<ToolOutput> {
        let program_name = self.program_name();

        tracing::debug!(tool = %program_name, args = ?self.args, "running tool");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(program_name.clone())
                } else {
                    Error::tool_failed(program_name.clone(), format!("failed to spawn: {e}"))
                }
            })?;

        let result = if self.timeout.is_zero() {
            Ok(collect_output(&mut child).await)
        } else {
            tokio::time::timeout(self.timeout, collect_output(&mut child)).await
        };

        let (status, stdout, stderr) = match result {
            Ok(Ok(collected)) => collected,
            Ok(Err(e)) => {
                let _ = child.kill().await;
                return Err(Error::tool_failed(
                    program_name,
                    format!("I/O error waiting for process: {e}"),
                ));
            }
            Err(_elapsed) => {
                let _ = child.kill().await;
                return Err(Error::Timeout {
                    tool: program_name,
                    timeout: self.timeout,
                });
            }
        };

        let output = ToolOutput {
            status,
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
        };

        if !status.success() {
            return Err(Error::tool_failed(
                program_name,
                format!("exited with status {}: {}", status, output.stderr.trim()),
            ));
        }

        Ok(output)
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }
}

/// A file path as a tool argument.
///
/// Relative paths starting with `-` get a `./` prefix so the tool cannot
/// take them for an option.
pub fn path_arg(path: &Path) -> OsString {
    let leading_dash = path.as_os_str().as_encoded_bytes().first() == Some(&b'-');
    if path.is_relative() && leading_dash {
        Path::new(".").join(path).into_os_string()
    } else {
        path.as_os_str().to_os_string()
    }
}

async fn collect_output(child: &mut Child) -> std::io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    tokio::try_join!(child.wait(), read_pipe(stdout), read_pipe(stderr))
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
