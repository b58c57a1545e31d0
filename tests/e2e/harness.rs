use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Stand-in for the renderer under test.
///
/// Appends its arguments to `calls.log` beside itself. A script whose body
/// starts with `exit` runs it. Otherwise it prints the fixture when one is
/// given, or the script body.
const FAKE_SUBJECT: &str = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/calls.log"
script="$2"
if [ ! -f "$script" ]; then
  echo "script not found: $script" >&2
  exit 1
fi
body=$(cat "$script")
case "$body" in
  exit*) $body ;;
esac
if [ "$3" = "--json-file" ]; then
  cat "$4"
else
  printf '%s\n' "$body"
fi
"#;

pub struct TestContext {
    pub bin_path: PathBuf,
}

/// A scratch project directory laid out the way the harness expects
pub struct TestEnv {
    _dir: TempDir,
    pub root: PathBuf,
    pub scripts: PathBuf,
    pub data: PathBuf,
}

pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestContext {
    pub fn new() -> Result<Self, String> {
        let bin_path = std::env::var_os("CARGO_BIN_EXE_j2check")
            .map(PathBuf::from)
            .ok_or_else(|| "CARGO_BIN_EXE_j2check not set".to_string())?;
        Ok(Self { bin_path })
    }

    pub fn create_env(&self, name: &str) -> Result<TestEnv, String> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("j2check-e2e-{}-", name))
            .tempdir()
            .map_err(|e| format!("Failed to create temp dir: {}", e))?;
        let root = dir.path().to_path_buf();
        let scripts = root.join("scripts").join("structured_tests");
        let data = root.join("scripts").join("structured_data");
        ensure_dir(&scripts)?;
        ensure_dir(&data)?;

        Ok(TestEnv {
            _dir: dir,
            root,
            scripts,
            data,
        })
    }

    pub fn run_j2check(
        &self,
        env: &TestEnv,
        args: &[&str],
    ) -> Result<CommandOutput, String> {
        if std::env::var("J2CHECK_E2E_LOG").is_ok() {
            eprintln!("command: j2check {:?} (cwd: {})", args, env.root.display());
        }
        let output = Command::new(&self.bin_path)
            .args(args)
            .current_dir(&env.root)
            .env_remove("RUST_LOG")
            .output()
            .map_err(|e| format!("Failed to run command: {}", e))?;

        Ok(CommandOutput::from_output(output))
    }
}

impl TestEnv {
    /// Install the fake subject at `rel` under the project root and return its path
    pub fn install_subject(&self, rel: &str) -> Result<PathBuf, String> {
        let path = self.root.join(rel);
        write_file(&path, FAKE_SUBJECT)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .map_err(|e| format!("Failed to chmod subject: {}", e))?;
        Ok(path)
    }

    pub fn add_script(&self, name: &str, body: &str) -> Result<(), String> {
        write_file(&self.scripts.join(name), body)
    }

    pub fn add_fixture(&self, name: &str, body: &str) -> Result<(), String> {
        write_file(&self.data.join(name), body)
    }

    /// Argument lines recorded by the fake subject installed at `subject`
    pub fn calls(&self, subject: &Path) -> Result<Vec<String>, String> {
        let log = subject
            .parent()
            .ok_or_else(|| "subject has no parent".to_string())?
            .join("calls.log");
        if !log.exists() {
            return Ok(Vec::new());
        }
        Ok(read_file(&log)?.lines().map(str::to_string).collect())
    }
}

impl CommandOutput {
    pub fn from_output(output: Output) -> Self {
        Self {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// The harness exit status: 0 all passed, 1 test failures, 2 fatal
    pub fn expect_status(&self, expected: i32) -> Result<(), String> {
        if self.status == expected {
            return Ok(());
        }
        Err(format!(
            "j2check exited {} (wanted {})\n--- report ---\n{}--- log ---\n{}",
            self.status, expected, self.stdout, self.stderr
        ))
    }

    /// The report (stdout) mentions `needle`
    pub fn expect_stdout(&self, needle: &str) -> Result<(), String> {
        check_stream("report", &self.stdout, needle, true)
    }

    /// The report (stdout) does not mention `needle`
    pub fn expect_no_stdout(&self, needle: &str) -> Result<(), String> {
        check_stream("report", &self.stdout, needle, false)
    }

    /// The log or error output (stderr) mentions `needle`
    pub fn expect_stderr(&self, needle: &str) -> Result<(), String> {
        check_stream("log", &self.stderr, needle, true)
    }
}

fn check_stream(label: &str, text: &str, needle: &str, present: bool) -> Result<(), String> {
    if text.contains(needle) == present {
        return Ok(());
    }
    let verb = if present { "missing" } else { "unexpected" };
    Err(format!("{} {:?} in {}:\n{}", verb, needle, label, text))
}

pub fn write_file(path: &Path, content: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create parent dirs: {}", e))?;
    }
    fs::write(path, content).map_err(|e| format!("Failed to write file: {}", e))
}

pub fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))
}

pub fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path).map_err(|e| format!("Failed to create dir: {}", e))
}

pub fn parse_json(output: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(output).map_err(|e| format!("Invalid JSON output: {}", e))
}
