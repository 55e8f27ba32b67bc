//! Shared testing harness for `schedrun` integration tests.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for `python`: hands the script to `/bin/sh`.
const STUB_INTERPRETER: &str = "#!/bin/sh\nexec /bin/sh \"$@\"\n";

/// Stand-in for `crontab` that keeps the table next to itself.
const STUB_CRONTAB: &str = r#"#!/bin/sh
TABLE="$(dirname "$0")/crontab.table"
case "$1" in
  -l)
    if [ -f "$TABLE" ]; then cat "$TABLE"; else echo "no crontab for tester" >&2; exit 1; fi
    ;;
  -)
    FAIL="$STUB_CRONTAB_FAIL"
    if [ -f "$TABLE.fail" ]; then FAIL="$(cat "$TABLE.fail")"; fi
    if [ -n "$FAIL" ]; then echo "crontab: installing new crontab failed" >&2; exit "$FAIL"; fi
    cat > "$TABLE"
    ;;
  *)
    echo "unsupported: $*" >&2; exit 2
    ;;
esac
"#;

/// Stand-in for `schtasks.exe`: one XML file per task under `schtasks.d/`.
const STUB_SCHTASKS: &str = r#"#!/bin/sh
BIN="$(dirname "$0")"
DIR="$BIN/schtasks.d"
mkdir -p "$DIR"
op=""; name=""; sc=""; day=""; st=""; tr=""
while [ $# -gt 0 ]; do
  case "$1" in
    /Create|/Query|/Delete)
      if [ -n "$op" ]; then echo "ERROR: Invalid syntax." >&2; exit 1; fi
      op="$1" ;;
    /TN) shift; name="$1" ;;
    /SC) shift; sc="$1" ;;
    /D) shift; day="$1" ;;
    /ST) shift; st="$1" ;;
    /TR) shift; tr="$1" ;;
    /F|/XML) ;;
    *) echo "ERROR: Invalid argument/option - '$1'." >&2; exit 1 ;;
  esac
  shift
done
FILE="$DIR/$name.xml"
case "$op" in
  /Create)
    if [ -f "$BIN/schtasks.fail" ]; then
      echo "ERROR: Access is denied." >&2; exit "$(cat "$BIN/schtasks.fail")"
    fi
    if [ "$sc" = WEEKLY ]; then
      case "$day" in
        MON) d=Monday ;; TUE) d=Tuesday ;; WED) d=Wednesday ;; THU) d=Thursday ;;
        FRI) d=Friday ;; SAT) d=Saturday ;; SUN) d=Sunday ;;
        *) echo "ERROR: Invalid day - '$day'." >&2; exit 1 ;;
      esac
      trigger="<ScheduleByWeek><DaysOfWeek><$d /></DaysOfWeek></ScheduleByWeek>"
    else
      trigger="<ScheduleByDay><DaysInterval>1</DaysInterval></ScheduleByDay>"
    fi
    {
      printf '%s\n' "<Task>"
      printf '%s\n' "<StartBoundary>2026-01-01T$st:00</StartBoundary>"
      printf '%s\n' "$trigger"
      printf '%s\n' "<Command>$tr</Command>"
      printf '%s\n' "</Task>"
    } > "$FILE"
    echo "SUCCESS: The scheduled task \"$name\" has successfully been created."
    ;;
  /Query|/Delete)
    if [ ! -f "$FILE" ]; then
      echo "ERROR: The system cannot find the file specified." >&2; exit 1
    fi
    if [ "$op" = /Query ]; then cat "$FILE"; else rm "$FILE"; echo "SUCCESS"; fi
    ;;
  *)
    echo "ERROR: Invalid syntax." >&2; exit 1
    ;;
esac
"#;

/// Testing harness providing an isolated project for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    project: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment. The project path contains a space.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let project = root.path().join("shop export");
        fs::create_dir_all(&project).expect("Failed to create test project directory");
        Self { root, project }
    }

    /// Project root used for CLI invocations.
    pub(crate) fn project(&self) -> &Path {
        &self.project
    }

    /// Directory outside the project, for checking cwd independence.
    pub(crate) fn outside(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `schedrun` binary from the project root.
    pub(crate) fn cli(&self) -> Command {
        self.cli_in(self.project())
    }

    /// Build a command for invoking the compiled `schedrun` binary within a custom directory.
    pub(crate) fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("schedrun").expect("Failed to locate schedrun binary");
        cmd.current_dir(dir.as_ref())
            .env_remove("SCHEDRUN_PROJECT_ROOT")
            .env_remove("SCHEDRUN_CONFIG")
            .env_remove("STUB_CRONTAB_FAIL");
        cmd
    }

    /// Write `schedrun.toml` at the project root.
    pub(crate) fn write_config(&self, content: &str) {
        fs::write(self.project.join("schedrun.toml"), content).expect("Failed to write config");
    }

    /// Write a job script (shell code, run through the stub interpreter).
    pub(crate) fn write_job(&self, name: &str, body: &str) {
        fs::write(self.project.join(name), body).expect("Failed to write job script");
    }

    /// Install `.venv/bin/python` as a shell-backed stub.
    pub(crate) fn install_venv(&self) -> PathBuf {
        let path = self.project.join(".venv/bin/python");
        write_executable(&path, STUB_INTERPRETER);
        path
    }

    /// Install a stub `crontab` and return its path.
    pub(crate) fn install_crontab(&self) -> PathBuf {
        let path = self.root.path().join("bin/crontab");
        write_executable(&path, STUB_CRONTAB);
        path
    }

    /// Configure the project to use the stub `crontab`, plus extra `[schedule]` keys.
    pub(crate) fn use_stub_crontab(&self, schedule_keys: &str) -> PathBuf {
        let crontab = self.install_crontab();
        self.write_config(&format!(
            "[schedule]\nscheduler_program = \"{}\"\n{}",
            crontab.display(),
            schedule_keys
        ));
        crontab
    }

    /// Contents of the stub crontab table.
    pub(crate) fn crontab_table(&self) -> String {
        fs::read_to_string(self.root.path().join("bin/crontab.table")).unwrap_or_default()
    }

    /// Seed the stub crontab table.
    pub(crate) fn seed_crontab_table(&self, content: &str) {
        fs::write(self.root.path().join("bin/crontab.table"), content)
            .expect("Failed to seed crontab table");
    }

    /// Make the stub `crontab` reject every install with `exit_code`.
    pub(crate) fn fail_crontab_install(&self, exit_code: i32) {
        fs::write(self.root.path().join("bin/crontab.table.fail"), exit_code.to_string())
            .expect("Failed to write crontab failure marker");
    }

    /// Install a stub `schtasks` and return its path.
    pub(crate) fn install_schtasks(&self) -> PathBuf {
        let path = self.root.path().join("bin/schtasks");
        write_executable(&path, STUB_SCHTASKS);
        path
    }

    /// Make the stub `schtasks` reject every `/Create` with `exit_code`.
    pub(crate) fn fail_schtasks_create(&self, exit_code: i32) {
        fs::write(self.root.path().join("bin/schtasks.fail"), exit_code.to_string())
            .expect("Failed to write schtasks failure marker");
    }

    /// Number of tasks held by the stub `schtasks`.
    pub(crate) fn schtasks_task_count(&self) -> usize {
        fs::read_dir(self.root.path().join("bin/schtasks.d"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Path to the default log file.
    pub(crate) fn log_path(&self) -> PathBuf {
        self.project.join("logs/runner.log")
    }

    /// Contents of the default log file.
    pub(crate) fn read_log(&self) -> String {
        fs::read_to_string(self.log_path()).expect("Failed to read log file")
    }
}

fn write_executable(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
