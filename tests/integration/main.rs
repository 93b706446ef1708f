//! Integration tests for restore-gradle-cache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    const EXACT_KEY: &str = r#"{{ .OS }}-{{ .Arch }}-gradle-cache-{{ checksum "**/*.gradle*" "**/gradle-wrapper.properties" "**/gradle.properties" "**/libs.versions.toml" }}"#;

    fn step() -> Command {
        let mut cmd = cargo_bin_cmd!("restore-gradle-cache");
        cmd.env_remove("verbose")
            .env_remove("retries")
            .env_remove("RESTORE_CACHE_CLIENT")
            .env_remove("RESTORE_CACHE_LOG");
        cmd
    }

    #[test]
    fn help_displays() {
        step()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Restore Gradle Cache"));
    }

    #[test]
    fn version_displays() {
        step()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("restore-gradle-cache"));
    }

    #[test]
    fn keys_lists_templates() {
        step()
            .arg("keys")
            .assert()
            .success()
            .stdout(format!("{}\n{{{{ .OS }}}}-{{{{ .Arch }}}}-gradle-cache-\n", EXACT_KEY));
    }

    #[test]
    fn keys_ignores_missing_inputs() {
        step().arg("keys").assert().success();
    }

    #[test]
    fn missing_inputs_fail_in_configuration() {
        step()
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse inputs"))
            .stderr(predicate::str::contains("configuration"))
            .stdout(predicate::str::contains("Cache keys:").not());
    }

    #[test]
    fn malformed_retries_fail() {
        step()
            .env("verbose", "true")
            .env("retries", "many")
            .assert()
            .failure()
            .stderr(predicate::str::contains("`many` is not a non-negative integer"))
            .stderr(predicate::str::contains("Hint: Set `retries` to a whole number"));
    }

    #[test]
    fn missing_cache_client_fails_in_restore() {
        step()
            .args(["run", "--cache-client", "restore-gradle-cache-missing-client"])
            .env("verbose", "false")
            .env("retries", "3")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Cache keys:"))
            .stderr(predicate::str::contains("failed to start cache client"))
            .stderr(predicate::str::contains("restore"));
    }
}

#[cfg(unix)]
mod client_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn step() -> Command {
        let mut cmd = cargo_bin_cmd!("restore-gradle-cache");
        cmd.env_remove("verbose")
            .env_remove("retries")
            .env_remove("RESTORE_CACHE_CLIENT")
            .env_remove("RESTORE_CACHE_LOG");
        cmd
    }

    /// Write an executable shell script that records each invocation
    fn fake_client(dir: &Path, exit_code: i32) -> PathBuf {
        let path = dir.join("cache-client");
        let record = dir.join("calls.log");
        let script = format!(
            "#!/bin/sh\nprintf '%s %s\\n' \"$1\" \"$CACHE_RESTORE_REQUEST\" >> '{}'\necho 'client says hi'\nexit {}\n",
            record.display(),
            exit_code
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn calls(dir: &Path) -> Vec<String> {
        fs::read_to_string(dir.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn restores_through_client() {
        let dir = TempDir::new().unwrap();
        let client = fake_client(dir.path(), 0);

        step()
            .env("verbose", "true")
            .env("retries", "2")
            .env("RESTORE_CACHE_CLIENT", &client)
            .assert()
            .success()
            .stdout(predicate::str::contains("- verbose: true"))
            .stdout(predicate::str::contains("- retries: 2"))
            .stdout(predicate::str::contains("Cache keys:"))
            .stdout(predicate::str::contains("{{ .OS }}-{{ .Arch }}-gradle-cache-\n"))
            .stdout(predicate::str::contains("client says hi"));

        let calls = calls(dir.path());
        assert_eq!(calls.len(), 1);
        let (verb, payload) = calls[0].split_once(' ').unwrap();
        assert_eq!(verb, "restore");
        let request: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(request["StepId"], "restore-gradle-cache");
        assert_eq!(request["Verbose"], true);
        assert_eq!(request["NumFullRetries"], 2);
        assert_eq!(request["Keys"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn quiet_run_hides_client_output() {
        let dir = TempDir::new().unwrap();
        let client = fake_client(dir.path(), 0);

        step()
            .arg("--cache-client")
            .arg(&client)
            .env("verbose", "false")
            .env("retries", "0")
            .assert()
            .success()
            .stdout(predicate::str::contains("client says hi").not());
    }

    #[test]
    fn failing_client_is_retried() {
        let dir = TempDir::new().unwrap();
        let client = fake_client(dir.path(), 4);

        step()
            .arg("--cache-client")
            .arg(&client)
            .env("verbose", "false")
            .env("retries", "1")
            .assert()
            .failure()
            .stderr(predicate::str::contains("after 2 attempt(s)"))
            .stderr(predicate::str::contains("exit code 4"))
            .stderr(predicate::str::contains("Failed phase: restore"))
            .stdout(predicate::str::contains("Cache restore did not finish (restore phase)"));

        assert_eq!(calls(dir.path()).len(), 2);
    }

    #[test]
    fn verbose_raises_tracing_filter_to_debug() {
        let dir = TempDir::new().unwrap();
        let client = fake_client(dir.path(), 0);

        step()
            .arg("--cache-client")
            .arg(&client)
            .env("verbose", "true")
            .env("retries", "0")
            .assert()
            .success()
            .stderr(predicate::str::contains("Delegating to restorer"))
            .stderr(predicate::str::contains("Step finished"));
    }

    #[test]
    fn quiet_run_keeps_base_tracing_filter() {
        let dir = TempDir::new().unwrap();
        let client = fake_client(dir.path(), 0);

        step()
            .arg("--cache-client")
            .arg(&client)
            .env("verbose", "false")
            .env("retries", "0")
            .assert()
            .success()
            .stderr(predicate::str::contains("Delegating to restorer").not());
    }
}
