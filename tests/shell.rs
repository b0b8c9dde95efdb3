//! End-to-end tests driving the `brisk` binary over pipes.

use std::env;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Output, Stdio};

fn brisk() -> Command {
    Command::new(env!("CARGO_BIN_EXE_brisk"))
}

fn work_dir() -> PathBuf {
    env::temp_dir().canonicalize().unwrap()
}

fn run_script(script: &str) -> Output {
    let mut child = brisk()
        .arg("--quiet")
        .current_dir(work_dir())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start brisk");

    // Dropping stdin closes the pipe so a missing `exit` ends in EOF
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_exit() {
    let output = run_script("exit\n");

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).is_empty());
}

#[test]
fn test_exit_ignores_arguments() {
    let output = run_script("exit 42 extra\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_blank_lines_are_ignored() {
    let output = run_script("\n   \n\t\nexit\n");

    assert!(output.status.success());
    assert!(stderr(&output).is_empty());
}

#[test]
fn test_cd_too_many_arguments() {
    let output = run_script("cd a b\npwd\nexit\n");

    assert!(output.status.success());
    assert!(stderr(&output).contains("too many arguments"));
    assert_eq!(stdout(&output).trim(), work_dir().to_str().unwrap());
}

#[test]
fn test_cd_nonexistent() {
    let output = run_script("cd nonexistent_path_xyz\npwd\nexit\n");

    assert!(output.status.success());
    assert!(stderr(&output).contains("nonexistent_path_xyz"));
    assert_eq!(stdout(&output).trim(), work_dir().to_str().unwrap());
}

#[test]
fn test_cd_changes_directory() {
    let output = run_script("cd /\npwd\nexit\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "/");
}

#[test]
fn test_cd_home_forms_agree() {
    let bare = run_script("cd\npwd\nexit\n");
    let tilde = run_script("cd ~\npwd\nexit\n");

    assert!(bare.status.success());
    assert!(tilde.status.success());
    assert_eq!(stdout(&bare), stdout(&tilde));
    assert_eq!(stderr(&bare), stderr(&tilde));
}

#[test]
fn test_external_command_output() {
    let output = run_script("echo hello   world\nexit\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "hello world\n");
}

#[test]
fn test_missing_program_does_not_stop_shell() {
    let output = run_script("brisk_no_such_program_xyz\necho alive\nexit\n");

    assert!(output.status.success());
    assert!(stderr(&output).contains("brisk_no_such_program_xyz"));
    assert_eq!(stdout(&output), "alive\n");
}

#[test]
fn test_failing_program_is_not_reported_as_shell_error() {
    let output = run_script("false\nexit\n");

    assert!(output.status.success());
    assert!(stderr(&output).is_empty());
}

#[test]
fn test_many_commands() {
    let mut script = "true\n".repeat(200);
    script.push_str("exit\n");

    let output = run_script(&script);
    assert!(output.status.success());
}

#[test]
fn test_end_of_input_fails() {
    let output = run_script("true\n");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("end of input"));
}

#[test]
fn test_prompt_shows_directory() {
    let output = brisk()
        .current_dir("/")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            child.stdin.take().unwrap().write_all(b"exit\n")?;
            child.wait_with_output()
        })
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "[/]> ");
}

#[test]
fn test_flags() {
    let help = brisk().arg("--help").output().unwrap();
    assert!(help.status.success());
    assert!(stdout(&help).contains("Usage: brisk"));

    let version = brisk().arg("-v").output().unwrap();
    assert!(version.status.success());
    assert!(stdout(&version).starts_with("brisk "));

    let unknown = brisk().arg("--bogus").output().unwrap();
    assert!(!unknown.status.success());
}

/// Reads from the child's stdout until `count` prompts have been printed.
fn wait_for_prompts(out: &mut ChildStdout, seen: &mut String, count: usize) {
    let mut byte = [0u8; 1];
    while seen.matches("]> ").count() < count {
        let n = out.read(&mut byte).unwrap();
        assert_eq!(n, 1, "brisk closed stdout early: {:?}", seen);
        seen.push(byte[0] as char);
    }
}

fn interrupt_while_reading(signal: libc::c_int) {
    let mut child: Child = brisk()
        .current_dir("/")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let mut out = child.stdout.take().unwrap();
    let mut seen = String::new();

    // The first prompt is printed after the handlers are installed
    wait_for_prompts(&mut out, &mut seen, 1);
    assert_eq!(unsafe { libc::kill(child.id() as libc::pid_t, signal) }, 0);
    wait_for_prompts(&mut out, &mut seen, 2);

    child.stdin.take().unwrap().write_all(b"exit\n").unwrap();
    let status = child.wait().unwrap();

    assert!(status.success());
    assert_eq!(seen, "[/]> \n[/]> ");
}

#[test]
fn test_sigint_while_reading_gives_fresh_prompt() {
    interrupt_while_reading(libc::SIGINT);
}

#[test]
fn test_sigquit_while_reading_gives_fresh_prompt() {
    interrupt_while_reading(libc::SIGQUIT);
}
