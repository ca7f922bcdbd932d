#![allow(deprecated)]
use cucumber::{then, when};
use predicates::prelude::*;
use serde_json::Value;

use crate::EditorWorld;
use crate::steps::server_steps::base_url;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `te` against the world's server with optional stdin.
/// Stores stdout, stderr, and exit code on the world.
async fn run_te(world: &mut EditorWorld, args: Vec<String>, stdin: Option<String>) {
    let api = base_url(world);
    // The server lives on this runtime; keep it free while the child runs.
    let output = tokio::task::spawn_blocking(move || {
        let mut cmd = assert_cmd::Command::cargo_bin("te").expect("te binary not found");
        cmd.env("TASKEDIT_API", &api).env("NO_COLOR", "1").args(&args);
        if let Some(input) = stdin {
            cmd.write_stdin(input);
        }
        cmd.output().expect("failed to run te")
    })
    .await
    .expect("te runner panicked");

    world.last_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    world.last_stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    world.last_exit_code = output.status.code().unwrap_or(-1);
}

/// Split a step's argument string on whitespace, honouring single quotes.
fn split_args(raw: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in raw.chars() {
        match c {
            '\'' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// Expand `<id>` to the current task's id.
fn expand(world: &EditorWorld, raw: &str) -> Vec<String> {
    let id = world.task_id.clone().unwrap_or_default();
    split_args(raw)
        .into_iter()
        .map(|a| a.replace("<id>", &id))
        .collect()
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when(expr = "I run te {string}")]
async fn i_run_te(world: &mut EditorWorld, raw: String) {
    let args = expand(world, &raw);
    run_te(world, args, None).await;
}

#[when(expr = "I run te {string} answering {string}")]
async fn i_run_te_answering(world: &mut EditorWorld, raw: String, answer: String) {
    let args = expand(world, &raw);
    run_te(world, args, Some(format!("{answer}\n"))).await;
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then(expr = "te exits with code {int}")]
async fn te_exits_with_code(world: &mut EditorWorld, expected: i32) {
    assert_eq!(
        world.last_exit_code, expected,
        "unexpected exit code; stdout:\n{}\nstderr:\n{}",
        world.last_stdout, world.last_stderr
    );
}

#[then(expr = "te stdout contains {string}")]
async fn te_stdout_contains(world: &mut EditorWorld, expected: String) {
    assert!(
        predicate::str::contains(expected.as_str()).eval(world.last_stdout.as_str()),
        "expected stdout to contain {expected:?}, but stdout was:\n{}",
        world.last_stdout
    );
}

#[then(expr = "te stdout does not contain {string}")]
async fn te_stdout_does_not_contain(world: &mut EditorWorld, unexpected: String) {
    assert!(
        predicate::str::contains(unexpected.as_str())
            .not()
            .eval(world.last_stdout.as_str()),
        "expected stdout not to contain {unexpected:?}, but stdout was:\n{}",
        world.last_stdout
    );
}

#[then(expr = "te stderr contains {string}")]
async fn te_stderr_contains(world: &mut EditorWorld, expected: String) {
    assert!(
        predicate::str::contains(expected.as_str()).eval(world.last_stderr.as_str()),
        "expected stderr to contain {expected:?}, but stderr was:\n{}",
        world.last_stderr
    );
}

#[then(expr = "te stdout is a task record with {string} {string}")]
async fn te_stdout_is_a_task_record(world: &mut EditorWorld, field: String, expected: String) {
    let json: Value = serde_json::from_str(&world.last_stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not valid JSON: {e}\nstdout: {}",
            world.last_stdout
        )
    });
    let actual = json[&field].as_str().map(str::to_string);
    assert_eq!(actual.as_deref(), Some(expected.as_str()), "record was {json}");
}
