use cucumber::{then, when};
use serde_json::Value;
use taskedit::render::{BAR_WIDTH, progress_bar, render_detail};
use taskedit::view::{DeleteOutcome, NoticeLevel, SubmitOutcome, ViewState};

use crate::EditorWorld;
use crate::steps::server_steps::{base_url, fetch_stored};
use crate::support::Editor;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn editor(world: &mut EditorWorld) -> &mut Editor {
    world
        .editor
        .as_mut()
        .expect("no editor open — add 'When I open the task in the editor'")
}

fn last_write(world: &mut EditorWorld) -> Value {
    editor(world)
        .view
        .api()
        .last_write()
        .expect("no write was sent")
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("I open the task in the editor")]
async fn i_open_the_task(world: &mut EditorWorld) {
    let id = world.task_id.clone().expect("no task created");
    let mut editor = Editor::new(&base_url(world), &id);
    editor.load().await;
    world.editor = Some(editor);
}

#[when(expr = "I open the task {string} in the editor")]
async fn i_open_the_task_by_id(world: &mut EditorWorld, id: String) {
    let mut editor = Editor::new(&base_url(world), &id);
    editor.load().await;
    world.editor = Some(editor);
}

#[when("I load the editor again")]
async fn i_load_again(world: &mut EditorWorld) {
    editor(world).view.load().await;
}

#[when(expr = "I set the {string} field to {string}")]
async fn i_set_the_field(world: &mut EditorWorld, field: String, value: String) {
    let result = editor(world).view.edit_field(&field, &value);
    world.last_edit = Some(result);
}

#[when("I submit the form")]
async fn i_submit_the_form(world: &mut EditorWorld) {
    let outcome = editor(world).view.submit().await;
    world.last_submit = Some(outcome);
}

#[when("I delete the task and confirm")]
async fn i_delete_and_confirm(world: &mut EditorWorld) {
    let ed = editor(world);
    ed.user.will_confirm(true);
    let outcome = ed.view.delete().await;
    world.last_delete = Some(outcome);
}

#[when("I delete the task and decline")]
async fn i_delete_and_decline(world: &mut EditorWorld) {
    let ed = editor(world);
    ed.user.will_confirm(false);
    let outcome = ed.view.delete().await;
    world.last_delete = Some(outcome);
}

// ---------------------------------------------------------------------------
// Then steps: view state and detail card
// ---------------------------------------------------------------------------

#[then(expr = "the editor is {string}")]
async fn the_editor_is(world: &mut EditorWorld, expected: String) {
    let state = editor(world).view.state();
    let actual = match state {
        ViewState::Loading => "loading",
        ViewState::Ready => "ready",
        ViewState::Deleted => "deleted",
    };
    assert_eq!(actual, expected, "unexpected view state {state:?}");
}

#[then(expr = "the detail {word} is {string}")]
async fn the_detail_field_is(world: &mut EditorWorld, field: String, expected: String) {
    let detail = editor(world).view.detail();
    let actual = match field.as_str() {
        "title" => detail.title,
        "description" => detail.description,
        "priority" => detail.priority.to_string(),
        "status" => detail.status.to_string(),
        "category" => detail.category,
        "recurring" => detail.recurring,
        "due-date" => detail.due_date,
        "attachment" => detail.attachment.unwrap_or_default(),
        other => panic!("unknown detail field {other:?}"),
    };
    assert_eq!(actual, expected, "detail {field} mismatch");
}

#[then(expr = "the detail progress is {word}")]
async fn the_detail_progress_is(world: &mut EditorWorld, expected: String) {
    assert_eq!(editor(world).view.detail().progress_text(), expected);
}

#[then("the detail has no attachment")]
async fn the_detail_has_no_attachment(world: &mut EditorWorld) {
    assert_eq!(editor(world).view.detail().attachment, None);
}

#[then(expr = "the progress bar is {int} of {int} cells")]
async fn the_progress_bar_is(world: &mut EditorWorld, filled: usize, width: usize) {
    assert_eq!(width, BAR_WIDTH, "bar width changed");
    let progress = editor(world).view.detail().progress_percent();
    let bar = progress_bar(progress, BAR_WIDTH);
    assert_eq!(bar.matches('#').count(), filled, "bar was {bar}");
}

#[then(expr = "the rendered card contains {string}")]
async fn the_rendered_card_contains(world: &mut EditorWorld, expected: String) {
    let card = render_detail(&editor(world).view.detail());
    assert!(
        card.contains(&expected),
        "expected card to contain {expected:?}, but card was:\n{card}"
    );
}

#[then(expr = "the form {word} is {string}")]
async fn the_form_field_is(world: &mut EditorWorld, field: String, expected: String) {
    let form = editor(world).view.form();
    let actual = match field.as_str() {
        "title" => form.title,
        "description" => form.description,
        "priority" => form.priority.to_string(),
        "status" => form.status.to_string(),
        "due-date" => form.due_date,
        other => panic!("unknown form field {other:?}"),
    };
    assert_eq!(actual, expected, "form {field} mismatch");
}

#[then(expr = "the task was {word} {int} time(s)")]
async fn the_task_was_called(world: &mut EditorWorld, verb: String, expected: usize) {
    let method = match verb.as_str() {
        "read" => "GET",
        "written" => "PUT",
        "deleted" => "DELETE",
        other => panic!("unknown verb {other:?}"),
    };
    let actual = editor(world).view.api().count(method);
    assert_eq!(actual, expected, "expected {expected} {method} call(s), got {actual}");
}

// ---------------------------------------------------------------------------
// Then steps: edits and writes
// ---------------------------------------------------------------------------

#[then("the edit is rejected")]
async fn the_edit_is_rejected(world: &mut EditorWorld) {
    let result = world.last_edit.as_ref().expect("no edit attempted");
    assert!(result.is_err(), "expected the edit to be rejected");
}

#[then("the draft still matches the loaded record")]
async fn the_draft_matches_loaded(world: &mut EditorWorld) {
    let ed = editor(world);
    let draft = serde_json::to_value(ed.view.draft()).expect("draft serializes");
    assert_eq!(draft, ed.loaded);
}

#[then(expr = "the submit outcome is {string}")]
async fn the_submit_outcome_is(world: &mut EditorWorld, expected: String) {
    let outcome = world.last_submit.as_ref().expect("nothing submitted");
    let actual = match outcome {
        SubmitOutcome::Updated => "updated",
        SubmitOutcome::Failed => "failed",
        SubmitOutcome::Invalid(_) => "invalid",
        SubmitOutcome::Unavailable => "unavailable",
    };
    assert_eq!(actual, expected, "unexpected submit outcome {outcome:?}");
}

#[then(expr = "the last write's {string} is {string}")]
async fn the_last_write_field_is(world: &mut EditorWorld, field: String, expected: String) {
    let write = last_write(world);
    let actual = write.get(&field).map(json_text);
    assert_eq!(actual.as_deref(), Some(expected.as_str()), "write was {write}");
}

/// Full-record semantics: every field other than `changed` is sent exactly
/// as it was loaded, and nothing is dropped.
#[then(expr = "the last write matches the loaded record except {string}")]
async fn the_last_write_matches_except(world: &mut EditorWorld, changed: String) {
    let write = last_write(world);
    let loaded = editor(world).loaded.clone();
    let (Some(write), Some(loaded)) = (write.as_object(), loaded.as_object()) else {
        panic!("write or loaded record is not an object");
    };
    let mut keys: Vec<&String> = write.keys().chain(loaded.keys()).collect();
    keys.sort();
    keys.dedup();
    for key in keys {
        if *key == changed {
            continue;
        }
        assert_eq!(write.get(key), loaded.get(key), "field {key:?} differs");
    }
}

#[then(expr = "the stored task's {string} is {string}")]
async fn the_stored_field_is(world: &mut EditorWorld, field: String, expected: String) {
    let id = world.task_id.clone().expect("no task created");
    let (status, body) = fetch_stored(world, &id).await;
    assert_eq!(status, 200, "stored task not found");
    let body = body.expect("stored task is not JSON");
    let actual = body.get(&field).map(json_text);
    assert_eq!(actual.as_deref(), Some(expected.as_str()), "stored task was {body}");
}

#[then("the stored task still exists")]
async fn the_stored_task_exists(world: &mut EditorWorld) {
    let id = world.task_id.clone().expect("no task created");
    let (status, _) = fetch_stored(world, &id).await;
    assert_eq!(status, 200);
}

#[then("the stored task is gone")]
async fn the_stored_task_is_gone(world: &mut EditorWorld) {
    let id = world.task_id.clone().expect("no task created");
    let (status, _) = fetch_stored(world, &id).await;
    assert_eq!(status, 404);
}

// ---------------------------------------------------------------------------
// Then steps: delete, notices, navigation
// ---------------------------------------------------------------------------

#[then(expr = "the delete outcome is {string}")]
async fn the_delete_outcome_is(world: &mut EditorWorld, expected: String) {
    let outcome = world.last_delete.expect("nothing deleted");
    let actual = match outcome {
        DeleteOutcome::Deleted => "deleted",
        DeleteOutcome::Cancelled => "cancelled",
        DeleteOutcome::Failed => "failed",
        DeleteOutcome::Unavailable => "unavailable",
    };
    assert_eq!(actual, expected);
}

#[then(expr = "I was asked {string}")]
async fn i_was_asked(world: &mut EditorWorld, prompt: String) {
    assert_eq!(editor(world).user.prompts(), vec![prompt]);
}

#[then(expr = "the success notice {string} was shown")]
async fn the_success_notice_was_shown(world: &mut EditorWorld, message: String) {
    let notices = editor(world).user.notices();
    assert!(
        notices
            .iter()
            .any(|n| n.level == NoticeLevel::Success && n.message == message),
        "notices were {notices:?}"
    );
}

#[then(expr = "the failure notice {string} was shown")]
async fn the_failure_notice_was_shown(world: &mut EditorWorld, message: String) {
    let notices = editor(world).user.notices();
    assert!(
        notices
            .iter()
            .any(|n| n.level == NoticeLevel::Failure && n.message == message),
        "notices were {notices:?}"
    );
}

#[then("no notices were shown")]
async fn no_notices_were_shown(world: &mut EditorWorld) {
    let notices = editor(world).user.notices();
    assert!(notices.is_empty(), "notices were {notices:?}");
}

#[then(expr = "the editor navigated to {string}")]
async fn the_editor_navigated_to(world: &mut EditorWorld, route: String) {
    assert_eq!(editor(world).user.routes(), vec![route]);
}

#[then("the editor did not navigate")]
async fn the_editor_did_not_navigate(world: &mut EditorWorld) {
    let routes = editor(world).user.routes();
    assert!(routes.is_empty(), "navigated to {routes:?}");
}
