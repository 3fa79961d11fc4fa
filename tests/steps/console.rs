//! Step definitions for console input and what the console shows and sends

use crate::common::world::ConsoleWorld;
use cartline::console::models::RowActionKind;
use cucumber::gherkin::Step;
use cucumber::{then, when};
use serde_json::Value;
use tracing::info;

// === INPUT ===

#[when(regex = r"^I open the console on (\w+)$")]
async fn when_open_console(world: &mut ConsoleWorld, entity: String) {
    info!("Opening console on {}", entity);
    world.open_console(&entity).await;
}

#[when(regex = r#"^I enter "([^"]*)"$"#)]
async fn when_enter(world: &mut ConsoleWorld, line: String) {
    world.enter(&line).await;
}

#[when(regex = r#"^I enter "([^"]*)" and answer "([^"]*)"$"#)]
async fn when_enter_and_answer(world: &mut ConsoleWorld, line: String, answer: String) {
    world.input.push_line(answer);
    world.enter(&line).await;
}

// === SCREEN ===

#[then(regex = r#"^the screen shows "([^"]*)"$"#)]
async fn then_screen_shows(world: &mut ConsoleWorld, text: String) {
    let screen = world.screen();
    assert!(screen.contains(&text), "expected {text:?} on screen:\n{screen}");
}

#[then(regex = r#"^the screen does not show "([^"]*)"$"#)]
async fn then_screen_does_not_show(world: &mut ConsoleWorld, text: String) {
    let screen = world.screen();
    assert!(!screen.contains(&text), "unexpected {text:?} on screen:\n{screen}");
}

#[then(regex = r"^the table has (\d+) rows?$")]
async fn then_table_rows(world: &mut ConsoleWorld, rows: usize) {
    assert_eq!(world.app().active().table().len(), rows);
}

#[then(regex = r#"^row (\d+) is bound to record "([^"]*)"$"#)]
async fn then_row_bound(world: &mut ConsoleWorld, row: usize, id: String) {
    let active = world.app().active();
    assert_eq!(active.row_action_id(row, RowActionKind::Edit).as_deref(), Some(id.as_str()));
    assert_eq!(active.row_action_id(row, RowActionKind::Delete).as_deref(), Some(id.as_str()));
}

#[then(regex = r#"^the form "([^"]*)" is open$"#)]
async fn then_form_open(world: &mut ConsoleWorld, title: String) {
    let form = world.app().active().form().expect("a form should be open");
    assert_eq!(form.title(), title);
}

#[then("no form is open")]
async fn then_no_form(world: &mut ConsoleWorld) {
    assert!(!world.app().active().is_form_open());
}

#[then(regex = r#"^the form field "(\w+)" holds "([^"]*)"$"#)]
async fn then_form_field(world: &mut ConsoleWorld, field: String, value: String) {
    let form = world.app().active().form().expect("a form should be open");
    assert_eq!(form.value(&field), Some(value.as_str()));
}

#[then(regex = r#"^the status line reads "([^"]*)"$"#)]
async fn then_status_reads(world: &mut ConsoleWorld, message: String) {
    let status = world.app().active().status_line();
    assert!(!status.is_error(), "unexpected error: {:?}", status.status_message());
    assert_eq!(status.status_message(), Some(message.as_str()));
}

#[then(regex = r#"^the status line shows an error containing "([^"]*)"$"#)]
async fn then_status_error(world: &mut ConsoleWorld, text: String) {
    let status = world.app().active().status_line();
    assert!(status.is_error(), "expected an error, got {:?}", status.status_message());
    let message = status.status_message().unwrap_or_default();
    assert!(message.contains(&text), "{message:?} should contain {text:?}");
}

// === REQUESTS ===

#[then(regex = r"^the server received (\d+) (GET|POST|PUT|DELETE) requests?$")]
async fn then_received_count(world: &mut ConsoleWorld, count: usize, verb: String) {
    assert_eq!(world.received(&verb).await.len(), count);
}

#[then(regex = r#"^the last (GET|POST|PUT|DELETE) request went to "([^"]*)"$"#)]
async fn then_last_request_target(world: &mut ConsoleWorld, verb: String, target: String) {
    let requests = world.received(&verb).await;
    let last = requests.last().expect("at least one request");
    let actual = match last.url.query() {
        Some(query) => format!("{}?{}", last.url.path(), query),
        None => last.url.path().to_string(),
    };
    assert_eq!(actual, target);
}

#[then(regex = r"^the last (POST|PUT) request carried:$")]
async fn then_last_request_body(world: &mut ConsoleWorld, step: &Step, verb: String) {
    let expected: Value =
        serde_json::from_str(step.docstring.as_deref().expect("a JSON docstring").trim())
            .expect("valid JSON docstring");
    let requests = world.received(&verb).await;
    let last = requests.last().expect("at least one request");
    let actual: Value = serde_json::from_slice(&last.body).expect("a JSON request body");
    assert_eq!(actual, expected);

    // Field order follows the form
    let expected_keys: Vec<_> = expected.as_object().into_iter().flat_map(|o| o.keys()).collect();
    let actual_keys: Vec<_> = actual.as_object().into_iter().flat_map(|o| o.keys()).collect();
    assert_eq!(actual_keys, expected_keys);
}
