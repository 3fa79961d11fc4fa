//! Step definitions that shape the mock catalog API

use crate::common::world::{cell_value, ConsoleWorld};
use cucumber::gherkin::Step;
use cucumber::{given, when};
use serde_json::{Map, Value};
use tracing::debug;

#[given("the catalog API is running")]
async fn given_api_running(world: &mut ConsoleWorld) {
    world.start_server().await;
}

#[given("the catalog API is unreachable")]
async fn given_api_unreachable(world: &mut ConsoleWorld) {
    world.unreachable = true;
}

#[given(regex = r"^the server lists (\w+):$")]
async fn given_server_lists(world: &mut ConsoleWorld, step: &Step, entity: String) {
    let table = step.table.as_ref().expect("a table of records");
    let (header, rows) = table.rows.split_first().expect("a header row");
    let records: Vec<Value> = rows
        .iter()
        .map(|row| {
            let record: Map<String, Value> = header
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.clone(), cell_value(column, cell)))
                .collect();
            Value::Object(record)
        })
        .collect();
    debug!("Mounting {} {}", records.len(), entity);
    world.mount_list(&entity, records).await;
}

#[given(regex = r"^the server lists no (\w+)$")]
async fn given_server_lists_nothing(world: &mut ConsoleWorld, entity: String) {
    world.mount_list(&entity, Vec::new()).await;
}

#[given(regex = r"^the server answers (\w+) (POST|PUT|DELETE) with status (\d+)$")]
async fn given_server_answers(world: &mut ConsoleWorld, entity: String, verb: String, status: u16) {
    world.mount_mutation(&entity, &verb, status).await;
}

#[when(regex = r#"^the server starts answering (\w+) (GET|POST|PUT|DELETE) with "([^"]*)"$"#)]
async fn when_server_answers_raw(world: &mut ConsoleWorld, entity: String, verb: String, body: String) {
    world.mount_raw(&entity, &verb, &body).await;
}

#[given("the profile addresses records by path")]
async fn given_path_addressing(world: &mut ConsoleWorld) {
    world.use_path_addressing();
}

#[given("delete confirmation is disabled")]
async fn given_no_delete_confirmation(world: &mut ConsoleWorld) {
    world.disable_delete_confirmation();
}
