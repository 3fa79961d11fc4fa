use cartline::config::{ConsoleProfile, IdAddressing};
use cartline::console::{
    AppController, HttpTransport, MockLineSource, MockRenderStream, Transport,
};
use cucumber::World;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Base URL nothing listens on
const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

pub const API_PREFIX: &str = "/api/v1";

type ConsoleApp = AppController<MockLineSource, MockRenderStream>;

/// Console under test, wired to a wiremock catalog API
#[derive(World)]
#[world(init = Self::new)]
pub struct ConsoleWorld {
    /// Mock REST collaborator, started by the background step
    pub mock_server: Option<MockServer>,

    /// Point the console at a closed port instead of the mock server
    pub unreachable: bool,

    pub profile: ConsoleProfile,

    pub app: Option<ConsoleApp>,

    /// Shared handle to the app's scripted input
    pub input: MockLineSource,

    /// Shared handle to the app's captured output
    pub output: MockRenderStream,
}

impl std::fmt::Debug for ConsoleWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleWorld")
            .field("server", &self.mock_server.as_ref().map(MockServer::uri))
            .field("unreachable", &self.unreachable)
            .field("profile", &self.profile)
            .field("app_started", &self.app.is_some())
            .finish()
    }
}

impl ConsoleWorld {
    pub fn new() -> Self {
        Self {
            mock_server: None,
            unreachable: false,
            profile: ConsoleProfile::blank("features"),
            app: None,
            input: MockLineSource::default(),
            output: MockRenderStream::with_size((160, 48)),
        }
    }

    pub async fn start_server(&mut self) {
        self.mock_server = Some(MockServer::start().await);
    }

    pub fn server(&self) -> &MockServer {
        self.mock_server
            .as_ref()
            .expect("the catalog API must be running")
    }

    pub fn app(&self) -> &ConsoleApp {
        self.app.as_ref().expect("the console must be open")
    }

    /// Mount the collection list and one single-record GET per row
    pub async fn mount_list(&self, entity: &str, records: Vec<Value>) {
        let server = self.server();
        for record in &records {
            if let Some(id) = record.get("id").and_then(Value::as_str) {
                Mock::given(method("GET"))
                    .and(path(format!("{API_PREFIX}/{entity}/{id}")))
                    .respond_with(ResponseTemplate::new(200).set_body_json(record))
                    .mount(server)
                    .await;
            }
        }

        let mut envelope = Map::new();
        envelope.insert(entity.to_string(), Value::Array(records));
        Mock::given(method("GET"))
            .and(path(format!("{API_PREFIX}/{entity}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Object(envelope)))
            .mount(server)
            .await;
    }

    /// Answer mutations on `entity` with `status`, by query or path id
    pub async fn mount_mutation(&self, entity: &str, verb: &str, status: u16) {
        let template = match status {
            204 => ResponseTemplate::new(204),
            200..=299 => ResponseTemplate::new(status)
                .set_body_json(json!({"message": "Record processed successfully"})),
            _ => ResponseTemplate::new(status).set_body_json(json!({"detail": "Rejected by server"})),
        };
        Mock::given(method(verb))
            .and(path_regex(format!("^{API_PREFIX}/{entity}(/[^/]+)?$")))
            .respond_with(template)
            .mount(self.server())
            .await;
    }

    /// Replace every mock with a raw body for `verb` on `entity`
    pub async fn mount_raw(&self, entity: &str, verb: &str, body: &str) {
        let server = self.server();
        server.reset().await;
        Mock::given(method(verb))
            .and(path_regex(format!("^{API_PREFIX}/{entity}(/[^/]+)?$")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    pub fn use_path_addressing(&mut self) {
        self.profile = self.profile.clone().with_id_addressing(IdAddressing::Path);
    }

    pub fn disable_delete_confirmation(&mut self) {
        self.profile = self.profile.clone().with_confirm_delete(false);
    }

    /// Start the console on `entity` and load it
    pub async fn open_console(&mut self, entity: &str) {
        let base_url = match (&self.mock_server, self.unreachable) {
            (Some(server), false) => server.uri(),
            _ => UNREACHABLE_URL.to_string(),
        };
        self.profile = self.profile.clone().with_base_url(base_url);

        let transport: Arc<dyn Transport> =
            Arc::new(HttpTransport::new(self.profile.base_url()).expect("valid base url"));
        let app = AppController::with_io_streams(
            &self.profile,
            "features/profile",
            entity,
            transport,
            self.input.clone(),
            self.output.clone(),
        )
        .expect("console should start");
        self.app = Some(app);
        self.enter("reload").await;
    }

    /// Process one console line and redraw
    pub async fn enter(&mut self, line: &str) {
        self.output.clear();
        let app = self.app.as_mut().expect("the console must be open");
        app.process_line(line).await;
        app.render().expect("render should succeed");
    }

    pub fn screen(&self) -> String {
        self.output.get_buffer_string()
    }

    /// Requests received with the given HTTP method, oldest first
    pub async fn received(&self, verb: &str) -> Vec<Request> {
        match &self.mock_server {
            Some(server) => server
                .received_requests()
                .await
                .unwrap_or_default()
                .into_iter()
                .filter(|request| request.method.as_str() == verb)
                .collect(),
            None => Vec::new(),
        }
    }
}

impl Default for ConsoleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a table cell into JSON, keeping `id` a string
pub fn cell_value(column: &str, cell: &str) -> Value {
    if column == "id" || cell.is_empty() {
        return if cell.is_empty() {
            Value::Null
        } else {
            Value::String(cell.to_string())
        };
    }
    match cell.parse::<i64>() {
        Ok(number) => json!(number),
        Err(_) => Value::String(cell.to_string()),
    }
}
