// src/handlers/repository.rs
use reqwest::Method;
use tracing::{debug, error, info, warn};

use super::modal::build_request;
use super::Console;
use crate::error::{ConsoleError, SubmitError};
use crate::models::{
    DeleteRequest, Effect, Operation, Outcome, Phase, Settled, ID_FIELD, REPOSITORY_NAME_FIELD,
};
use crate::services::{ApiRequest, ApiResponse, Navigator, Transport};
use crate::ui::{Selector, UiSurface, DATA_ID, REPOSITORY_SECTION_ID};

impl<T: Transport, N: Navigator> Console<T, N> {
    /// POSTs the modal's fields to the collection endpoint, then reloads.
    pub async fn create_repository<S: UiSurface + ?Sized>(
        &self,
        surface: &S,
    ) -> Result<Settled, ConsoleError> {
        let operation = Operation::CreateRepository;
        debug!("{}: {:?}", operation, Phase::BuildingRequest);

        let request = build_request(surface);
        let body = serde_json::to_value(&request)?;

        let sent = self
            .send(operation, Method::POST, self.config().collection_path(), body)
            .await;
        Ok(self.settle_with_reload(operation, sent))
    }

    /// PUTs the modal's fields plus the page's repository id to the member
    /// endpoint named by the form, then reloads.
    pub async fn update_repository<S: UiSurface + ?Sized>(
        &self,
        surface: &S,
    ) -> Result<Settled, ConsoleError> {
        let operation = Operation::UpdateRepository;
        debug!("{}: {:?}", operation, Phase::BuildingRequest);

        let mut request = build_request(surface);
        let id = repository_id(surface)?;
        request.insert(ID_FIELD, id);

        let name = request
            .get(REPOSITORY_NAME_FIELD)
            .map(str::to_string)
            .ok_or_else(|| ConsoleError::MissingField(REPOSITORY_NAME_FIELD.to_string()))?;
        let body = serde_json::to_value(&request)?;

        let sent = self
            .send(operation, Method::PUT, self.config().member_path(&name), body)
            .await;
        Ok(self.settle_with_reload(operation, sent))
    }

    /// DELETEs the named repository and follows the server's Location on success.
    pub async fn delete_repository(&self, id: &str, name: &str) -> Result<Settled, ConsoleError> {
        let operation = Operation::DeleteRepository;
        debug!("{}: {:?}", operation, Phase::BuildingRequest);

        let body = serde_json::to_value(DeleteRequest { id: id.to_string() })?;
        let sent = self
            .send(operation, Method::DELETE, self.config().member_path(name), body)
            .await;

        let settled = match sent {
            Ok(response) if response.is_success() || response.is_redirect() => {
                match response.location {
                    Some(location) => {
                        info!("Deleted repository {}", name);
                        self.navigator().navigate(&location);
                        Settled {
                            operation,
                            outcome: Outcome::Succeeded,
                            effect: Effect::Navigate(location),
                        }
                    }
                    None => {
                        error!("Error deleting repository {}: {}", name, SubmitError::MissingLocation);
                        failed(operation, SubmitError::MissingLocation, Effect::None)
                    }
                }
            }
            Ok(response) => {
                let err = SubmitError::Rejected { status: response.status };
                error!("Error deleting repository {}: {}", name, err);
                failed(operation, err, Effect::None)
            }
            Err(err) => {
                error!("Error deleting repository {}: {}", name, err);
                failed(operation, err, Effect::None)
            }
        };

        debug!("{}: {:?}", operation, settled.outcome.phase());
        Ok(settled)
    }

    async fn send(
        &self,
        operation: Operation,
        method: Method,
        path: String,
        body: serde_json::Value,
    ) -> Result<ApiResponse, SubmitError> {
        let request = ApiRequest { method, path, body };
        debug!("{}: {:?} {} {}", operation, Phase::Sent, request.method, request.path);
        self.transport.send(request).await
    }

    /// Create and update reload whenever a response arrives, whatever its status.
    fn settle_with_reload(&self, operation: Operation, sent: Result<ApiResponse, SubmitError>) -> Settled {
        let settled = match sent {
            Ok(response) if response.is_success() => {
                info!("{} succeeded with status {}", operation, response.status);
                self.navigator().reload();
                Settled {
                    operation,
                    outcome: Outcome::Succeeded,
                    effect: Effect::Reload,
                }
            }
            Ok(response) => {
                let err = SubmitError::Rejected { status: response.status };
                error!("Failed to {}: {}", operation, err);
                self.navigator().reload();
                failed(operation, err, Effect::Reload)
            }
            Err(err) => {
                error!("Failed to {}: {}", operation, err);
                failed(operation, err, Effect::None)
            }
        };

        debug!("{}: {:?}", operation, settled.outcome.phase());
        settled
    }
}

fn failed(operation: Operation, err: SubmitError, effect: Effect) -> Settled {
    Settled {
        operation,
        outcome: Outcome::Failed(err),
        effect,
    }
}

fn repository_id<S: UiSurface + ?Sized>(surface: &S) -> Result<String, ConsoleError> {
    let missing = || ConsoleError::MissingAttribute {
        selector: Selector::Id(REPOSITORY_SECTION_ID).to_string(),
        attribute: DATA_ID.to_string(),
    };

    let section = surface.query(Selector::Id(REPOSITORY_SECTION_ID)).ok_or_else(missing)?;
    let id = surface.attribute(section, DATA_ID).ok_or_else(missing)?;
    if id.is_empty() {
        warn!("#{} carries an empty {}", REPOSITORY_SECTION_ID, DATA_ID);
    }
    Ok(id)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::{HeadlessNavigator, HttpTransport, Navigation};
    use crate::ui::{Page, FORM_GROUP_CLASS};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log lines for the duration of a test.
    #[derive(Clone, Default)]
    pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl LogCapture {
        pub(crate) fn install(&self) -> tracing::subscriber::DefaultGuard {
            let subscriber = tracing_subscriber::fmt()
                .with_writer(self.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::DEBUG)
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }

        pub(crate) fn has_error(&self, message: &str) -> bool {
            self.contents()
                .lines()
                .any(|line| line.contains("ERROR") && line.contains(message))
        }
    }

    impl std::io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogCapture {
        type Writer = LogCapture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Transport double that records requests and replays a canned result.
    pub(crate) struct RecordingTransport {
        reply: Result<ApiResponse, SubmitError>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl RecordingTransport {
        pub(crate) fn ok(status: u16) -> Self {
            Self::replying(Ok(ApiResponse { status, location: None }))
        }

        pub(crate) fn replying(reply: Result<ApiResponse, SubmitError>) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SubmitError> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn console(transport: RecordingTransport) -> Console<RecordingTransport, HeadlessNavigator> {
        Console::new(Config::default(), transport, HeadlessNavigator::new())
    }

    fn repository_page(id: Option<&str>) -> Page {
        let mut page = Page::new();
        let section = page.element("section").id(REPOSITORY_SECTION_ID).finish();
        if let Some(id) = id {
            page.set_attribute(section, DATA_ID, id);
        }
        let group = page.element("div").class(FORM_GROUP_CLASS).child_of(section).finish();
        page.element("input").id("repository_name").value("repo1").child_of(group).finish();
        page.element("input")
            .id("repository_description")
            .value("First repository")
            .child_of(group)
            .finish();
        page
    }

    #[tokio::test]
    async fn test_create_posts_form_state() {
        let console = console(RecordingTransport::ok(201));
        let mut page = repository_page(None);
        let group = page.query(Selector::Class(FORM_GROUP_CLASS)).unwrap();
        page.element("select").id("repository_gitignore").value("python").child_of(group).finish();

        let settled = console.create_repository(&page).await.unwrap();

        let requests = console.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/repositories");
        assert_eq!(
            requests[0].body,
            serde_json::json!({
                "repository_name": "repo1",
                "repository_description": "First repository",
                "repository_gitignore": "python",
            })
        );
        assert_eq!(settled.outcome, Outcome::Succeeded);
        assert_eq!(console.navigator().history(), vec![Navigation::Reload]);
    }

    #[tokio::test]
    async fn test_create_success_logs_no_error() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let console = console(RecordingTransport::ok(201));

        console.create_repository(&repository_page(None)).await.unwrap();

        assert!(!logs.contents().contains("ERROR"));
        assert!(logs.contents().contains("create repository succeeded with status 201"));
    }

    #[tokio::test]
    async fn test_create_reloads_even_when_rejected() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let console = console(RecordingTransport::ok(500));
        let settled = console.create_repository(&repository_page(None)).await.unwrap();

        assert_eq!(settled.outcome, Outcome::Failed(SubmitError::Rejected { status: 500 }));
        assert_eq!(settled.effect, Effect::Reload);
        assert_eq!(console.navigator().history(), vec![Navigation::Reload]);
        assert!(logs.has_error("Failed to create repository: server rejected request with status 500"));
    }

    #[tokio::test]
    async fn test_create_network_failure_does_not_reload() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let console = console(RecordingTransport::replying(Err(SubmitError::Network(
            "connection refused".to_string(),
        ))));
        let settled = console.create_repository(&repository_page(None)).await.unwrap();

        assert!(matches!(settled.outcome, Outcome::Failed(SubmitError::Network(_))));
        assert_eq!(settled.effect, Effect::None);
        assert!(console.navigator().history().is_empty());
        assert!(logs.has_error("Failed to create repository: network error: connection refused"));
    }

    #[tokio::test]
    async fn test_update_puts_with_page_id() {
        let console = console(RecordingTransport::ok(204));
        let settled = console.update_repository(&repository_page(Some("7d9f"))).await.unwrap();

        let requests = console.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/repositories/repo1");
        assert_eq!(
            requests[0].body,
            serde_json::json!({
                "id": "7d9f",
                "repository_name": "repo1",
                "repository_description": "First repository",
            })
        );
        assert_eq!(settled.effect, Effect::Reload);
        assert_eq!(console.navigator().history(), vec![Navigation::Reload]);
    }

    #[tokio::test]
    async fn test_update_rejected_logs_and_reloads() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let console = console(RecordingTransport::ok(404));
        let settled = console.update_repository(&repository_page(Some("7d9f"))).await.unwrap();

        assert_eq!(settled.outcome, Outcome::Failed(SubmitError::Rejected { status: 404 }));
        assert_eq!(console.navigator().history(), vec![Navigation::Reload]);
        assert!(logs.has_error("Failed to update repository: server rejected request with status 404"));
    }

    #[tokio::test]
    async fn test_update_requires_page_id() {
        let console = console(RecordingTransport::ok(204));
        let err = console.update_repository(&repository_page(None)).await.unwrap_err();

        assert!(matches!(err, ConsoleError::MissingAttribute { .. }));
        assert!(console.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_requires_name_field() {
        let console = console(RecordingTransport::ok(204));
        let mut page = Page::new();
        page.element("section").id(REPOSITORY_SECTION_ID).attr(DATA_ID, "7d9f").finish();

        let err = console.update_repository(&page).await.unwrap_err();
        assert!(matches!(err, ConsoleError::MissingField(ref f) if f == REPOSITORY_NAME_FIELD));
        assert!(console.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_delete_navigates_to_location() {
        let console = console(RecordingTransport::replying(Ok(ApiResponse {
            status: 200,
            location: Some("/repositories".to_string()),
        })));

        let settled = console.delete_repository("42", "repo1").await.unwrap();

        let requests = console.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].path, "/repositories/repo1");
        assert_eq!(requests[0].body, serde_json::json!({"id": "42"}));
        assert_eq!(settled.effect, Effect::Navigate("/repositories".to_string()));
        assert_eq!(
            console.navigator().history(),
            vec![Navigation::Assign("/repositories".to_string())]
        );
    }

    #[tokio::test]
    async fn test_delete_rejected_does_not_navigate() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let console = console(RecordingTransport::replying(Ok(ApiResponse {
            status: 500,
            location: Some("/repositories".to_string()),
        })));

        let settled = console.delete_repository("42", "repo1").await.unwrap();
        assert_eq!(settled.outcome, Outcome::Failed(SubmitError::Rejected { status: 500 }));
        assert_eq!(settled.effect, Effect::None);
        assert!(console.navigator().history().is_empty());
        assert!(logs.has_error("Error deleting repository repo1: server rejected request with status 500"));
    }

    #[tokio::test]
    async fn test_delete_without_location_does_not_navigate() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let console = console(RecordingTransport::ok(204));
        let settled = console.delete_repository("42", "repo1").await.unwrap();

        assert_eq!(settled.outcome, Outcome::Failed(SubmitError::MissingLocation));
        assert!(console.navigator().history().is_empty());
        assert!(logs.has_error("Error deleting repository repo1"));
    }

    #[tokio::test]
    async fn test_delete_network_failure_does_not_navigate() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let console = console(RecordingTransport::replying(Err(SubmitError::Network(
            "reset".to_string(),
        ))));
        let settled = console.delete_repository("42", "repo1").await.unwrap();

        assert!(!settled.outcome.is_success());
        assert!(console.navigator().history().is_empty());
        assert!(logs.has_error("Error deleting repository repo1: network error: reset"));
    }

    #[tokio::test]
    async fn test_overlapping_submissions_are_independent() {
        let console = console(RecordingTransport::ok(201));
        let page = repository_page(None);

        let (first, second) = tokio::join!(console.create_repository(&page), console.create_repository(&page));
        assert!(first.unwrap().outcome.is_success());
        assert!(second.unwrap().outcome.is_success());
        assert_eq!(console.transport().requests().len(), 2);
        assert_eq!(console.navigator().history().len(), 2);
    }

    mod against_server {
        use super::*;
        use axum::{
            extract::Path,
            http::{header, StatusCode},
            response::IntoResponse,
            routing::{delete, post},
            Json, Router,
        };
        use tokio::net::TcpListener;
        use url::Url;

        async fn spawn_console_server() -> Url {
            let router = Router::new()
                .route(
                    "/repositories",
                    post(|Json(body): Json<serde_json::Value>| async move {
                        if body.get("repository_name").is_some() {
                            StatusCode::CREATED
                        } else {
                            StatusCode::UNPROCESSABLE_ENTITY
                        }
                    }),
                )
                .route(
                    "/repositories/:name",
                    delete(|Path(name): Path<String>, Json(body): Json<serde_json::Value>| async move {
                        if name == "repo1" && body["id"] == "42" {
                            (StatusCode::SEE_OTHER, [(header::LOCATION, "/repositories")]).into_response()
                        } else {
                            StatusCode::INTERNAL_SERVER_ERROR.into_response()
                        }
                    }),
                );

            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            Url::parse(&format!("http://{}", addr)).unwrap()
        }

        async fn http_console() -> Console<HttpTransport, HeadlessNavigator> {
            let url = spawn_console_server().await;
            let config = Config::new(url.as_str(), "/repositories").unwrap();
            let transport = HttpTransport::from_config(&config).unwrap();
            Console::new(config, transport, HeadlessNavigator::new())
        }

        #[tokio::test]
        async fn test_create_round_trip() {
            let console = http_console().await;
            let settled = console.create_repository(&repository_page(None)).await.unwrap();

            assert_eq!(settled.outcome, Outcome::Succeeded);
            assert_eq!(console.navigator().history(), vec![Navigation::Reload]);
        }

        #[tokio::test]
        async fn test_delete_follows_server_location() {
            let console = http_console().await;
            let settled = console.delete_repository("42", "repo1").await.unwrap();

            assert_eq!(settled.effect, Effect::Navigate("/repositories".to_string()));
        }

        #[tokio::test]
        async fn test_delete_server_error() {
            let console = http_console().await;
            let settled = console.delete_repository("99", "repo1").await.unwrap();

            assert_eq!(settled.outcome, Outcome::Failed(SubmitError::Rejected { status: 500 }));
            assert!(console.navigator().history().is_empty());
        }
    }
}
