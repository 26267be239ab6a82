use anyhow::Result;
use cucumber::World;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mesto::repl::models::TOKEN_KEY;
use mesto::repl::{
    AppController, FileStore, HttpAuthClient, HttpContentClient, KeyValueStore, MockLineSource,
    ReplController, SimpleEventBus, TextRenderer,
};

pub const EMAIL: &str = "jacques@example.com";
pub const PASSWORD: &str = "calypso";
pub const TOKEN: &str = "jwt-jacques";
pub const NEW_EMAIL: &str = "new@example.com";

pub type TestRepl = ReplController<
    HttpAuthClient,
    HttpContentClient,
    FileStore,
    MockLineSource,
    TextRenderer<Vec<u8>>,
>;

pub fn user_json(name: &str, about: &str, avatar: &str) -> Value {
    json!({ "_id": "me", "name": name, "about": about, "avatar": avatar })
}

pub fn default_user_json() -> Value {
    user_json(
        "Жак-Ив Кусто",
        "Исследователь океана",
        "https://example.com/cousteau.jpg",
    )
}

pub fn card_json(id: &str, name: &str, owner: &str, likes: &[&str]) -> Value {
    let likes: Vec<Value> = likes.iter().map(|id| json!({ "_id": id })).collect();
    json!({
        "_id": id,
        "name": name,
        "link": format!("https://example.com/{id}.jpg"),
        "owner": { "_id": owner },
        "likes": likes,
        "createdAt": "2024-03-01T10:00:00.000Z"
    })
}

/// Feed served by the content server: own unliked, foreign liked by
/// someone else, own liked by someone else
pub fn default_cards_json() -> Value {
    json!([
        card_json("c0", "Архыз", "me", &[]),
        card_json("c1", "Байкал", "other", &["other"]),
        card_json("c2", "Камчатка", "me", &["other"]),
    ])
}

/// Headless client wired to mock auth and content servers
#[derive(World)]
#[world(init = Self::new)]
pub struct MestoWorld {
    pub auth_server: Option<MockServer>,
    pub api_server: Option<MockServer>,

    /// Holds the token file for the scenario
    pub storage_dir: TempDir,

    pub repl: Option<TestRepl>,

    /// Output length before the last action, so steps can look at what the
    /// action printed
    pub output_mark: usize,
}

impl std::fmt::Debug for MestoWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MestoWorld")
            .field("storage_dir", &self.storage_dir.path())
            .field("started", &self.repl.is_some())
            .field("output_mark", &self.output_mark)
            .finish()
    }
}

impl MestoWorld {
    pub fn new() -> Self {
        Self {
            auth_server: None,
            api_server: None,
            storage_dir: TempDir::new().expect("Failed to create storage dir"),
            repl: None,
            output_mark: 0,
        }
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.storage_dir.path().join("storage.json"))
    }

    pub fn stored_token(&self) -> Option<String> {
        self.store().get(TOKEN_KEY).expect("Failed to read token file")
    }

    pub fn store_token(&self, token: &str) {
        self.store()
            .set(TOKEN_KEY, token)
            .expect("Failed to write token file");
    }

    /// Leave a truncated token file behind, as an interrupted write would
    pub fn truncate_token_file(&self) {
        std::fs::write(self.store().path(), r#"{"token": "half-writ"#)
            .expect("Failed to write token file");
    }

    pub fn auth_server(&self) -> &MockServer {
        self.auth_server.as_ref().expect("Auth server not running")
    }

    pub fn api_server(&self) -> &MockServer {
        self.api_server.as_ref().expect("Content server not running")
    }

    /// Start both servers with one known account and a three-card feed
    pub async fn setup_mock_servers(&mut self) -> Result<()> {
        let auth = MockServer::start().await;
        let api = MockServer::start().await;

        // --- auth server ---------------------------------------------------
        Mock::given(method("POST"))
            .and(path("/signin"))
            .and(body_partial_json(json!({ "email": EMAIL, "password": PASSWORD })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN })))
            .with_priority(1)
            .mount(&auth)
            .await;
        Mock::given(method("POST"))
            .and(path("/signin"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(10)
            .mount(&auth)
            .await;

        Mock::given(method("POST"))
            .and(path("/signup"))
            .and(body_partial_json(json!({ "email": NEW_EMAIL })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "data": { "_id": "u-new", "email": NEW_EMAIL } })),
            )
            .with_priority(1)
            .mount(&auth)
            .await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(ResponseTemplate::new(409))
            .with_priority(10)
            .mount(&auth)
            .await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "_id": "me", "email": EMAIL } })),
            )
            .with_priority(1)
            .mount(&auth)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(10)
            .mount(&auth)
            .await;

        // --- content server ------------------------------------------------
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(default_user_json()))
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .and(path("/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(default_cards_json()))
            .mount(&api)
            .await;
        Mock::given(method("PUT"))
            .and(path("/cards/c0/likes"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(card_json("c0", "Архыз", "me", &["me"])),
            )
            .mount(&api)
            .await;
        Mock::given(method("PUT"))
            .and(path("/cards/c1/likes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(card_json("c1", "Байкал", "other", &["other", "me"])),
            )
            .mount(&api)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/cards/c1/likes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(card_json("c1", "Байкал", "other", &["other"])),
            )
            .mount(&api)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/cards/c0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Пост удалён" })),
            )
            .mount(&api)
            .await;
        Mock::given(method("POST"))
            .and(path("/cards"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(card_json("n1", "Эльбрус", "me", &[])),
            )
            .mount(&api)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(
                "Жак",
                "Исследователь океана",
                "https://example.com/cousteau.jpg",
            )))
            .mount(&api)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/users/me/avatar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(
                "Жак-Ив Кусто",
                "Исследователь океана",
                "https://example.com/new.jpg",
            )))
            .mount(&api)
            .await;

        self.auth_server = Some(auth);
        self.api_server = Some(api);
        Ok(())
    }

    /// Make one content endpoint answer with `status` from now on
    pub async fn fail_content_endpoint(&self, http_method: &str, endpoint: &str, status: u16) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .with_priority(1)
            .mount(self.api_server())
            .await;
    }

    /// Build the client on the mock servers and run its start-up
    pub async fn start_app(&mut self) -> Result<()> {
        let auth = HttpAuthClient::new(self.auth_server().uri())?;
        let content = HttpContentClient::new(self.api_server().uri(), None)?;

        let mut app = AppController::new(auth, content, self.store());
        app.set_event_bus(Box::new(SimpleEventBus::new()));

        let renderer = TextRenderer::new(Vec::new(), false);
        let mut repl = ReplController::new(app, MockLineSource::default(), renderer);
        repl.start().await?;

        self.repl = Some(repl);
        self.output_mark = 0;
        Ok(())
    }

    pub fn repl(&self) -> &TestRepl {
        self.repl.as_ref().expect("Application not started")
    }

    pub fn repl_mut(&mut self) -> &mut TestRepl {
        self.repl.as_mut().expect("Application not started")
    }

    /// Feed lines to the prompt and process them all
    pub async fn type_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_mark = self.output().len();
        let repl = self.repl_mut();
        for line in lines {
            repl.input_mut().push_line(line);
        }
        while repl.input_mut().remaining() > 0 && repl.step().await? {}
        Ok(())
    }

    /// Everything printed since start-up
    pub fn output(&self) -> String {
        String::from_utf8_lossy(self.repl().renderer().writer()).to_string()
    }

    /// What the last action printed
    pub fn recent_output(&self) -> String {
        let output = self.output();
        output.get(self.output_mark..).unwrap_or_default().to_string()
    }

    pub async fn requests_to(server: &MockServer, http_method: &str, endpoint: &str) -> usize {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == endpoint)
            .count()
    }
}
