//! Step definitions for start-up, sign-in, sign-up and sign-out
//!
//! Also holds the generic input and output steps used by every feature.

use crate::common::world::{MestoWorld, TOKEN};
use cucumber::{given, then, when};
use mesto::repl::models::Route;
use tracing::info;

// === SETUP ===

#[given("the Mesto servers are running")]
async fn given_servers_running(world: &mut MestoWorld) {
    world
        .setup_mock_servers()
        .await
        .expect("Failed to start mock servers");
}

#[given("a valid token is stored")]
async fn given_valid_token(world: &mut MestoWorld) {
    world.store_token(TOKEN);
}

#[given(expr = "the token {string} is stored")]
async fn given_token_stored(world: &mut MestoWorld, token: String) {
    world.store_token(&token);
}

#[given("the token file is truncated")]
async fn given_token_file_truncated(world: &mut MestoWorld) {
    world.truncate_token_file();
}

#[given("the client is started")]
async fn given_client_started(world: &mut MestoWorld) {
    world.start_app().await.expect("Failed to start client");
}

#[when("the client starts")]
async fn when_client_starts(world: &mut MestoWorld) {
    info!("Starting client");
    world.start_app().await.expect("Failed to start client");
}

#[given("I am signed in")]
async fn given_signed_in(world: &mut MestoWorld) {
    world.store_token(TOKEN);
    world.start_app().await.expect("Failed to start client");
    assert!(world.repl().app().session().is_logged_in());
}

// === INPUT ===

#[given(expr = "I have typed {string}")]
async fn given_typed_line(world: &mut MestoWorld, line: String) {
    world.type_lines([line]).await.expect("Failed to handle input");
}

#[when(expr = "I type {string}")]
async fn when_type_line(world: &mut MestoWorld, line: String) {
    world.type_lines([line]).await.expect("Failed to handle input");
}

#[when("I type:")]
async fn when_type_lines(world: &mut MestoWorld, step: &cucumber::gherkin::Step) {
    let docstring = step.docstring.clone().unwrap_or_default();
    let lines: Vec<String> = docstring
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    world.type_lines(lines).await.expect("Failed to handle input");
}

// === OUTPUT ===

#[then(expr = "the screen should show {string}")]
async fn then_screen_shows(world: &mut MestoWorld, text: String) {
    let output = world.recent_output();
    assert!(
        output.contains(&text),
        "Expected {text:?} in output:\n{output}"
    );
}

#[then(expr = "the screen should not show {string}")]
async fn then_screen_not_shows(world: &mut MestoWorld, text: String) {
    let output = world.recent_output();
    assert!(
        !output.contains(&text),
        "Did not expect {text:?} in output:\n{output}"
    );
}

// === SESSION STATE ===

#[then(expr = "I should be on the {string} page")]
async fn then_on_page(world: &mut MestoWorld, page: String) {
    let expected: Route = page.parse().expect("Unknown route in feature");
    assert_eq!(world.repl().app().current_route(), expected);
}

#[then(expr = "I should be signed in as {string}")]
async fn then_signed_in_as(world: &mut MestoWorld, email: String) {
    let session = world.repl().app().session();
    assert!(session.is_logged_in());
    assert_eq!(session.email(), email);
}

#[then("I should be signed out")]
async fn then_signed_out(world: &mut MestoWorld) {
    let app = world.repl().app();
    assert!(!app.session().is_logged_in());
    assert_eq!(app.session().email(), "");
    assert!(app.cards().is_empty());
}

#[then(expr = "the stored token should be {string}")]
async fn then_stored_token(world: &mut MestoWorld, token: String) {
    assert_eq!(world.stored_token().as_deref(), Some(token.as_str()));
}

#[then("no token should be stored")]
async fn then_no_token(world: &mut MestoWorld) {
    assert_eq!(world.stored_token(), None);
}

// === SERVER TRAFFIC ===

#[then(expr = "the auth server should have received {int} {word} request(s) to {string}")]
async fn then_auth_requests(
    world: &mut MestoWorld,
    count: usize,
    http_method: String,
    endpoint: String,
) {
    let seen = MestoWorld::requests_to(world.auth_server(), &http_method, &endpoint).await;
    assert_eq!(seen, count, "{http_method} {endpoint} on auth server");
}

#[then(expr = "the content server should have received {int} {word} request(s) to {string}")]
async fn then_content_requests(
    world: &mut MestoWorld,
    count: usize,
    http_method: String,
    endpoint: String,
) {
    let seen = MestoWorld::requests_to(world.api_server(), &http_method, &endpoint).await;
    assert_eq!(seen, count, "{http_method} {endpoint} on content server");
}
