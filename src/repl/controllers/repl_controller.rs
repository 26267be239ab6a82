//! # REPL Controller
//!
//! Drives an [`AppController`] from a line source: reads a command, applies
//! it, and redraws the page when the model reports a visible change.
//! Dialog forms are filled in field by field on the following lines.

use anyhow::Result;

use super::app_controller::{AppController, ControllerError};
use crate::repl::commands::{self, CardRef, Command, HELP};
use crate::repl::io::LineSource;
use crate::repl::models::Modal;
use crate::repl::services::{AuthApi, ContentApi, KeyValueStore};
use crate::repl::views::components::CONFIRM_TITLE;
use crate::repl::views::ViewRenderer;

pub const PROMPT: &str = "> ";

/// A form line holding only this aborts the form
pub const CANCEL: &str = ".";

const NOT_SIGNED_IN: &str = "сначала войдите: login <email> <пароль>";

/// Outcome of reading one form field
enum Field {
    Value(String),
    Cancelled,
    /// Input ran out mid-form
    Eof,
}

pub struct ReplController<A, C, S, L, R>
where
    A: AuthApi,
    C: ContentApi,
    S: KeyValueStore,
    L: LineSource,
    R: ViewRenderer,
{
    app: AppController<A, C, S>,
    input: L,
    renderer: R,
    should_quit: bool,
}

impl<A, C, S, L, R> ReplController<A, C, S, L, R>
where
    A: AuthApi,
    C: ContentApi,
    S: KeyValueStore,
    L: LineSource,
    R: ViewRenderer,
{
    pub fn new(app: AppController<A, C, S>, input: L, renderer: R) -> Self {
        Self {
            app,
            input,
            renderer,
            should_quit: false,
        }
    }

    pub fn app(&self) -> &AppController<A, C, S> {
        &self.app
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn input_mut(&mut self) -> &mut L {
        &mut self.input
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main loop: restore the stored session, then read commands until
    /// `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        self.start().await?;
        while self.step().await? {}
        Ok(())
    }

    /// Resume the stored session if there is one and draw the first page
    pub async fn start(&mut self) -> Result<()> {
        // A bad stored token is not the user's concern; stay on sign-in
        if let Err(e) = self.app.restore_session().await {
            tracing::warn!("Session not restored: {}", e);
        }
        self.redraw()
    }

    /// Prompt for and handle one command line
    ///
    /// Returns `false` once the user quits or input runs out.
    pub async fn step(&mut self) -> Result<bool> {
        if self.should_quit {
            return Ok(false);
        }
        self.renderer.render_prompt(PROMPT)?;
        let Some(line) = self.input.next_line().await? else {
            tracing::debug!("End of input");
            self.should_quit = true;
            return Ok(false);
        };
        self.handle_line(&line).await?;
        Ok(!self.should_quit)
    }

    /// Parse and apply one command line
    pub async fn handle_line(&mut self, line: &str) -> Result<()> {
        match commands::parse(line) {
            Ok(Some(command)) => {
                tracing::debug!("Command: {:?}", command);
                self.execute(command).await?;
            }
            Ok(None) => {}
            Err(e) => self.renderer.render_error(&e.to_string())?,
        }

        if !self.should_quit {
            self.redraw_if_changed()?;
        }
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        if command.needs_session() && !self.app.session().is_logged_in() {
            return self.renderer.render_error(NOT_SIGNED_IN);
        }

        match command {
            Command::Login { email, password } => {
                let outcome = self.app.login(&email, &password).await;
                self.report(outcome)
            }
            Command::Register { email, password } => {
                match self.app.register(&email, &password).await {
                    // The fail tooltip already says it
                    Ok(_) | Err(ControllerError::Api(_)) => Ok(()),
                    Err(e) => self.report(Err(e)),
                }
            }
            Command::Logout => {
                let outcome = self.app.sign_out();
                self.report(outcome)
            }
            Command::Go(route) => {
                self.app.navigate(route);
                Ok(())
            }
            Command::Feed => self.render(),
            Command::Help => self.renderer.render_message(HELP),
            Command::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Command::Close => {
                if self.app.modals().is_open(Modal::SuccessTooltip) {
                    self.app.close_success_tooltip();
                } else {
                    self.app.close_all();
                }
                Ok(())
            }
            Command::Like(card) => {
                let outcome = match self.card_id(&card) {
                    Ok(id) => self.app.like(&id).await,
                    Err(e) => Err(e),
                };
                self.report(outcome)
            }
            Command::Unlike(card) => {
                let outcome = match self.card_id(&card) {
                    Ok(id) => self.app.dislike(&id).await,
                    Err(e) => Err(e),
                };
                self.report(outcome)
            }
            Command::Toggle(card) => {
                let outcome = match self.card_id(&card) {
                    Ok(id) => self.app.toggle_like(&id).await,
                    Err(e) => Err(e),
                };
                self.report(outcome)
            }
            Command::Open(card) => {
                let outcome = self
                    .card_id(&card)
                    .and_then(|id| self.app.select_card(&id));
                self.report(outcome)
            }
            Command::Delete(card) => match self.card_id(&card) {
                Ok(id) => self.delete_with_confirmation(&id).await,
                Err(e) => self.report(Err(e)),
            },
            Command::Add => self.add_place_form().await,
            Command::Profile => self.edit_profile_form().await,
            Command::Avatar => self.edit_avatar_form().await,
        }
    }

    /// Show a failed operation to the user; the loop carries on
    fn report(&mut self, outcome: Result<(), ControllerError>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e) => self.renderer.render_error(&e.to_string()),
        }
    }

    fn card_id(&self, card: &CardRef) -> Result<String, ControllerError> {
        card.resolve(self.app.cards())
            .map(|c| c.id.clone())
            .ok_or_else(|| {
                let shown = match card {
                    CardRef::Position(n) => n.to_string(),
                    CardRef::Id(id) => id.clone(),
                };
                ControllerError::UnknownCard(shown)
            })
    }

    async fn delete_with_confirmation(&mut self, card_id: &str) -> Result<()> {
        if let Err(e) = self.app.request_delete(card_id) {
            return self.report(Err(e));
        }
        self.redraw()?;

        let confirmed = match self.read_field(&format!("{CONFIRM_TITLE} [да/нет]: ")).await? {
            Field::Value(answer) => is_yes(&answer),
            Field::Cancelled | Field::Eof => false,
        };
        if confirmed {
            let outcome = self.app.confirm_delete().await;
            self.report(outcome)
        } else {
            self.app.close_all();
            Ok(())
        }
    }

    async fn add_place_form(&mut self) -> Result<()> {
        self.app.open_add_place();
        self.redraw()?;

        let Field::Value(name) = self.read_field("Название: ").await? else {
            self.app.close_all();
            return Ok(());
        };
        let Field::Value(link) = self.read_field("Ссылка на картинку: ").await? else {
            self.app.close_all();
            return Ok(());
        };
        let outcome = self.app.create_card(&name, &link).await;
        self.report(outcome)
    }

    /// Blank answers keep the current values
    async fn edit_profile_form(&mut self) -> Result<()> {
        self.app.open_edit_profile();
        self.redraw()?;

        let current = self.app.current_user().clone();
        let Field::Value(name) = self.read_field(&format!("Имя [{}]: ", current.name)).await?
        else {
            self.app.close_all();
            return Ok(());
        };
        let Field::Value(about) = self
            .read_field(&format!("О себе [{}]: ", current.about))
            .await?
        else {
            self.app.close_all();
            return Ok(());
        };

        let name = or_current(name, &current.name);
        let about = or_current(about, &current.about);
        let outcome = self.app.update_profile(&name, &about).await;
        self.report(outcome)
    }

    async fn edit_avatar_form(&mut self) -> Result<()> {
        self.app.open_edit_avatar();
        self.redraw()?;

        let Field::Value(avatar) = self.read_field("Ссылка на аватар: ").await? else {
            self.app.close_all();
            return Ok(());
        };
        let outcome = self.app.update_avatar(&avatar).await;
        self.report(outcome)
    }

    async fn read_field(&mut self, prompt: &str) -> Result<Field> {
        self.renderer.render_prompt(prompt)?;
        let field = match self.input.next_line().await? {
            Some(line) if line.trim() == CANCEL => Field::Cancelled,
            Some(line) => Field::Value(line.trim().to_string()),
            None => {
                self.should_quit = true;
                Field::Eof
            }
        };
        Ok(field)
    }

    /// Render now, dropping whatever events led here
    fn redraw(&mut self) -> Result<()> {
        self.app.collect_pending_events();
        self.render()
    }

    fn redraw_if_changed(&mut self) -> Result<()> {
        let events = self.app.collect_pending_events();
        if events.iter().any(|e| e.requires_redraw()) {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let ctx = self.app.view_context();
        self.renderer.render_full(&ctx)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.to_lowercase().as_str(),
        "да" | "д" | "y" | "yes"
    )
}

fn or_current(value: String, current: &str) -> String {
    if value.is_empty() {
        current.to_string()
    } else {
        value
    }
}
