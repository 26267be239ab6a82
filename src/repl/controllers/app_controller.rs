//! # Application Controller
//!
//! The root controller owns every piece of client state (session, current
//! user, card feed, dialogs and route) and is the only place that talks to
//! the auth server, the content server and the token storage.
//!
//! Operations take `&mut self`, so at most one request is in flight per
//! controller and responses are applied in the order they were issued.

use thiserror::Error;

use crate::repl::events::{EventBus, ModelEvent};
use crate::repl::forms::{self, FormError};
use crate::repl::models::{
    prepend_card, remove_card, replace_card, Card, CurrentUser, Modal, ModalState, Route,
    Session, TOKEN_KEY,
};
use crate::repl::services::{
    ApiError, AuthApi, AuthUser, ContentApi, KeyValueStore, StorageError,
};
use crate::repl::views::ViewContext;

/// Type alias for event bus option to reduce complexity
type EventBusOption = Option<Box<dyn EventBus>>;

/// Why a controller operation did not take effect
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Signed in, but the profile or feed could not be loaded
    #[error("не удалось загрузить профиль и карточки: {0}")]
    Bootstrap(#[source] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("карточка '{0}' не найдена")]
    UnknownCard(String),

    #[error("можно удалять только свои карточки")]
    NotOwner,

    #[error("нет карточки, ожидающей удаления")]
    NothingToDelete,
}

/// Root controller of the client
pub struct AppController<A: AuthApi, C: ContentApi, S: KeyValueStore> {
    auth: A,
    content: C,
    store: S,
    session: Session,
    current_user: CurrentUser,
    cards: Vec<Card>,
    modals: ModalState,
    /// Requested route; what is shown goes through the guard
    route: Route,
    pending_delete: Option<String>,
    pending_events: Vec<ModelEvent>,
    event_bus: EventBusOption,
}

impl<A: AuthApi, C: ContentApi, S: KeyValueStore> AppController<A, C, S> {
    /// Create a logged-out controller pointed at the main route
    pub fn new(auth: A, content: C, store: S) -> Self {
        Self {
            auth,
            content,
            store,
            session: Session::new(),
            current_user: CurrentUser::default(),
            cards: Vec::new(),
            modals: ModalState::new(),
            route: Route::Main,
            pending_delete: None,
            pending_events: Vec::new(),
            event_bus: None,
        }
    }

    pub fn set_event_bus(&mut self, event_bus: Box<dyn EventBus>) {
        self.event_bus = Some(event_bus);
    }

    // --- read access -------------------------------------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> &CurrentUser {
        &self.current_user
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn modals(&self) -> &ModalState {
        &self.modals
    }

    /// Route as last navigated to
    pub fn route(&self) -> Route {
        self.route
    }

    /// Route actually shown after the logged-in guard
    pub fn current_route(&self) -> Route {
        crate::repl::models::guard(self.route, self.session.is_logged_in())
    }

    pub fn find_card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    /// Card waiting for delete confirmation
    pub fn pending_delete(&self) -> Option<&Card> {
        self.pending_delete
            .as_deref()
            .and_then(|id| self.find_card(id))
    }

    /// Read-only snapshot handed to the view layer for one render
    pub fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            email: self.session.email(),
            logged_in: self.session.is_logged_in(),
            current_user: &self.current_user,
            cards: &self.cards,
            modals: &self.modals,
            route: self.current_route(),
            pending_delete: self.pending_delete(),
        }
    }

    /// Drain events emitted since the last call
    pub fn collect_pending_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: ModelEvent) {
        if let Some(bus) = self.event_bus.as_mut() {
            bus.publish_model_event(event.clone());
        }
        self.pending_events.push(event);
    }

    fn report_failure(&mut self, operation: &'static str, error: &ApiError) {
        tracing::debug!("{} failed: {}", operation, error);
        self.emit(ModelEvent::RequestFailed {
            operation,
            message: error.to_string(),
        });
    }

    fn emit_session(&mut self) {
        let event = ModelEvent::SessionChanged {
            logged_in: self.session.is_logged_in(),
            email: self.session.email().to_string(),
        };
        self.emit(event);
    }

    fn emit_cards(&mut self) {
        let count = self.cards.len();
        self.emit(ModelEvent::CardsChanged { count });
    }

    // --- navigation --------------------------------------------------------

    /// Replace the current route
    pub fn navigate(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        let from = self.route;
        self.route = route;
        tracing::debug!("Navigating {} -> {}", from, route);
        self.emit(ModelEvent::RouteChanged { from, to: route });
    }

    // --- session -----------------------------------------------------------

    /// Sign in with credentials
    ///
    /// On success the token is persisted, the session becomes logged-in and
    /// the main route is shown. On failure nothing changes.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ControllerError> {
        forms::validate_credentials(email, password)?;

        let token = match self.auth.login(email, password).await {
            Ok(token) => token,
            Err(e) => {
                self.report_failure("login", &e);
                return Err(e.into());
            }
        };

        self.store.set(TOKEN_KEY, &token)?;
        tracing::info!("Signed in as {}", email);
        self.start_session(&token, email).await
    }

    /// Create an account and show the outcome tooltip
    ///
    /// Never signs in. The failure tooltip is generic whatever the cause.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, ControllerError> {
        forms::validate_credentials(email, password)?;

        match self.auth.register(email, password).await {
            Ok(user) => {
                tracing::info!("Registered {}", user.email);
                self.modals.open(Modal::SuccessTooltip);
                self.emit(ModelEvent::ModalOpened {
                    modal: Modal::SuccessTooltip,
                });
                Ok(user)
            }
            Err(e) => {
                self.report_failure("register", &e);
                self.modals.open(Modal::FailTooltip);
                self.emit(ModelEvent::ModalOpened {
                    modal: Modal::FailTooltip,
                });
                Err(e.into())
            }
        }
    }

    /// Drop the session and forget the stored token
    ///
    /// Local state is cleared even when the storage cannot be updated.
    pub fn sign_out(&mut self) -> Result<(), ControllerError> {
        self.session.clear();
        self.current_user = CurrentUser::default();
        self.cards.clear();
        self.pending_delete = None;
        self.content.set_token(None);
        self.emit_session();
        self.emit(ModelEvent::ProfileChanged);
        self.emit_cards();
        tracing::info!("Signed out");

        self.store.remove(TOKEN_KEY)?;
        Ok(())
    }

    /// Resume a session from the stored token, if any
    ///
    /// Returns `Ok(false)` when nothing is stored. A rejected token leaves the
    /// client logged out without navigating anywhere.
    pub async fn restore_session(&mut self) -> Result<bool, ControllerError> {
        let token = match self.store.get(TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => {
                tracing::debug!("No stored token");
                return Ok(false);
            }
        };

        let user = match self.auth.validate_token(&token).await {
            Ok(user) => user,
            Err(e) => {
                self.report_failure("validate_token", &e);
                return Err(e.into());
            }
        };

        tracing::info!("Restored session for {}", user.email);
        self.start_session(&token, &user.email).await?;
        Ok(true)
    }

    async fn start_session(&mut self, token: &str, email: &str) -> Result<(), ControllerError> {
        self.content.set_token(Some(token));
        self.session.set_email(email);
        let became_logged_in = self.session.set_logged_in(true);
        self.emit_session();
        self.navigate(Route::Main);

        if became_logged_in {
            self.load_initial_data()
                .await
                .map_err(ControllerError::Bootstrap)?;
        }
        Ok(())
    }

    /// Fetch profile and feed concurrently; apply both or neither
    pub async fn load_initial_data(&mut self) -> Result<(), ApiError> {
        let fetched = tokio::try_join!(self.content.get_profile(), self.content.get_cards());

        match fetched {
            Ok((user, cards)) => {
                tracing::debug!("Loaded profile {} and {} cards", user.id, cards.len());
                self.current_user = user;
                self.cards = cards;
                self.emit(ModelEvent::ProfileChanged);
                self.emit_cards();
                Ok(())
            }
            Err(e) => {
                self.report_failure("load_initial_data", &e);
                Err(e)
            }
        }
    }

    // --- cards -------------------------------------------------------------

    pub async fn like(&mut self, card_id: &str) -> Result<(), ControllerError> {
        match self.content.like(card_id).await {
            Ok(updated) => {
                self.cards = replace_card(&self.cards, updated);
                self.emit_cards();
                Ok(())
            }
            Err(e) => {
                self.report_failure("like", &e);
                Err(e.into())
            }
        }
    }

    pub async fn dislike(&mut self, card_id: &str) -> Result<(), ControllerError> {
        match self.content.dislike(card_id).await {
            Ok(updated) => {
                self.cards = replace_card(&self.cards, updated);
                self.emit_cards();
                Ok(())
            }
            Err(e) => {
                self.report_failure("dislike", &e);
                Err(e.into())
            }
        }
    }

    /// Like or unlike depending on whether the current user already likes it
    pub async fn toggle_like(&mut self, card_id: &str) -> Result<(), ControllerError> {
        let liked = self
            .find_card(card_id)
            .ok_or_else(|| ControllerError::UnknownCard(card_id.to_string()))?
            .is_liked_by(&self.current_user.id);

        if liked {
            self.dislike(card_id).await
        } else {
            self.like(card_id).await
        }
    }

    pub async fn delete(&mut self, card_id: &str) -> Result<(), ControllerError> {
        match self.content.delete_card(card_id).await {
            Ok(()) => {
                self.cards = remove_card(&self.cards, card_id);
                if self.pending_delete.as_deref() == Some(card_id) {
                    self.pending_delete = None;
                }
                if self.modals.deselect_card(card_id) {
                    self.emit(ModelEvent::ModalsClosed);
                }
                self.emit_cards();
                Ok(())
            }
            Err(e) => {
                self.report_failure("delete", &e);
                Err(e.into())
            }
        }
    }

    /// Ask for confirmation before deleting one of the user's own cards
    pub fn request_delete(&mut self, card_id: &str) -> Result<(), ControllerError> {
        let card = self
            .find_card(card_id)
            .ok_or_else(|| ControllerError::UnknownCard(card_id.to_string()))?;
        if !card.is_owned_by(&self.current_user.id) {
            return Err(ControllerError::NotOwner);
        }

        self.pending_delete = Some(card_id.to_string());
        self.emit(ModelEvent::DeleteRequested {
            card_id: card_id.to_string(),
        });
        Ok(())
    }

    /// Delete the card awaiting confirmation
    pub async fn confirm_delete(&mut self) -> Result<(), ControllerError> {
        let card_id = self
            .pending_delete
            .clone()
            .ok_or(ControllerError::NothingToDelete)?;
        self.delete(&card_id).await?;
        self.close_all();
        Ok(())
    }

    /// Add a card to the head of the feed and close the dialogs
    pub async fn create_card(&mut self, name: &str, link: &str) -> Result<(), ControllerError> {
        forms::validate_place(name, link)?;

        match self.content.create_card(name.trim(), link.trim()).await {
            Ok(card) => {
                tracing::info!("Created card {}", card.id);
                self.cards = prepend_card(&self.cards, card);
                self.emit_cards();
                self.close_all();
                Ok(())
            }
            Err(e) => {
                self.report_failure("create_card", &e);
                Err(e.into())
            }
        }
    }

    // --- profile -----------------------------------------------------------

    pub async fn update_profile(&mut self, name: &str, about: &str) -> Result<(), ControllerError> {
        forms::validate_profile(name, about)?;

        match self.content.update_profile(name.trim(), about.trim()).await {
            Ok(user) => {
                self.set_current_user(user);
                self.close_all();
                Ok(())
            }
            Err(e) => {
                self.report_failure("update_profile", &e);
                Err(e.into())
            }
        }
    }

    pub async fn update_avatar(&mut self, avatar: &str) -> Result<(), ControllerError> {
        forms::validate_avatar(avatar)?;

        match self.content.update_avatar(avatar.trim()).await {
            Ok(user) => {
                self.set_current_user(user);
                self.close_all();
                Ok(())
            }
            Err(e) => {
                self.report_failure("update_avatar", &e);
                Err(e.into())
            }
        }
    }

    fn set_current_user(&mut self, user: CurrentUser) {
        self.current_user = user;
        self.emit(ModelEvent::ProfileChanged);
    }

    // --- dialogs -----------------------------------------------------------

    fn open_modal(&mut self, modal: Modal) {
        self.modals.open(modal);
        self.emit(ModelEvent::ModalOpened { modal });
    }

    pub fn open_edit_profile(&mut self) {
        self.open_modal(Modal::EditProfile);
    }

    pub fn open_add_place(&mut self) {
        self.open_modal(Modal::AddPlace);
    }

    pub fn open_edit_avatar(&mut self) {
        self.open_modal(Modal::EditAvatar);
    }

    /// Open the image preview for a card in the feed
    pub fn select_card(&mut self, card_id: &str) -> Result<(), ControllerError> {
        let card = self
            .find_card(card_id)
            .cloned()
            .ok_or_else(|| ControllerError::UnknownCard(card_id.to_string()))?;
        self.modals.select_card(card);
        self.emit(ModelEvent::CardSelected {
            card_id: card_id.to_string(),
        });
        Ok(())
    }

    /// Close every dialog, the preview and any pending confirmation
    pub fn close_all(&mut self) {
        self.modals.close_all();
        self.pending_delete = None;
        self.emit(ModelEvent::ModalsClosed);
    }

    /// Dismiss the "registered" tooltip and head for the main route
    pub fn close_success_tooltip(&mut self) {
        self.close_all();
        self.navigate(Route::Main);
    }
}
