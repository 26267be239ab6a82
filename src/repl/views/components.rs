//! Page components
//!
//! Each component turns part of a [`ViewContext`] into text lines. They are
//! pure functions so the whole page can be checked without a terminal.

use super::ansi_escape_codes::{paint, BOLD, DIM, FG_CYAN, FG_GREEN, FG_RED};
use super::ViewContext;
use crate::repl::models::{Card, Modal, Route};

pub const LOGO: &str = "Mesto Russia";
pub const FOOTER: &str = "© 2024 Mesto Russia";
pub const SUCCESS_TEXT: &str = "Вы успешно зарегистрировались!";
pub const FAIL_TEXT: &str = "Что-то пошло не так! Попробуйте ещё раз.";
pub const CONFIRM_TITLE: &str = "Вы уверены?";
pub const CONFIRM_BUTTON: &str = "Да";

const RULE: &str = "────────────────────────────────────────";

pub fn dialog_title(modal: Modal) -> &'static str {
    match modal {
        Modal::EditProfile => "Редактировать профиль",
        Modal::AddPlace => "Новое место",
        Modal::EditAvatar => "Обновить аватар",
        Modal::SuccessTooltip => SUCCESS_TEXT,
        Modal::FailTooltip => FAIL_TEXT,
    }
}

pub fn header(ctx: &ViewContext<'_>, color: bool) -> Vec<String> {
    let right = match ctx.route {
        Route::Main => format!("{}  [logout] Выйти", ctx.email),
        Route::SignIn => "[go /sign-up] Регистрация".to_string(),
        Route::SignUp => "[go /sign-in] Войти".to_string(),
    };
    vec![
        format!("{}    {}", paint(LOGO, BOLD, color), right),
        RULE.to_string(),
    ]
}

pub fn footer() -> Vec<String> {
    vec![RULE.to_string(), FOOTER.to_string()]
}

pub fn sign_in() -> Vec<String> {
    vec![
        "Вход".to_string(),
        "  login <email> <пароль>".to_string(),
    ]
}

pub fn sign_up() -> Vec<String> {
    vec![
        "Регистрация".to_string(),
        "  register <email> <пароль>".to_string(),
        "  Уже зарегистрированы? Войти: go /sign-in".to_string(),
    ]
}

/// One feed line; position is 1-based
pub fn card_line(position: usize, card: &Card, user_id: &str, color: bool) -> String {
    let heart = if card.is_liked_by(user_id) {
        paint("♥", FG_RED, color)
    } else {
        "♡".to_string()
    };
    let trash = if card.is_owned_by(user_id) {
        "  [удалить]"
    } else {
        ""
    };
    format!(
        "{:>3}. {}  {} {}{}",
        position,
        card.name,
        heart,
        card.like_count(),
        trash
    )
}

pub fn main_view(ctx: &ViewContext<'_>, color: bool) -> Vec<String> {
    let user = ctx.current_user;
    let mut lines = vec![
        format!("{}  [profile]", paint(&user.name, BOLD, color)),
        user.about.clone(),
        paint(&format!("аватар: {}  [avatar]", user.avatar), DIM, color),
        "[add] +".to_string(),
        String::new(),
    ];

    if ctx.cards.is_empty() {
        lines.push(paint("Карточек пока нет", DIM, color));
    } else {
        lines.extend(
            ctx.cards
                .iter()
                .enumerate()
                .map(|(i, card)| card_line(i + 1, card, &user.id, color)),
        );
    }
    lines
}

/// Open dialogs, image preview and delete confirmation
pub fn popups(ctx: &ViewContext<'_>, color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for modal in ctx.modals.open_modals() {
        let title = dialog_title(modal);
        let line = match modal {
            Modal::SuccessTooltip => paint(&format!("✔ {title}"), FG_GREEN, color),
            Modal::FailTooltip => paint(&format!("✘ {title}"), FG_RED, color),
            _ => paint(&format!("▣ {title}"), FG_CYAN, color),
        };
        lines.push(line);
    }

    if let Some(card) = ctx.modals.selected_card() {
        lines.push(paint(&format!("▣ {}", card.name), FG_CYAN, color));
        lines.push(format!("  {}", card.link));
    }

    if let Some(card) = ctx.pending_delete {
        lines.push(paint(&format!("▣ {CONFIRM_TITLE}"), FG_CYAN, color));
        lines.push(format!("  {}  [{}]", card.name, CONFIRM_BUTTON));
    }

    lines
}

/// The whole page for the guarded route
pub fn page(ctx: &ViewContext<'_>, color: bool) -> Vec<String> {
    let mut lines = header(ctx, color);
    lines.extend(match ctx.route {
        Route::Main => main_view(ctx, color),
        Route::SignIn => sign_in(),
        Route::SignUp => sign_up(),
    });
    lines.extend(footer());

    let popups = popups(ctx, color);
    if !popups.is_empty() {
        lines.push(String::new());
        lines.extend(popups);
    }
    lines
}
