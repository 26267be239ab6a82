//! # Form Validation
//!
//! Field constraints of the sign-in, sign-up, profile, avatar and add-place
//! forms. A form that fails validation is never submitted.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

pub const NAME_LEN: (usize, usize) = (2, 40);
pub const ABOUT_LEN: (usize, usize) = (2, 200);
pub const PLACE_NAME_LEN: (usize, usize) = (2, 30);

/// A rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field}: заполните это поле")]
    Empty { field: &'static str },

    #[error("{field}: длина должна быть от {min} до {max} символов")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("{field}: введите адрес электронной почты")]
    Email { field: &'static str },

    #[error("{field}: введите URL")]
    Url { field: &'static str },
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url pattern is valid"))
}

fn required(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::Empty { field })
    } else {
        Ok(())
    }
}

fn length(field: &'static str, value: &str, (min, max): (usize, usize)) -> Result<(), FormError> {
    required(field, value)?;
    let len = value.trim().chars().count();
    if len < min || len > max {
        Err(FormError::Length { field, min, max })
    } else {
        Ok(())
    }
}

fn email(field: &'static str, value: &str) -> Result<(), FormError> {
    required(field, value)?;
    if email_regex().is_match(value.trim()) {
        Ok(())
    } else {
        Err(FormError::Email { field })
    }
}

fn url(field: &'static str, value: &str) -> Result<(), FormError> {
    required(field, value)?;
    if url_regex().is_match(value.trim()) {
        Ok(())
    } else {
        Err(FormError::Url { field })
    }
}

/// Sign-in and sign-up share the same two fields
pub fn validate_credentials(email_value: &str, password: &str) -> Result<(), FormError> {
    email("Email", email_value)?;
    required("Пароль", password)
}

pub fn validate_profile(name: &str, about: &str) -> Result<(), FormError> {
    length("Имя", name, NAME_LEN)?;
    length("О себе", about, ABOUT_LEN)
}

pub fn validate_avatar(avatar: &str) -> Result<(), FormError> {
    url("Ссылка на аватар", avatar)
}

pub fn validate_place(name: &str, link: &str) -> Result<(), FormError> {
    length("Название", name, PLACE_NAME_LEN)?;
    url("Ссылка на картинку", link)
}
