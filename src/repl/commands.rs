//! # Commands
//!
//! Maps one line of user input to a [`Command`]. Parsing is purely
//! syntactic; whether a command makes sense in the current state is the
//! controller's business.

use thiserror::Error;

use crate::repl::models::{Card, Route};

/// Prefix forcing a card argument to be read as an id
pub const ID_PREFIX: &str = "id:";

/// How a command names a card: feed position (1-based) or raw id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardRef {
    Position(usize),
    Id(String),
}

impl CardRef {
    /// Look the card up in the current feed
    ///
    /// A number past the end of the feed is tried as an id.
    pub fn resolve<'a>(&self, cards: &'a [Card]) -> Option<&'a Card> {
        match self {
            CardRef::Position(n) => n
                .checked_sub(1)
                .and_then(|i| cards.get(i))
                .or_else(|| find_by_id(cards, &n.to_string())),
            CardRef::Id(id) => find_by_id(cards, id),
        }
    }
}

fn find_by_id<'a>(cards: &'a [Card], id: &str) -> Option<&'a Card> {
    cards.iter().find(|c| c.id == id)
}

impl From<&str> for CardRef {
    fn from(s: &str) -> Self {
        if let Some(id) = s.strip_prefix(ID_PREFIX) {
            return CardRef::Id(id.to_string());
        }
        match s.parse::<usize>() {
            Ok(n) => CardRef::Position(n),
            Err(_) => CardRef::Id(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register { email: String, password: String },
    Logout,
    Go(Route),
    Feed,
    Like(CardRef),
    Unlike(CardRef),
    Toggle(CardRef),
    Open(CardRef),
    Delete(CardRef),
    /// Open the add-place form
    Add,
    /// Open the edit-profile form
    Profile,
    /// Open the edit-avatar form
    Avatar,
    Close,
    Help,
    Quit,
}

impl Command {
    /// Commands that act on the feed or the profile
    pub fn needs_session(&self) -> bool {
        matches!(
            self,
            Command::Like(_)
                | Command::Unlike(_)
                | Command::Toggle(_)
                | Command::Open(_)
                | Command::Delete(_)
                | Command::Add
                | Command::Profile
                | Command::Avatar
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("неизвестная команда '{0}', введите help")]
    Unknown(String),

    #[error("{command}: не указан аргумент <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{0}")]
    Route(String),
}

pub const HELP: &str = "\
Команды:
  login <email> <пароль>     войти
  register <email> <пароль>  зарегистрироваться
  logout                     выйти
  go </|/sign-in|/sign-up>   перейти на страницу
  feed                       показать ленту
  like <n> | unlike <n>      поставить или снять лайк
  toggle <n>                 переключить лайк
  open <n>                   открыть фотографию
  delete <n>                 удалить свою карточку
  add                        новое место
  profile                    редактировать профиль
  avatar                     обновить аватар
  close                      закрыть все окна
  help                       эта справка
  quit                       выход
<n>: номер карточки в ленте или её id (id:<id>, если id состоит из цифр)
В формах '.' отменяет ввод; пустое поле профиля оставляет прежнее значение";

fn arg<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ParseError> {
    args.next()
        .ok_or(ParseError::MissingArgument { command, argument })
}

fn card_arg<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<CardRef, ParseError> {
    Ok(CardRef::from(arg(args, command, "n")?))
}

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "login" | "signin" => Command::Login {
            email: arg(&mut words, "login", "email")?.to_string(),
            password: arg(&mut words, "login", "пароль")?.to_string(),
        },
        "register" | "signup" => Command::Register {
            email: arg(&mut words, "register", "email")?.to_string(),
            password: arg(&mut words, "register", "пароль")?.to_string(),
        },
        "logout" | "signout" => Command::Logout,
        "go" => Command::Go(
            arg(&mut words, "go", "путь")?
                .parse()
                .map_err(ParseError::Route)?,
        ),
        "feed" | "ls" => Command::Feed,
        "like" => Command::Like(card_arg(&mut words, "like")?),
        "unlike" | "dislike" => Command::Unlike(card_arg(&mut words, "unlike")?),
        "toggle" => Command::Toggle(card_arg(&mut words, "toggle")?),
        "open" => Command::Open(card_arg(&mut words, "open")?),
        "delete" | "rm" => Command::Delete(card_arg(&mut words, "delete")?),
        "add" => Command::Add,
        "profile" => Command::Profile,
        "avatar" => Command::Avatar,
        "close" => Command::Close,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
