//! Route table and the logged-in guard

use std::fmt;
use std::str::FromStr;

/// Screens the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Feed and profile, requires a session
    Main,
    SignUp,
    SignIn,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Main => "/",
            Route::SignUp => "/sign-up",
            Route::SignIn => "/sign-in",
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Main)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "/" | "" => Ok(Route::Main),
            "/sign-up" => Ok(Route::SignUp),
            "/sign-in" => Ok(Route::SignIn),
            other => Err(format!("неизвестный путь '{other}'")),
        }
    }
}

/// Resolve the route that is actually shown
///
/// Guarded routes redirect to the sign-in screen while logged out.
pub fn guard(route: Route, logged_in: bool) -> Route {
    if route.requires_session() && !logged_in {
        Route::SignIn
    } else {
        route
    }
}
