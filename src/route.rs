//! Navigation destinations
//!
//! Screens are addressed by path-like tokens, e.g. `/downloads` or
//! `/movie-details?id=2`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),

    #[error("Route {0} requires an id parameter")]
    MissingId(String),

    #[error("Invalid route parameter: {0}")]
    InvalidParam(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    Search,
    Downloads,
    Settings,
    MovieDetails { id: String },
    Player,
}

impl Route {
    /// Tabs reachable from the floating nav bar, in bar order
    pub const TABS: [Route; 4] = [Route::Home, Route::Search, Route::Downloads, Route::Settings];

    pub fn movie(id: impl Into<String>) -> Self {
        Route::MovieDetails { id: id.into() }
    }

    pub fn is_tab(&self) -> bool {
        self.tab_index().is_some()
    }

    pub fn tab_index(&self) -> Option<usize> {
        match self {
            Route::Home => Some(0),
            Route::Search => Some(1),
            Route::Downloads => Some(2),
            Route::Settings => Some(3),
            _ => None,
        }
    }

    /// Label shown in the nav bar and status line
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Search => "Search",
            Route::Downloads => "Downloads",
            Route::Settings => "Settings",
            Route::MovieDetails { .. } => "Details",
            Route::Player => "Player",
        }
    }

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let (base, query) = match trimmed.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (trimmed, None),
        };
        let base = match base.trim_end_matches('/') {
            "" => "/",
            other => other,
        };

        match base {
            "/" | "/index" => Ok(Route::Home),
            "/search" => Ok(Route::Search),
            "/downloads" => Ok(Route::Downloads),
            "/settings" => Ok(Route::Settings),
            "/streaming/player" => Ok(Route::Player),
            "/movie-details" => {
                let id = query
                    .and_then(|q| q.split('&').find_map(|pair| pair.strip_prefix("id=")))
                    .ok_or_else(|| RouteError::MissingId(base.to_string()))?;
                let id = urlencoding::decode(id)
                    .map_err(|e| RouteError::InvalidParam(e.to_string()))?
                    .into_owned();
                if id.is_empty() {
                    return Err(RouteError::MissingId(base.to_string()));
                }
                Ok(Route::MovieDetails { id })
            }
            _ => Err(RouteError::Unknown(trimmed.to_string())),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Search => write!(f, "/search"),
            Route::Downloads => write!(f, "/downloads"),
            Route::Settings => write!(f, "/settings"),
            Route::MovieDetails { id } => {
                write!(f, "/movie-details?id={}", urlencoding::encode(id))
            }
            Route::Player => write!(f, "/streaming/player"),
        }
    }
}
