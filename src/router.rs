use thiserror::Error;
use tracing::{debug, warn};

use crate::error::HandlerError;
use crate::request::Request;
use crate::response::Response;
use crate::store::FileStore;

/// Path patterns a route can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// The target equals the pattern.
    Exact(&'static str),
    /// The target starts with the pattern and has something after it.
    PrefixSegment(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Files,
    Echo,
    UserAgent,
    Root,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed route pattern {0:?}")]
pub struct PatternError(&'static str);

/// Ordered list of bindings. The first matcher that accepts the target
/// picks the route, later bindings are not consulted.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(Matcher, Route)>,
}

impl Matcher {
    pub fn try_match(self, target: &str) -> Result<bool, PatternError> {
        match self {
            Self::Exact(pattern) if pattern.starts_with('/') => Ok(target == pattern),
            Self::PrefixSegment(pattern) if pattern.starts_with('/') => Ok(target
                .strip_prefix(pattern)
                .is_some_and(|rest| !rest.is_empty())),
            Self::Exact(pattern) | Self::PrefixSegment(pattern) => Err(PatternError(pattern)),
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn route(mut self, matcher: Matcher, route: Route) -> Self {
        self.routes.push((matcher, route));
        self
    }

    pub fn resolve(&self, target: &str) -> Option<Route> {
        for &(matcher, route) in &self.routes {
            match matcher.try_match(target) {
                Ok(true) => return Some(route),
                Ok(false) => {}
                Err(error) => warn!(%error, path = target, "error matching path to route pattern."),
            }
        }
        None
    }

    /// Runs the handler of the first matching route, or answers 404 if there
    /// is none.
    pub async fn dispatch(&self, req: &Request, store: &FileStore) -> Result<Response, HandlerError> {
        match self.resolve(req.target()) {
            Some(route) => {
                debug!(?route, path = req.target(), "matched route.");
                route.handle(req, store).await
            }
            None => {
                debug!(path = req.target(), "no route matched.");
                Ok(Response::not_found())
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
            .route(Matcher::PrefixSegment("/files/"), Route::Files)
            .route(Matcher::PrefixSegment("/echo/"), Route::Echo)
            .route(Matcher::Exact("/user-agent"), Route::UserAgent)
            .route(Matcher::Exact("/"), Route::Root)
    }
}
