//! Route lookup and dispatch.
//!
//! Routes are tried in declaration order and the first full-path match wins.
//! There is no other notion of priority. When nothing matches, the router
//! hands back its fallback handler instead of an error.

use std::sync::Arc;

use regex::Regex;

use crate::http::handler::Handler;
use crate::http::request::Request;

/// A path pattern bound to a handler.
#[derive(Clone)]
pub struct Route {
    pattern: Regex,
    handler: Handler,
}

impl Route {
    /// Compiles `pattern` so that it only matches a whole path.
    ///
    /// Named groups (`(?P<user_id>\d+)`) become path parameters.
    pub fn new(pattern: &str, handler: Handler) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self { pattern, handler })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Immutable, ordered route table with a fallback handler.
///
/// Built once at startup and shared between connections behind an `Arc`.
#[derive(Clone)]
pub struct Router {
    routes: Arc<[Route]>,
    fallback: Handler,
}

impl Router {
    pub fn new(routes: Vec<Route>, fallback: Handler) -> Self {
        Self {
            routes: routes.into(),
            fallback,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the handler for `request.path`, binding named captures into
    /// `request.path_params`.
    ///
    /// Groups that did not take part in the match are left out of the map.
    pub fn resolve(&self, request: &mut Request) -> Handler {
        for route in self.routes.iter() {
            let Some(captures) = route.pattern.captures(&request.path) else {
                continue;
            };

            let params = route
                .pattern
                .capture_names()
                .flatten()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|m| (name.to_string(), m.as_str().to_string()))
                })
                .collect::<Vec<_>>();

            request.path_params.extend(params);

            tracing::debug!(path = %request.path, pattern = route.pattern(), "Route matched");
            return Arc::clone(&route.handler);
        }

        tracing::debug!(path = %request.path, "No route matched, using fallback");
        Arc::clone(&self.fallback)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::handler::handler;
    use crate::http::request::{Method, RequestBuilder};
    use crate::http::response::Response;

    fn request(path: &str) -> Request {
        RequestBuilder::new()
            .method(Method::GET)
            .path(path)
            .build()
            .unwrap()
    }

    #[test]
    fn pattern_is_anchored_at_both_ends() {
        let route = Route::new("/now", handler(|_| Ok(Response::ok("")))).unwrap();

        assert_eq!(route.pattern(), "^(?:/now)$");
        assert!(!route.pattern.is_match("/now/later"));
        assert!(!route.pattern.is_match("/x/now"));
    }

    #[test]
    fn alternation_stays_anchored() {
        let route = Route::new("/a|/b", handler(|_| Ok(Response::ok("")))).unwrap();

        assert!(route.pattern.is_match("/b"));
        assert!(!route.pattern.is_match("/a/extra"));
    }

    #[test]
    fn unmatched_optional_group_is_absent() {
        let router = Router::new(
            vec![Route::new(r"/items(/(?P<id>\d+))?", handler(|_| Ok(Response::ok("")))).unwrap()],
            handler(|_| Ok(Response::not_found())),
        );
        let mut req = request("/items");

        router.resolve(&mut req);

        assert!(req.path_params.is_empty());
    }
}
