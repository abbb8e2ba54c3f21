//! Route matching logic.
//!
//! # Design Decisions
//! - Exact path+method beats any prefix, wherever it sits in the table
//! - Prefix ties are broken by table order, first listed wins
//! - Path matching is case-sensitive and byte-wise
//! - No regex; two linear scans over the snapshot

use std::borrow::Cow;

use axum::http::Method;

use crate::routing::route::Route;

/// Which rule selected a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    Exact(&'a Route),
    Prefix(&'a Route),
}

impl<'a> RouteMatch<'a> {
    pub fn route(&self) -> &'a Route {
        match self {
            RouteMatch::Exact(route) | RouteMatch::Prefix(route) => route,
        }
    }

    /// Label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteMatch::Exact(_) => "exact",
            RouteMatch::Prefix(_) => "prefix",
        }
    }
}

/// Strip trailing slashes, keeping the root path `/`.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        if path == "/" {
            Cow::Borrowed(path)
        } else {
            Cow::Owned("/".to_string())
        }
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// Select the best route for `method` and `path` among `routes`.
pub fn match_route<'a>(routes: &'a [Route], method: &Method, path: &str) -> Option<RouteMatch<'a>> {
    let path = normalize_path(path);

    if let Some(route) = routes
        .iter()
        .find(|r| r.active && r.matches_exact(method, &path))
    {
        return Some(RouteMatch::Exact(route));
    }

    routes
        .iter()
        .find(|r| r.active && r.matches_prefix(&path))
        .map(RouteMatch::Prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::route::Backend;

    fn exact(path: &str, method: Method, port: u16) -> Route {
        Route {
            exact_path: Some(path.into()),
            method: Some(method),
            prefix: None,
            backend: Backend::new("127.0.0.1", port),
            active: true,
        }
    }

    fn prefix(prefix: &str, port: u16) -> Route {
        Route {
            exact_path: None,
            method: None,
            prefix: Some(prefix.into()),
            backend: Backend::new("127.0.0.1", port),
            active: true,
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("//"), "/");
        assert_eq!(normalize_path("/a/"), "/a");
        assert_eq!(normalize_path("/a//"), "/a");
        assert_eq!(normalize_path("/a/b"), "/a/b");

        for p in ["/", "/a/", "/a/b//", "", "/x"] {
            let once = normalize_path(p).into_owned();
            assert_eq!(normalize_path(&once), once, "not idempotent for {p:?}");
        }
    }

    #[test]
    fn test_exact_beats_prefix_regardless_of_order() {
        let routes = vec![prefix("/api", 1), exact("/api/users", Method::GET, 2)];

        let m = match_route(&routes, &Method::GET, "/api/users").unwrap();
        assert_eq!(m.kind(), "exact");
        assert_eq!(m.route().backend.port, 2);

        // trailing slash normalizes onto the exact path
        let m = match_route(&routes, &Method::GET, "/api/users/").unwrap();
        assert_eq!(m.route().backend.port, 2);

        // method mismatch falls back to the prefix
        let m = match_route(&routes, &Method::POST, "/api/users").unwrap();
        assert_eq!(m.kind(), "prefix");
        assert_eq!(m.route().backend.port, 1);
    }

    #[test]
    fn test_first_prefix_wins() {
        let routes = vec![prefix("/static", 1), prefix("/static/img", 2), prefix("/", 3)];

        assert_eq!(match_route(&routes, &Method::GET, "/static/img/a.png").unwrap().route().backend.port, 1);
        assert_eq!(match_route(&routes, &Method::GET, "/other").unwrap().route().backend.port, 3);
    }

    #[test]
    fn test_inactive_routes_are_skipped() {
        let mut disabled_exact = exact("/api/users", Method::GET, 1);
        disabled_exact.active = false;
        let mut disabled_prefix = prefix("/api", 2);
        disabled_prefix.active = false;
        let routes = vec![disabled_exact, disabled_prefix, prefix("/api/", 3)];

        assert!(match_route(&routes, &Method::GET, "/api").is_none());
        let m = match_route(&routes, &Method::GET, "/api/users").unwrap();
        assert_eq!(m.route().backend.port, 3);
    }

    #[test]
    fn test_not_found() {
        let routes = vec![exact("/api/users", Method::GET, 1), prefix("/static", 2)];
        assert!(match_route(&routes, &Method::POST, "/api/users").is_none());
        assert!(match_route(&routes, &Method::GET, "/").is_none());
        assert!(match_route(&[], &Method::GET, "/").is_none());
    }
}
