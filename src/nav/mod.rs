//! Client-side routes and the navigation guard

use crate::session::Session;
use std::fmt;

/// The application's route table. `ResourceDetail` carries the resource id
/// from `/resources/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Upload,
    MyUploads,
    Resources,
    ResourceList,
    ResourceDetail(i64),
    Login,
    Register,
}

impl Route {
    /// Parse a path into a route. Returns `None` for paths outside the table.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        match trimmed {
            "/" => Some(Route::Home),
            "/upload" => Some(Route::Upload),
            "/my-uploads" => Some(Route::MyUploads),
            "/resources" => Some(Route::Resources),
            "/resources/list" => Some(Route::ResourceList),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            other => {
                let id = other.strip_prefix("/resources/")?;
                id.parse().ok().map(Route::ResourceDetail)
            }
        }
    }

    /// The path this route lives at
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::MyUploads => "/my-uploads".to_string(),
            Route::Resources => "/resources".to_string(),
            Route::ResourceList => "/resources/list".to_string(),
            Route::ResourceDetail(id) => format!("/resources/{}", id),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
        }
    }

    /// Whether the guard requires a logged-in session for this route.
    /// `/register` is open, matching the backend's AllowAny registration.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Upload
                | Route::MyUploads
                | Route::Resources
                | Route::ResourceList
                | Route::ResourceDetail(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Outcome of a navigation attempt. Terminal per attempt; the guard is
/// re-evaluated on every navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allowed { to: Route },
    Redirected { from: Route, to: Route },
}

/// Holds the current route and enforces per-route authentication.
///
/// Owned by the caller and passed explicitly; the HTTP layer uses `force`
/// to send an expired session back to the login screen.
#[derive(Debug)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    /// Start at the home route
    pub fn new() -> Self {
        Self {
            current: Route::Home,
        }
    }

    /// The route the navigator is currently on
    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Attempt to navigate. Protected targets require a logged-in session;
    /// otherwise the attempt lands on `/login`.
    pub fn navigate(&mut self, target: Route, session: &Session) -> Navigation {
        if target.requires_auth() && !session.is_logged_in() {
            tracing::debug!("Navigation to {} blocked, redirecting to /login", target);
            self.current = Route::Login;
            return Navigation::Redirected {
                from: target,
                to: Route::Login,
            };
        }
        self.current = target.clone();
        Navigation::Allowed { to: target }
    }

    /// Move to a route without consulting the guard. Used by the HTTP
    /// layer's 401 handling to force the login screen.
    pub fn force(&mut self, target: Route) {
        tracing::debug!("Forced navigation to {}", target);
        self.current = target;
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Session {
        Session::new("tok".into(), "a".into(), "1".into())
    }

    #[test]
    fn test_parse_all_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/upload"), Some(Route::Upload));
        assert_eq!(Route::parse("/my-uploads"), Some(Route::MyUploads));
        assert_eq!(Route::parse("/resources"), Some(Route::Resources));
        assert_eq!(Route::parse("/resources/list"), Some(Route::ResourceList));
        assert_eq!(Route::parse("/resources/42"), Some(Route::ResourceDetail(42)));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/register"), Some(Route::Register));
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        assert_eq!(Route::parse("/admin"), None);
        assert_eq!(Route::parse("/resources/abc"), None);
    }

    #[test]
    fn test_protected_route_redirects_when_logged_out() {
        let mut nav = Navigator::new();
        let outcome = nav.navigate(Route::Upload, &Session::default());
        assert_eq!(
            outcome,
            Navigation::Redirected {
                from: Route::Upload,
                to: Route::Login,
            }
        );
        assert_eq!(nav.current(), &Route::Login);
    }

    #[test]
    fn test_protected_route_allowed_when_logged_in() {
        let mut nav = Navigator::new();
        let outcome = nav.navigate(Route::MyUploads, &logged_in());
        assert_eq!(
            outcome,
            Navigation::Allowed {
                to: Route::MyUploads
            }
        );
        assert_eq!(nav.current(), &Route::MyUploads);
    }

    #[test]
    fn test_open_routes_never_redirect() {
        let mut nav = Navigator::new();
        for route in [Route::Home, Route::Login, Route::Register] {
            let outcome = nav.navigate(route.clone(), &Session::default());
            assert_eq!(outcome, Navigation::Allowed { to: route });
        }
    }

    #[test]
    fn test_guard_reevaluated_on_every_navigation() {
        let mut nav = Navigator::new();
        nav.navigate(Route::Resources, &logged_in());
        assert_eq!(nav.current(), &Route::Resources);

        // Same target, session now logged out: blocked again
        let outcome = nav.navigate(Route::Resources, &Session::default());
        assert_eq!(
            outcome,
            Navigation::Redirected {
                from: Route::Resources,
                to: Route::Login,
            }
        );
    }
}
