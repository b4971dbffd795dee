//! Route guard and navigation tests

use edushare::nav::{Navigation, Navigator, Route};
use edushare::session::Session;

fn logged_in() -> Session {
    Session::new("tok".to_string(), "a".to_string(), "1".to_string())
}

#[test]
fn test_route_table_auth_flags() {
    assert!(!Route::Home.requires_auth());
    assert!(!Route::Login.requires_auth());
    assert!(!Route::Register.requires_auth());
    assert!(Route::Upload.requires_auth());
    assert!(Route::MyUploads.requires_auth());
    assert!(Route::Resources.requires_auth());
    assert!(Route::ResourceList.requires_auth());
    assert!(Route::ResourceDetail(1).requires_auth());
}

#[test]
fn test_protected_routes_never_allowed_while_logged_out() {
    let session = Session::default();
    let protected = [
        Route::Upload,
        Route::MyUploads,
        Route::Resources,
        Route::ResourceList,
        Route::ResourceDetail(7),
    ];

    for route in protected {
        let mut nav = Navigator::new();
        match nav.navigate(route.clone(), &session) {
            Navigation::Redirected { from, to } => {
                assert_eq!(from, route);
                assert_eq!(to, Route::Login);
            }
            Navigation::Allowed { .. } => {
                panic!("{} allowed through while logged out", route)
            }
        }
        assert_eq!(nav.current(), &Route::Login);
    }
}

#[test]
fn test_protected_routes_allowed_while_logged_in() {
    let session = logged_in();
    let mut nav = Navigator::new();

    for route in [Route::Upload, Route::MyUploads, Route::ResourceDetail(3)] {
        let outcome = nav.navigate(route.clone(), &session);
        assert_eq!(outcome, Navigation::Allowed { to: route.clone() });
        assert_eq!(nav.current(), &route);
    }
}

#[test]
fn test_open_routes_ignore_session_state() {
    for route in [Route::Home, Route::Login, Route::Register] {
        let mut nav = Navigator::new();
        let outcome = nav.navigate(route.clone(), &Session::default());
        assert_eq!(outcome, Navigation::Allowed { to: route });
    }
}

#[test]
fn test_guard_reevaluates_after_logout() {
    let mut nav = Navigator::new();

    let outcome = nav.navigate(Route::MyUploads, &logged_in());
    assert!(matches!(outcome, Navigation::Allowed { .. }));

    // The same target is blocked once the session is gone
    let outcome = nav.navigate(Route::MyUploads, &Session::default());
    assert!(matches!(outcome, Navigation::Redirected { .. }));
}

#[test]
fn test_route_paths_round_trip() {
    let routes = [
        Route::Home,
        Route::Upload,
        Route::MyUploads,
        Route::Resources,
        Route::ResourceList,
        Route::ResourceDetail(42),
        Route::Login,
        Route::Register,
    ];

    for route in routes {
        let parsed = Route::parse(&route.path()).expect("Failed to parse route path");
        assert_eq!(parsed, route);
    }
}

#[test]
fn test_force_bypasses_guard() {
    let mut nav = Navigator::new();
    nav.force(Route::Upload);
    assert_eq!(nav.current(), &Route::Upload);
}
