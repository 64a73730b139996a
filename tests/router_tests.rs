//! Tests for route registration and first-match resolution
//!
//! # Test Coverage
//!
//! - Registration order is match order (first match wins)
//! - Re-registering a pattern replaces the handler in place
//! - Positional capture extraction
//! - Malformed patterns are skipped
//! - Empty table / unmatched path

use frontrouter::handler::{Handler, RouteResult};
use frontrouter::router::Router;
use http::Method;

fn named(name: &'static str) -> Handler {
    Handler::native(move |_, _| RouteResult::producer(move |_, _| name.to_string()))
}

fn assert_route_match(router: &Router, path: &str, expected_pattern: &str) {
    match router.find_matched_route(path) {
        Some(m) => {
            println!("✅ {} → {}", path, m.pattern);
            assert_eq!(
                m.pattern, expected_pattern,
                "Pattern mismatch for {}: expected '{}', got '{}'",
                path, expected_pattern, m.pattern
            );
        }
        None => {
            println!("❌ {} → no match", path);
            assert_eq!(expected_pattern, "<none>", "Expected route to match for {}", path);
        }
    }
}

fn blog_router() -> Router {
    let mut router = Router::new();
    router.add_routes([
        ("blog", named("index")),
        ("blog/([a-z0-9-]+)", named("post")),
        ("blog/(.+)", named("catch-all")),
        ("blog/archive", named("archive")),
        ("users/([0-9]+)/posts/([0-9]+)", named("user-post")),
    ]);
    router
}

#[test]
fn test_router_matches_literal_pattern() {
    assert_route_match(&blog_router(), "blog", "blog");
}

#[test]
fn test_router_first_match_wins_over_later_specific_pattern() {
    let router = blog_router();
    // "blog/archive" is registered last; the earlier slug pattern takes it
    assert_route_match(&router, "blog/archive", "blog/([a-z0-9-]+)");
    let hit = router.dispatch(&Method::GET, "blog/archive").unwrap();
    assert_eq!(hit.content, "post");
}

#[test]
fn test_router_falls_through_to_catch_all() {
    let router = blog_router();
    assert_route_match(&router, "blog/2024/01/hello", "blog/(.+)");
    let m = router.find_matched_route("blog/2024/01/hello").unwrap();
    assert_eq!(m.params, vec!["2024/01/hello"]);
}

#[test]
fn test_router_extracts_params_in_order() {
    let router = blog_router();
    let m = router.find_matched_route("users/7/posts/99").unwrap();
    assert_eq!(m.pattern, "users/([0-9]+)/posts/([0-9]+)");
    assert_eq!(m.params, vec!["7", "99"]);
}

#[test]
fn test_router_patterns_are_anchored() {
    let router = blog_router();
    assert_route_match(&router, "/blog", "<none>");
    assert_route_match(&router, "blogs", "<none>");
    assert_route_match(&router, "users/7/posts/99/edit", "<none>");
}

#[test]
fn test_router_no_match_returns_none() {
    let router = blog_router();
    assert_route_match(&router, "does/not/exist", "<none>");
    assert!(router.dispatch(&Method::GET, "does/not/exist").is_none());
}

#[test]
fn test_router_empty_table() {
    let router = Router::new();
    assert!(router.is_empty());
    assert!(router.find_matched_route("").is_none());
    assert!(router.dispatch(&Method::GET, "anything").is_none());
}

#[test]
fn test_router_skips_malformed_pattern() {
    let mut router = Router::new();
    router.add_route("users/([0-9]+", named("broken"));
    router.add_route("users/([0-9]+)", named("fixed"));
    let hit = router.dispatch(&Method::GET, "users/5").unwrap();
    assert_eq!(hit.pattern, "users/([0-9]+)");
    assert_eq!(hit.content, "fixed");
}

#[test]
fn test_router_reregistration_keeps_priority() {
    let mut router = Router::new();
    router.add_route("page/(.+)", named("generic"));
    router.add_route("page/about", named("about"));
    router.add_route("page/(.+)", named("generic-v2"));

    let patterns: Vec<&str> = router.patterns().collect();
    assert_eq!(patterns, vec!["page/(.+)", "page/about"]);
    assert_eq!(router.len(), 2);

    let hit = router.dispatch(&Method::GET, "page/about").unwrap();
    assert_eq!(hit.content, "generic-v2");
}

#[test]
fn test_router_add_routes_preserves_iteration_order() {
    let mut router = Router::new();
    let routes = vec![("c", named("c")), ("a", named("a")), ("b", named("b"))];
    router.add_routes(routes);
    let patterns: Vec<&str> = router.patterns().collect();
    assert_eq!(patterns, vec!["c", "a", "b"]);
}

#[test]
fn test_router_regex_metacharacters_are_live() {
    let mut router = Router::new();
    router.add_route("file.txt", named("file"));
    // `.` is not escaped, so it matches any character
    assert!(router.find_matched_route("file-txt").is_some());
    assert!(router.find_matched_route("file.txt").is_some());
}
