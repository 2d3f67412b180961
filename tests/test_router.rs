use hearth::http::handler::{handler, Handler};
use hearth::http::request::{Method, Request, RequestBuilder};
use hearth::http::response::Response;
use hearth::routing::{Route, Router};

fn tagged(tag: &'static str) -> Handler {
    handler(move |_| Ok(Response::ok(tag)))
}

fn request(path: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .build()
        .unwrap()
}

fn invoke(h: Handler, req: &Request) -> String {
    let resp = h(req).unwrap();
    String::from_utf8(resp.body.as_bytes().to_vec()).unwrap()
}

fn router() -> Router {
    Router::new(
        vec![
            Route::new("/now", tagged("now")).unwrap(),
            Route::new(r"/user/(?P<user_id>\d+)/profile", tagged("profile")).unwrap(),
            Route::new(r"/user/.*", tagged("user-any")).unwrap(),
        ],
        tagged("static"),
    )
}

#[test]
fn test_exact_route() {
    let mut req = request("/now");

    let h = router().resolve(&mut req);

    assert_eq!(invoke(h, &req), "now");
    assert!(req.path_params.is_empty());
}

#[test]
fn test_named_group_becomes_param() {
    let mut req = request("/user/42/profile");

    let h = router().resolve(&mut req);

    assert_eq!(invoke(h, &req), "profile");
    assert_eq!(req.param("user_id"), Some("42"));
}

#[test]
fn test_first_declared_route_wins() {
    // "/user/42/profile" matches both user routes; the earlier one is used.
    let mut req = request("/user/42/profile");
    let h = router().resolve(&mut req);
    assert_eq!(invoke(h, &req), "profile");

    let reversed = Router::new(
        vec![
            Route::new(r"/user/.*", tagged("user-any")).unwrap(),
            Route::new(r"/user/(?P<user_id>\d+)/profile", tagged("profile")).unwrap(),
        ],
        tagged("static"),
    );
    let mut req = request("/user/42/profile");
    let h = reversed.resolve(&mut req);
    assert_eq!(invoke(h, &req), "user-any");
    assert!(req.path_params.is_empty());
}

#[test]
fn test_no_prefix_matching() {
    let mut req = request("/now/later");

    let h = router().resolve(&mut req);

    assert_eq!(invoke(h, &req), "static");
}

#[test]
fn test_unmatched_path_falls_back() {
    let mut req = request("/missing.js");

    let h = router().resolve(&mut req);

    assert_eq!(invoke(h, &req), "static");
    assert!(req.path_params.is_empty());
}

#[test]
fn test_query_string_is_part_of_path() {
    let mut req = request("/now?tz=utc");

    let h = router().resolve(&mut req);

    assert_eq!(invoke(h, &req), "static");
}

#[test]
fn test_invalid_pattern_is_rejected() {
    assert!(Route::new("/broken(", tagged("x")).is_err());
}

#[test]
fn test_router_is_shareable_across_threads() {
    let router = router();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let router = router.clone();
            std::thread::spawn(move || {
                let mut req = request(&format!("/user/{}/profile", i));
                router.resolve(&mut req);
                req.param("user_id").map(str::to_string)
            })
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), Some(i.to_string()));
    }
}
