use hearth::error::ParseError;
use hearth::http::request::{Method, RequestBuilder};

#[test]
fn test_method_from_token() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (token, expected) in methods {
        assert_eq!(Method::from_token(token), expected);
        assert_eq!(expected.to_string(), token);
    }
}

#[test]
fn test_method_token_is_case_sensitive() {
    assert_eq!(Method::from_token("post"), Method::Extension("post".to_string()));
}

#[test]
fn test_request_builder_defaults() {
    let request = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .build()
        .unwrap();

    assert_eq!(request.version, "HTTP/1.1");
    assert!(request.headers.is_empty());
    assert!(request.cookies.is_empty());
    assert!(request.path_params.is_empty());
    assert!(request.body.is_empty());
}

#[test]
fn test_request_builder_missing_method() {
    let result = RequestBuilder::new().path("/").build();

    assert_eq!(result.unwrap_err(), ParseError::MalformedRequestLine);
}

#[test]
fn test_request_builder_missing_path() {
    let result = RequestBuilder::new().method(Method::GET).build();

    assert_eq!(result.unwrap_err(), ParseError::MalformedRequestLine);
}

#[test]
fn test_request_builder_relative_path() {
    let result = RequestBuilder::new().method(Method::GET).path("now").build();

    assert_eq!(result.unwrap_err(), ParseError::MalformedRequestLine);
}

#[test]
fn test_request_builder_decodes_cookie_header() {
    let request = RequestBuilder::new()
        .method(Method::GET)
        .path("/welcome")
        .header("Cookie", "username=TARO; session=abc")
        .build()
        .unwrap();

    assert_eq!(request.cookie("username"), Some("TARO"));
    assert_eq!(request.cookie("session"), Some("abc"));
    assert_eq!(request.cookie("missing"), None);
}

#[test]
fn test_request_builder_rejects_bad_cookie() {
    let result = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("Cookie", "novalue")
        .build();

    assert_eq!(result.unwrap_err(), ParseError::MalformedCookie("novalue".to_string()));
}

#[test]
fn test_request_header_lookup() {
    let request = RequestBuilder::new()
        .method(Method::POST)
        .path("/api")
        .header("Content-Type", "application/json")
        .body("{}")
        .build()
        .unwrap();

    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.header("X-Missing"), None);
    assert_eq!(&request.body[..], b"{}");
}

#[test]
fn test_request_param_lookup() {
    let mut request = RequestBuilder::new()
        .method(Method::GET)
        .path("/user/7/profile")
        .build()
        .unwrap();
    request.path_params.insert("user_id".to_string(), "7".to_string());

    assert_eq!(request.param("user_id"), Some("7"));
    assert_eq!(request.param("other"), None);
}
