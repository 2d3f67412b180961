//! Demo pages served by the `hearth` binary.

use std::time::SystemTime;

use hearth::http::request::{Method, Request};
use hearth::http::response::{Response, ResponseBuilder, StatusCode};

fn page(title: &str, content: &str) -> String {
    format!(
        "<html>\n<head><title>{title}</title></head>\n<body>\n{content}\n</body>\n</html>\n",
        title = escape(title),
        content = content,
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn form_params(request: &Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

pub fn now(_request: &Request) -> anyhow::Result<Response> {
    let now = httpdate::fmt_http_date(SystemTime::now());
    Ok(Response::ok(page("Now", &format!("<h1>Now: {}</h1>", now))))
}

pub fn show_request(request: &Request) -> anyhow::Result<Response> {
    let mut headers = request.headers.iter().collect::<Vec<_>>();
    headers.sort();

    let headers = headers
        .into_iter()
        .map(|(k, v)| format!("{}: {}", escape(k), escape(v)))
        .collect::<Vec<_>>()
        .join("\n");

    let content = format!(
        "<h1>Request Line:</h1>\n<p>{} {} {}</p>\n<h1>Headers:</h1>\n<pre>{}</pre>\n<h1>Body:</h1>\n<pre>{}</pre>",
        request.method,
        escape(&request.path),
        escape(&request.version),
        headers,
        escape(&String::from_utf8_lossy(&request.body)),
    );

    Ok(Response::ok(page("HTTP Request", &content)))
}

pub fn parameters(request: &Request) -> anyhow::Result<Response> {
    if request.method != Method::POST {
        return Ok(Response::method_not_allowed());
    }

    let items = form_params(request)
        .iter()
        .map(|(k, v)| format!("<li>{} = {}</li>", escape(k), escape(v)))
        .collect::<String>();

    Ok(Response::ok(page("Parameters", &format!("<h1>Parameters:</h1>\n<ul>{}</ul>", items))))
}

pub fn user_profile(request: &Request) -> anyhow::Result<Response> {
    let user_id = request
        .param("user_id")
        .ok_or_else(|| anyhow::anyhow!("route did not capture user_id"))?;

    Ok(Response::ok(page("User Profile", &format!("<h1>User ID: {}</h1>", escape(user_id)))))
}

pub fn set_cookie(_request: &Request) -> anyhow::Result<Response> {
    Ok(ResponseBuilder::new(StatusCode::OK)
        .cookie("username", "TARO")
        .build())
}

pub fn login(request: &Request) -> anyhow::Result<Response> {
    match request.method {
        Method::GET => Ok(Response::ok(page(
            "Login",
            "<form action=\"/login\" method=\"post\">\n\
             <input type=\"text\" name=\"username\">\n\
             <input type=\"submit\" value=\"Login\">\n\
             </form>",
        ))),
        Method::POST => {
            let username = form_params(request)
                .into_iter()
                .find(|(k, _)| k == "username")
                .map(|(_, v)| v)
                .ok_or_else(|| anyhow::anyhow!("login form without username"))?;

            Ok(ResponseBuilder::new(StatusCode::FOUND)
                .header("Location", "/welcome")
                .cookie("username", username)
                .build())
        }
        _ => Ok(Response::method_not_allowed()),
    }
}

pub fn welcome(request: &Request) -> anyhow::Result<Response> {
    match request.cookie("username") {
        Some(username) => Ok(Response::ok(page(
            "Welcome",
            &format!("<h1>Welcome, {}!</h1>", escape(username)),
        ))),
        None => Ok(Response::redirect("/login")),
    }
}

#[cfg(test)]
mod tests {
    use hearth::http::request::RequestBuilder;

    use super::*;

    #[test]
    fn escape_replaces_markup() {
        assert_eq!(escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn welcome_redirects_without_cookie() {
        let req = RequestBuilder::new().method(Method::GET).path("/welcome").build().unwrap();

        let resp = welcome(&req).unwrap();

        assert_eq!(resp.status, StatusCode::FOUND);
        assert_eq!(resp.header("Location"), Some("/login"));
    }

    #[test]
    fn welcome_greets_cookie_user() {
        let req = RequestBuilder::new()
            .method(Method::GET)
            .path("/welcome")
            .header("Cookie", "username=TARO")
            .build()
            .unwrap();

        let resp = welcome(&req).unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert!(String::from_utf8_lossy(resp.body.as_bytes()).contains("Welcome, TARO!"));
    }

    #[test]
    fn login_post_sets_cookie_and_redirects() {
        let req = RequestBuilder::new()
            .method(Method::POST)
            .path("/login")
            .body("username=HANAKO")
            .build()
            .unwrap();

        let resp = login(&req).unwrap();

        assert_eq!(resp.status, StatusCode::FOUND);
        assert_eq!(resp.header("Location"), Some("/welcome"));
        assert_eq!(resp.cookies, vec![("username".to_string(), "HANAKO".to_string())]);
    }

    #[test]
    fn parameters_rejects_get() {
        let req = RequestBuilder::new().method(Method::GET).path("/parameters").build().unwrap();

        assert_eq!(parameters(&req).unwrap().status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn parameters_decodes_form_body() {
        let req = RequestBuilder::new()
            .method(Method::POST)
            .path("/parameters")
            .body("foo=bar+baz&n=%3C1%3E")
            .build()
            .unwrap();

        let body = String::from_utf8(parameters(&req).unwrap().body.as_bytes().to_vec()).unwrap();

        assert!(body.contains("<li>foo = bar baz</li>"));
        assert!(body.contains("<li>n = &lt;1&gt;</li>"));
    }
}
