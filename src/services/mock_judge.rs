//! Local DOMjudge stand-in for HTTP tests.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::models::Credentials;

pub const SESSION_COOKIE: &str = "PHPSESSID=s3ss10n";

pub const LOGIN_PAGE: &str = r#"
    <html><body>
      <form method="post" action="/domjudge/login">
        <input type="hidden" name="_csrf_token" value="tok123">
        <input type="text" name="_username">
        <input type="password" name="_password">
      </form>
    </body></html>"#;

pub fn base_url(server: &MockServer) -> String {
    format!("{}/domjudge", server.uri())
}

pub fn credentials() -> Credentials {
    Credentials {
        username: "jury".to_string(),
        password: "s3cret".to_string(),
    }
}

/// Serve the login form and answer the login POST.
///
/// An accepted login redirects to the jury page; a rejected one redirects
/// back to the login form, the way DOMjudge answers a wrong password.
pub async fn mount_login(server: &MockServer, accepted: bool) {
    Mock::given(method("GET"))
        .and(path("/domjudge/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{SESSION_COOKIE}; Path=/").as_str())
                .set_body_string(LOGIN_PAGE),
        )
        .mount(server)
        .await;

    let landing = if accepted {
        "/domjudge/jury"
    } else {
        "/domjudge/login"
    };
    Mock::given(method("POST"))
        .and(path("/domjudge/login"))
        .and(body_string_contains("_username=jury"))
        .and(body_string_contains("_csrf_token=tok123"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", landing))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/domjudge/jury"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>jury</html>"))
        .mount(server)
        .await;
}
