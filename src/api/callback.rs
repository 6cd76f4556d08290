use axum::{
    Extension, Form,
    http::{HeaderMap, StatusCode, header::ORIGIN},
    response::Html,
};
use serde::Deserialize;

use crate::types::{CallbackOrigin, CallbackSlot};

/// Served at the redirect URI. The token lives in the URL fragment, which
/// browsers never send to a server, so the page reads it, wipes it from the
/// address bar and posts it back to `/fragment`.
const CALLBACK_PAGE: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>spotstats</title>
  </head>
  <body>
    <div id="status"><h4>Completing login...</h4></div>
    <script>
      const fragment = window.location.hash.substring(1);
      history.replaceState(null, "", window.location.pathname + window.location.search);
      fetch("/fragment", {
        method: "POST",
        headers: { "Content-Type": "application/x-www-form-urlencoded" },
        body: new URLSearchParams({ fragment }).toString(),
      })
        .then((res) => res.text())
        .then((html) => { document.getElementById("status").innerHTML = html; })
        .catch(() => { document.getElementById("status").innerHTML = "<h4>Login failed.</h4>"; });
    </script>
  </body>
</html>
"#;

#[derive(Debug, Deserialize)]
pub struct FragmentForm {
    #[serde(default)]
    pub fragment: String,
}

pub async fn callback() -> Html<&'static str> {
    Html(CALLBACK_PAGE)
}

/// Accepts the fragment posted by the callback page.
///
/// Browsers attach `Origin` to every cross-site POST, so a request carrying a
/// foreign origin comes from some other page and is refused. Only the first
/// fragment is kept; later posts cannot replace it.
pub async fn fragment(
    Extension(slot): Extension<CallbackSlot>,
    Extension(origin): Extension<CallbackOrigin>,
    headers: HeaderMap,
    Form(form): Form<FragmentForm>,
) -> (StatusCode, Html<&'static str>) {
    if let Some(request_origin) = headers.get(ORIGIN) {
        if request_origin.as_bytes() != origin.0.as_bytes() {
            return (StatusCode::FORBIDDEN, Html("<h4>Foreign origin.</h4>"));
        }
    }

    let fragment = form.fragment.trim_start_matches('#');
    if fragment.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Missing access token.</h4>"),
        );
    }

    let mut lock = slot.lock().await;
    if lock.is_some() {
        return (StatusCode::CONFLICT, Html("<h4>Login already received.</h4>"));
    }
    *lock = Some(fragment.to_string());
    (
        StatusCode::OK,
        Html("<h2>Login received.</h2><p>Close browser window.</p>"),
    )
}
