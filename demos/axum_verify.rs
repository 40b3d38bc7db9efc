use std::net::SocketAddr;

use axum::{Extension, Router, routing::get};
use flask_session_cookie::{FlaskSessionConfig, FlaskSessionLayer, SessionCookie};

async fn index(Extension(session): Extension<SessionCookie>) -> String {
    match session {
        SessionCookie::Verified { cookie, key_index } => {
            let data: serde_json::Value = cookie.payload_json().unwrap_or_default();
            format!("verified with key #{key_index}: {data}")
        }
        SessionCookie::Unverified(cookie) => format!("bad signature ({})", cookie.algorithm()),
        SessionCookie::Rejected => "not a flask session".to_string(),
        SessionCookie::Missing => "no session".to_string(),
    }
}

#[tokio::main]
async fn main() {
    let session_config = FlaskSessionConfig::default()
        // Default: "session"
        .with_name("session")
        // Tried in order; the first match wins.
        .with_secret_keys(["current-secret", "previous-secret"])
        // Default: false
        .with_clear_on_reject(false)
        // Default: 4096
        .with_max_cookie_bytes(4096);
    let session_layer = FlaskSessionLayer::new().with_config(session_config);

    let app = Router::new().route("/", get(index)).layer(session_layer);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("tcp listener binds successfully");
    let local_addr = listener.local_addr().expect("local address is available");
    println!("listening at http://{local_addr}");

    axum::serve(listener, app)
        .await
        .expect("server runs successfully");
}
