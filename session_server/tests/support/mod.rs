// Shared bootstrap for the session server used by every integration test in a binary.
use std::{
    // `Arc` lets the server thread publish into a slot the test thread reads.
    sync::{Arc, OnceLock},
    // Polling intervals for both TCP readiness and session state.
    time::Duration,
};

// Base URL of the running session server, set once its port is known.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// Guards the bootstrap so a second test does not start a second session.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Start the session server on first use and return its base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        // The server thread writes its bound address here.
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // A plain OS thread with its own runtime keeps the session tick loop alive
        // after each `#[tokio::test]` runtime shuts down.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Ephemeral port so parallel test binaries never collide.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{addr}"));
                // Uses the demo layout; LEVEL_FILE is not set in tests.
                session_server::run(listener).await.expect("server failed");
            });
        });
        wait_for_listener(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Block until the URL is published and the socket accepts TCP connections.
fn wait_for_listener(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };
    let _ = SERVER_URL.set(base_url.clone());

    // Raw TCP connect needs host:port without the scheme.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("session server did not accept connections in time");
}

// Poll GET /status until the session reports `state`, returning the full status body.
pub async fn wait_for_state(
    client: &reqwest::Client,
    base_url: &str,
    state: &str,
) -> serde_json::Value {
    // 150 polls at 20ms covers an entry move plus a few scheduler hiccups.
    for _ in 0..150 {
        let status: serde_json::Value = client
            .get(format!("{base_url}/status"))
            .send()
            .await
            .expect("status request should succeed")
            .json()
            .await
            .expect("status should be json");
        if status["state"] == state {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("session never reached {state}");
}
