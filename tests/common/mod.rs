#![allow(dead_code)]

use reqwest::Client;
use std::sync::Once;

static INIT: Once = Once::new();

fn init_env() {
    INIT.call_once(|| {
        // Strip any ambient SMTP configuration so valid submissions hit the
        // configuration error path instead of the network.
        for key in [
            "SMTP_HOST",
            "SMTP_PORT",
            "SMTP_SECURE",
            "SMTP_USER",
            "SMTP_PASSWORD",
            "CONTACT_FORM_RECIPIENT",
            "CAREERS_FORM_RECIPIENT",
        ] {
            std::env::remove_var(key);
        }
    });
}

pub struct TestApp {
    pub addr: String,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.addr, path)
    }
}

pub async fn spawn_app() -> TestApp {
    init_env();

    let app = axum::Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .merge(anoka_api::routes::create_routes())
        .layer(axum::middleware::from_fn(
            anoka_api::middleware::security_headers_middleware,
        ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        client: Client::new(),
    }
}
