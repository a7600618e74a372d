#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub)]
use std::sync::{Arc, Once};
use tokio::net::TcpListener;
use userbase::AppBuilder;
use userbase::api::{MgmtState, app_router, mgmt_router};
use userbase::config::{
    AuthConfig, Config, DatabaseConfig, HealthConfig, LogFormat, ServerConfig, TelemetryConfig,
};
use userbase::services::user_store::UserStore;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("userbase=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

pub fn get_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mgmt_port: 0,
            shutdown_timeout_secs: 1,
        },
        database: DatabaseConfig {
            url: std::env::var("DATABASE_URL").ok(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 60,
            max_lifetime_secs: 300,
        },
        auth: AuthConfig { jwt_secret: "test_secret".to_string(), token_ttl_secs: 3600 },
        health: HealthConfig { store_timeout_ms: 500 },
        telemetry: TelemetryConfig { log_format: LogFormat::Text },
    }
}

pub struct TestApp {
    pub config: Config,
    pub client: reqwest::Client,
    pub server_url: String,
    pub mgmt_url: String,
}

impl TestApp {
    /// Serves the API and management routers on ephemeral ports, backed by the in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(get_test_config(), AppBuilder::new(get_test_config())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn UserStore>) -> Self {
        Self::spawn_with(get_test_config(), AppBuilder::new(get_test_config()).with_store(store)).await
    }

    pub async fn spawn_with(config: Config, builder: AppBuilder) -> Self {
        setup_tracing();
        let app = builder.build();

        let api_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let router = app_router(app.services);
        let mgmt = mgmt_router(MgmtState { health_service: app.health_service });

        tokio::spawn(async move { axum::serve(api_listener, router).await.unwrap() });
        tokio::spawn(async move { axum::serve(mgmt_listener, mgmt).await.unwrap() });

        Self { config, client: reqwest::Client::new(), server_url, mgmt_url }
    }

    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/v1/users", self.server_url))
            .json(&serde_json::json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .unwrap()
    }

    /// Authenticates and returns the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let resp = self
            .client
            .post(format!("{}/v1/users/authenticate", self.server_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = resp.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}_{}@example.com", &uuid::Uuid::new_v4().simple().to_string()[..8])
}
