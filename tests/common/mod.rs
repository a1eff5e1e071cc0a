use std::sync::Arc;
use std::time::Duration;

use hotel_ulin::{create_app, AppState, Metrics, Repositories, RouterLimits};
use reqwest::Client;
use tokio::net::TcpListener;

pub const PUBLIC_BASE_URL: &str = "https://hotelulin.example";

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    pub repositories: Repositories,
}

impl TestEnvironment {
    /// Boot the real router over in-memory repositories on an ephemeral port
    pub async fn new() -> Self {
        Self::with_base_url(Some(PUBLIC_BASE_URL.to_string())).await
    }

    pub async fn with_base_url(public_base_url: Option<String>) -> Self {
        let repositories = Repositories::in_memory();
        let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));

        let app = create_app(
            AppState::new(&repositories, metrics, public_base_url),
            RouterLimits {
                request_timeout: Duration::from_secs(10),
                max_request_size: 64 * 1024,
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        Self {
            client: Client::new(),
            base_url,
            repositories,
        }
    }

    pub async fn seed_test_data(&self) {
        let report = self
            .repositories
            .seed_initializer()
            .run()
            .await
            .expect("Failed to seed test data");
        assert_eq!(report.rooms_created, 12);
        assert_eq!(report.menu_items_created, 12);
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
