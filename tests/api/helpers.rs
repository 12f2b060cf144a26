use reqwest::Response;
use std::net::TcpListener;
use std::sync::{Arc, Once};

use member_service::{
    config::get_configuration,
    repository::InMemoryMemberRepository,
    startup::{Application, Gateway},
    telemetry::{get_subscriber, init_subscriber},
};

static TRACING: Once = Once::new();

// Logs are only printed when TEST_LOG is set, e.g. `TEST_LOG=true cargo test | bunyan`
fn init_tracing() {
    TRACING.call_once(|| {
        let name = String::from("test");
        let env_filter = String::from("debug");

        if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(get_subscriber(name, env_filter, std::io::stdout));
        } else {
            init_subscriber(get_subscriber(name, env_filter, std::io::sink));
        }
    });
}

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        init_tracing();

        let mut config = get_configuration().expect("Missing configuration file.");

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);

        let application =
            Application::build_with_repository(&config, Arc::new(InMemoryMemberRepository::new()))
                .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    pub async fn get_members(&self) -> Response {
        self.api_client
            .get(format!("{}/members", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_member(&self, id: &str) -> Response {
        self.api_client
            .get(format!("{}/members/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_member_by_email(&self, email: &str) -> Response {
        self.api_client
            .get(format!("{}/members/email/{}", self.address, email))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_member(&self, body: &serde_json::Value) -> Response {
        self.api_client
            .post(format!("{}/members", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_member(&self, id: &str, body: &serde_json::Value) -> Response {
        self.api_client
            .put(format!("{}/members/{}", self.address, id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_member(&self, id: &str) -> Response {
        self.api_client
            .delete(format!("{}/members/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Creates a member and returns its generated id.
    pub async fn create_member(&self, name: &str, email: &str) -> String {
        let response = self
            .post_member(&member_body(name, email))
            .await
            .error_for_status()
            .expect("Failed to create member.");
        let created: serde_json::Value = response.json().await.unwrap();

        created["id"].as_str().unwrap().to_string()
    }
}

pub struct TestGateway {
    pub address: String,
}

impl TestGateway {
    pub async fn spawn_gateway(member_service_url: String) -> TestGateway {
        init_tracing();

        let mut config = get_configuration().expect("Missing configuration file.");

        config.set_gateway_port(0);
        config.set_member_service_url(member_service_url);
        config.gateway.timeout_milliseconds = 500;

        let gateway = Gateway::build(config)
            .await
            .expect("Failed to build gateway.");
        let address = format!("http://127.0.0.1:{}", gateway.get_port());

        tokio::spawn(gateway.run_until_stop());

        TestGateway { address }
    }
}

/// An address nothing listens on: bind a random port and release it straight away.
pub fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    drop(listener);

    format!("http://127.0.0.1:{}", port)
}

pub fn member_body(name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "phoneNumber": "1234567890"
    })
}
