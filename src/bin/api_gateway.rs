use member_service::config::get_configuration;
use member_service::startup::Gateway;
use member_service::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(
        String::from("api_gateway"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration().expect("Missing configuration file.");
    let gateway = Gateway::build(config.clone()).await?;

    tracing::info!(
        "Gateway listening on port {}, forwarding to {}",
        gateway.get_port(),
        config.gateway.get_member_service_url()
    );

    gateway.run_until_stop().await
}
