use actix_web::dev::Server;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::member_client::MemberServiceClient;
use crate::member_service::MemberService;
use crate::repository::{MemberRepository, PostgresMemberRepository};
use crate::routes::{
    handle_create_member, handle_delete_member, handle_get_all_members,
    handle_get_member_by_email, handle_get_member_by_id, handle_member_service_fallback,
    handle_proxy_to_member_service, handle_update_member, health_check, ErrorBody,
    GATEWAY_PREFIX,
};

/// The member service HTTP server.
pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let db_pool = get_connection_db_pool(&config.database);
        let repository = Arc::new(PostgresMemberRepository::new(db_pool));

        Self::build_with_repository(&config, repository)
    }

    /// Same server, backed by whatever repository the caller provides.
    pub fn build_with_repository(
        config: &Settings,
        repository: Arc<dyn MemberRepository>,
    ) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, MemberService::new(repository))?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    member_service: MemberService,
) -> Result<Server, std::io::Error> {
    let member_service = web::Data::new(member_service);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/members")
                    .route("", web::get().to(handle_get_all_members))
                    .route("", web::post().to(handle_create_member))
                    .route("/email/{email}", web::get().to(handle_get_member_by_email))
                    .route("/{id}", web::get().to(handle_get_member_by_id))
                    .route("/{id}", web::put().to(handle_update_member))
                    .route("/{id}", web::delete().to(handle_delete_member)),
            )
            .app_data(member_service.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// The gateway sitting in front of the member service.
pub struct Gateway {
    pub port: u16,
    pub server: Server,
}

impl Gateway {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let member_client = MemberServiceClient::new(
            config.gateway.get_member_service_url(),
            Some(config.gateway.get_timeout()),
        )
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

        let listener = TcpListener::bind(config.get_gateway_address())?;
        let port = listener.local_addr()?.port();
        let server = run_gateway(listener, member_client)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run_gateway(
    listener: TcpListener,
    member_client: MemberServiceClient,
) -> Result<Server, std::io::Error> {
    let member_client = web::Data::new(member_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route(
                "/fallback/member-service",
                web::get().to(handle_member_service_fallback),
            )
            .route(
                &format!("{}/{{tail:.*}}", GATEWAY_PREFIX),
                web::route().to(handle_proxy_to_member_service),
            )
            .app_data(member_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Pool<Postgres> {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}

/// Malformed JSON bodies get the same error payload as every other 400.
fn json_error_handler(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));

    InternalError::from_response(err, response).into()
}
