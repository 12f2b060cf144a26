use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::member_client::MemberServiceClient;
use crate::routes::fallback::member_service_unavailable;

pub const GATEWAY_PREFIX: &str = "/api";

#[tracing::instrument(
    name = "Forward a request to the member service",
    skip(request, body, member_client),
    fields(
        method = %request.method(),
        path = %request.path()
    )
)]
pub async fn handle_proxy_to_member_service(
    request: HttpRequest,
    body: web::Bytes,
    member_client: web::Data<MemberServiceClient>,
) -> HttpResponse {
    // The raw path keeps percent-encoding intact for the member service
    let path = request.path();
    let mut path_and_query = String::from(path.strip_prefix(GATEWAY_PREFIX).unwrap_or(path));

    if !request.query_string().is_empty() {
        path_and_query.push('?');
        path_and_query.push_str(request.query_string());
    }

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    match member_client
        .forward(
            request.method().clone(),
            &path_and_query,
            content_type,
            body,
        )
        .await
    {
        Ok(downstream) => {
            let mut response = HttpResponse::build(downstream.status);

            if let Some(content_type) = downstream.content_type {
                response.insert_header((header::CONTENT_TYPE, content_type));
            }

            response.body(downstream.body)
        }
        Err(err) => {
            tracing::error!("Failed to reach the member service: {:?}", err);
            member_service_unavailable()
        }
    }
}
