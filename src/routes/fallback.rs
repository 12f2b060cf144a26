use actix_web::HttpResponse;

use crate::routes::ErrorBody;

pub const MEMBER_SERVICE_UNAVAILABLE: &str =
    "Member Service is currently unavailable. Please try again later.";

/// Static 503 answered whenever the member service cannot be reached.
pub fn member_service_unavailable() -> HttpResponse {
    tracing::warn!("Fallback triggered for member-service");

    HttpResponse::ServiceUnavailable().json(ErrorBody::new(String::from(
        MEMBER_SERVICE_UNAVAILABLE,
    )))
}

#[tracing::instrument(name = "Member service fallback handler")]
pub async fn handle_member_service_fallback() -> HttpResponse {
    member_service_unavailable()
}
