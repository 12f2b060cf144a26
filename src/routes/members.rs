use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};

use crate::domain::{
    member::MemberDto,
    new_member::{MemberBody, NewMember},
};
use crate::member_service::{MemberError, MemberService};
use crate::routes::ErrorBody;

#[tracing::instrument(name = "Get all members handler", skip(member_service))]
pub async fn handle_get_all_members(
    member_service: web::Data<MemberService>,
) -> Result<HttpResponse, MemberError> {
    let members = member_service.list_all().await?;
    let body: Vec<MemberDto> = members.iter().map(MemberDto::from).collect();

    Ok(HttpResponse::Ok().json(body))
}

#[tracing::instrument(
    name = "Get member by id handler",
    skip(path, member_service),
    fields(member_id = %path)
)]
pub async fn handle_get_member_by_id(
    path: web::Path<String>,
    member_service: web::Data<MemberService>,
) -> Result<HttpResponse, MemberError> {
    let member = member_service.get_by_id(&path).await?;

    Ok(HttpResponse::Ok().json(MemberDto::from(&member)))
}

#[tracing::instrument(
    name = "Get member by email handler",
    skip(path, member_service),
    fields(member_email = %path)
)]
pub async fn handle_get_member_by_email(
    path: web::Path<String>,
    member_service: web::Data<MemberService>,
) -> Result<HttpResponse, MemberError> {
    let member = member_service.get_by_email(&path).await?;

    Ok(HttpResponse::Ok().json(MemberDto::from(&member)))
}

#[tracing::instrument(
    name = "Create member handler",
    skip(body, member_service),
    fields(member_email = ?body.email)
)]
pub async fn handle_create_member(
    body: web::Json<MemberBody>,
    member_service: web::Data<MemberService>,
) -> Result<HttpResponse, MemberError> {
    let new_member: NewMember = body
        .into_inner()
        .try_into()
        .map_err(MemberError::Validation)?;
    let member = member_service.create(new_member).await?;

    Ok(HttpResponse::Created().json(MemberDto::from(&member)))
}

#[tracing::instrument(
    name = "Update member handler",
    skip(path, body, member_service),
    fields(member_id = %path)
)]
pub async fn handle_update_member(
    path: web::Path<String>,
    body: web::Json<MemberBody>,
    member_service: web::Data<MemberService>,
) -> Result<HttpResponse, MemberError> {
    let changes: NewMember = body
        .into_inner()
        .try_into()
        .map_err(MemberError::Validation)?;
    let member = member_service.update(&path, changes).await?;

    Ok(HttpResponse::Ok().json(MemberDto::from(&member)))
}

#[tracing::instrument(
    name = "Delete member handler",
    skip(path, member_service),
    fields(member_id = %path)
)]
pub async fn handle_delete_member(
    path: web::Path<String>,
    member_service: web::Data<MemberService>,
) -> Result<HttpResponse, MemberError> {
    member_service.delete(&path).await?;

    Ok(HttpResponse::NoContent().finish())
}

impl ResponseError for MemberError {
    fn status_code(&self) -> StatusCode {
        match self {
            MemberError::Validation(_) => StatusCode::BAD_REQUEST,
            MemberError::Conflict(_) => StatusCode::BAD_REQUEST,
            MemberError::NotFound { .. } => StatusCode::NOT_FOUND,
            MemberError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            MemberError::Validation(errors) => ErrorBody::with_errors(self.to_string(), errors),
            _ => ErrorBody::new(self.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
