use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{member::Member, new_member::FieldError, new_member::NewMember};
use crate::repository::{MemberRepository, RepositoryError};

/// Member use cases. Every operation is a single round trip (or read then write)
/// against the repository.
#[derive(Clone)]
pub struct MemberService {
    repository: Arc<dyn MemberRepository>,
}

impl MemberService {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(name = "Finding all members", skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Member>, MemberError> {
        Ok(self.repository.find_all_sorted_by_name().await?)
    }

    #[tracing::instrument(name = "Finding member by id", skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Member, MemberError> {
        let member_id = parse_member_id(id)?;

        self.repository
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| MemberError::not_found_by_id(id))
    }

    #[tracing::instrument(name = "Finding member by email", skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Member, MemberError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| MemberError::NotFound {
                field: "email",
                value: String::from(email),
            })
    }

    #[tracing::instrument(
        name = "Creating new member",
        skip(self, new_member),
        fields(member_email = %new_member.email.as_ref())
    )]
    pub async fn create(&self, new_member: NewMember) -> Result<Member, MemberError> {
        if self.email_exists(new_member.email.as_ref()).await? {
            tracing::error!("Email already exists: {}", new_member.email.as_ref());
            return Err(MemberError::Conflict(String::from(new_member.email.as_ref())));
        }

        let member = Member::create(new_member, Utc::now());

        self.repository.insert(&member).await?;
        tracing::info!("Member created with id: {}", member.id);

        Ok(member)
    }

    #[tracing::instrument(name = "Updating member", skip(self, changes))]
    pub async fn update(&self, id: &str, changes: NewMember) -> Result<Member, MemberError> {
        let mut member = self.get_by_id(id).await?;

        if member.email != changes.email && self.email_exists(changes.email.as_ref()).await? {
            tracing::error!(
                "Cannot update member. Email already exists: {}",
                changes.email.as_ref()
            );
            return Err(MemberError::Conflict(String::from(changes.email.as_ref())));
        }

        member.apply(changes, Utc::now());

        if !self.repository.update(&member).await? {
            // Deleted between the read and the write
            return Err(MemberError::not_found_by_id(id));
        }
        tracing::info!("Member updated: {}", member.id);

        Ok(member)
    }

    #[tracing::instrument(name = "Deleting member", skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), MemberError> {
        let member_id = parse_member_id(id)?;

        if !self.repository.delete_by_id(member_id).await? {
            tracing::error!("Cannot delete. Member not found with id: {}", id);
            return Err(MemberError::not_found_by_id(id));
        }
        tracing::info!("Member deleted with id: {}", id);

        Ok(())
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, MemberError> {
        Ok(self.repository.exists_by_email(email).await?)
    }
}

/// Ids are UUIDs, anything else cannot name a stored member.
fn parse_member_id(id: &str) -> Result<Uuid, MemberError> {
    Uuid::parse_str(id).map_err(|_| MemberError::not_found_by_id(id))
}

#[derive(thiserror::Error)]
pub enum MemberError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("Email already exists: {0}")]
    Conflict(String),
    #[error("Member not found with {field}: {value}")]
    NotFound { field: &'static str, value: String },
    #[error("Failed to access the members store.")]
    Unexpected(#[source] RepositoryError),
}

impl MemberError {
    fn not_found_by_id(id: &str) -> Self {
        MemberError::NotFound {
            field: "id",
            value: String::from(id),
        }
    }
}

impl From<RepositoryError> for MemberError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateEmail(email) => MemberError::Conflict(email),
            err => MemberError::Unexpected(err),
        }
    }
}

impl std::fmt::Debug for MemberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberError::Unexpected(err) => write!(f, "{}\nCaused by:\n\t{:?}", self, err),
            _ => write!(f, "{}", self),
        }
    }
}
