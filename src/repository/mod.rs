use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::member::Member;

mod in_memory;
mod postgres;

pub use in_memory::InMemoryMemberRepository;
pub use postgres::PostgresMemberRepository;

/// Storage port for member records. Adapters must reject a second record
/// with an email already in use by returning `RepositoryError::DuplicateEmail`.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, RepositoryError>;

    async fn find_all_sorted_by_name(&self) -> Result<Vec<Member>, RepositoryError>;

    async fn insert(&self, member: &Member) -> Result<(), RepositoryError>;

    /// Returns `false` when no record with `member.id` exists.
    async fn update(&self, member: &Member) -> Result<bool, RepositoryError>;

    /// Returns `false` when no record with `id` exists.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;
}

#[derive(thiserror::Error)]
pub enum RepositoryError {
    #[error("A member with email {0} already exists.")]
    DuplicateEmail(String),
    #[error("Failed to query the members table.")]
    Database(#[from] sqlx::Error),
}

impl std::fmt::Debug for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::Database(err) => {
                write!(f, "{}\nCaused by:\n\t{:?}", self, err)
            }
            RepositoryError::DuplicateEmail(_) => write!(f, "{}", self),
        }
    }
}
