use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::domain::member::Member;
use crate::repository::{MemberRepository, RepositoryError};

/// Process-local store with the same uniqueness guarantees as the members table.
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<HashMap<Uuid, Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn members(&self) -> MutexGuard<'_, HashMap<Uuid, Member>> {
        // A panic while holding the lock cannot leave a half-written member behind
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn email_taken_by_other(members: &HashMap<Uuid, Member>, member: &Member) -> bool {
    members
        .values()
        .any(|stored| stored.id != member.id && stored.email == member.email)
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, RepositoryError> {
        Ok(self.members().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, RepositoryError> {
        Ok(self
            .members()
            .values()
            .find(|member| member.email.as_ref() == email)
            .cloned())
    }

    async fn find_all_sorted_by_name(&self) -> Result<Vec<Member>, RepositoryError> {
        let mut members: Vec<Member> = self.members().values().cloned().collect();

        members.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));

        Ok(members)
    }

    async fn insert(&self, member: &Member) -> Result<(), RepositoryError> {
        let mut members = self.members();

        if email_taken_by_other(&members, member) {
            return Err(RepositoryError::DuplicateEmail(String::from(
                member.email.as_ref(),
            )));
        }

        members.insert(member.id, member.clone());

        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<bool, RepositoryError> {
        let mut members = self.members();

        if !members.contains_key(&member.id) {
            return Ok(false);
        }

        if email_taken_by_other(&members, member) {
            return Err(RepositoryError::DuplicateEmail(String::from(
                member.email.as_ref(),
            )));
        }

        members.insert(member.id, member.clone());

        Ok(true)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.members().remove(&id).is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self
            .members()
            .values()
            .any(|member| member.email.as_ref() == email))
    }
}
