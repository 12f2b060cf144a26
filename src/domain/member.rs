use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::member_email::MemberEmail;
use crate::domain::member_name::MemberName;
use crate::domain::member_phone_number::MemberPhoneNumber;
use crate::domain::new_member::NewMember;

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: Uuid,
    pub name: MemberName,
    pub email: MemberEmail,
    pub phone_number: MemberPhoneNumber,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// A brand new record: fresh id, both audit timestamps set to `now`.
    pub fn create(new_member: NewMember, now: DateTime<Utc>) -> Member {
        Member {
            id: Uuid::new_v4(),
            name: new_member.name,
            email: new_member.email,
            phone_number: new_member.phone_number,
            active: new_member.active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the mutable fields. `id` and `created_at` never change.
    pub fn apply(&mut self, changes: NewMember, now: DateTime<Utc>) {
        self.name = changes.name;
        self.email = changes.email;
        self.phone_number = changes.phone_number;
        self.active = changes.active;
        self.updated_at = now;
    }
}

/// Wire representation of a member, without the audit timestamps.
#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub active: bool,
}

impl From<&Member> for MemberDto {
    fn from(member: &Member) -> Self {
        MemberDto {
            id: member.id,
            name: String::from(member.name.as_ref()),
            email: String::from(member.email.as_ref()),
            phone_number: String::from(member.phone_number.as_ref()),
            active: member.active,
        }
    }
}
