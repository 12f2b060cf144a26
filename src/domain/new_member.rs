use serde::{Deserialize, Serialize};

use crate::domain::member_email::MemberEmail;
use crate::domain::member_name::MemberName;
use crate::domain::member_phone_number::MemberPhoneNumber;

const MUST_NOT_BE_NULL: &str = "must not be null";

/// Validated input shared by the create and update operations.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: MemberName,
    pub email: MemberEmail,
    pub phone_number: MemberPhoneNumber,
    pub active: bool,
}

/// Member payload as it arrives on the wire. Any `id` sent by the client is ignored.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

fn default_active() -> bool {
    true
}

fn parse_field<T>(
    field: &'static str,
    value: Option<String>,
    parse: fn(String) -> Result<T, String>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let result = match value {
        Some(value) => parse(value),
        None => Err(String::from(MUST_NOT_BE_NULL)),
    };

    match result {
        Ok(parsed) => Some(parsed),
        Err(message) => {
            errors.push(FieldError { field, message });
            None
        }
    }
}

impl TryFrom<MemberBody> for NewMember {
    type Error = Vec<FieldError>;

    /// Every field is checked so the client gets all of its mistakes at once.
    fn try_from(body: MemberBody) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let name = parse_field("name", body.name, MemberName::parse, &mut errors);
        let email = parse_field("email", body.email, MemberEmail::parse, &mut errors);
        let phone_number = parse_field(
            "phoneNumber",
            body.phone_number,
            MemberPhoneNumber::parse,
            &mut errors,
        );

        match (name, email, phone_number) {
            (Some(name), Some(email), Some(phone_number)) => Ok(NewMember {
                name,
                email,
                phone_number,
                active: body.active,
            }),
            _ => Err(errors),
        }
    }
}
