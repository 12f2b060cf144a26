use validator::validate_email;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MemberEmail(String);

impl MemberEmail {
    pub fn parse(email: String) -> Result<MemberEmail, String> {
        if email.is_empty() {
            return Err(String::from("must not be empty"));
        }

        if !validate_email(&email) {
            return Err(String::from("must be a well-formed email address"));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for MemberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
