const MIN_DIGITS: usize = 10;
const MAX_DIGITS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MemberPhoneNumber(String);

impl MemberPhoneNumber {
    pub fn parse(phone_number: String) -> Result<MemberPhoneNumber, String> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&phone_number.len()) {
            return Err(format!(
                "size must be between {} and {}",
                MIN_DIGITS, MAX_DIGITS
            ));
        }

        if !phone_number.chars().all(|char| char.is_ascii_digit()) {
            return Err(format!(
                "numeric value out of bounds (<{} digits>.<0 digits> expected)",
                MAX_DIGITS
            ));
        }

        Ok(Self(phone_number))
    }
}

impl AsRef<str> for MemberPhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
