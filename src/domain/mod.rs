pub mod member;
pub mod member_email;
pub mod member_name;
pub mod member_phone_number;
pub mod new_member;
