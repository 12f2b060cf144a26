mod fallback;
mod health_check;
mod members;
mod proxy;

pub use fallback::*;
pub use health_check::*;
pub use members::*;
pub use proxy::*;

use crate::domain::new_member::FieldError;

/// JSON error payload shared by the member service and the gateway.
#[derive(serde::Serialize, Debug)]
pub struct ErrorBody<'a> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a [FieldError]>,
}

impl<'a> ErrorBody<'a> {
    pub fn new(message: String) -> Self {
        ErrorBody {
            status: "error",
            message,
            errors: None,
        }
    }

    pub fn with_errors(message: String, errors: &'a [FieldError]) -> Self {
        ErrorBody {
            status: "error",
            message,
            errors: Some(errors),
        }
    }
}
