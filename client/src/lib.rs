pub mod error;
pub mod submit;

pub use error::{Error, Result};
pub use submit::{csrf_token_from_cookie_header, SubmitClient};
