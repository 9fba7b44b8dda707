//! Email and password authentication.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{
    hash_password, validate_sign_up, verify_password, verify_unknown_account, SignUp,
    MIN_PASSWORD_LEN,
};
#[cfg(feature = "server")]
pub use session::{current_owner, require_owner, sign_in_session, SESSION_USER_ID_KEY};
