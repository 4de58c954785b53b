pub mod expiry;
pub mod guard;
pub mod token;

pub use expiry::{check_expiration, ExpiryCheck, ExpiryWatcher, Navigator, SharedNavigator};
pub use guard::{Admission, AuthGuard, Grant, HOME_PATH, LOGIN_PATH};
pub use token::{decode_claims, expiration, is_expired_at, TokenError};
