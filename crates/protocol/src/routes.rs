//! Endpoint paths of the activities API
//!
//! Names and emails are encoded with the `encodeURIComponent` set so the
//! server sees the same bytes a browser form would send.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const ACTIVITIES: &str = "/activities";

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// `POST` target for signing `email` up to `activity`
pub fn signup(activity: &str, email: &str) -> String {
    format!(
        "{ACTIVITIES}/{}/signup?email={}",
        encode_component(activity),
        encode_component(email)
    )
}

/// `DELETE` target for removing `email` from `activity`
pub fn participant(activity: &str, email: &str) -> String {
    format!(
        "{ACTIVITIES}/{}/participant/{}",
        encode_component(activity),
        encode_component(email)
    )
}

/// Join a configured API base with an endpoint path
pub fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
