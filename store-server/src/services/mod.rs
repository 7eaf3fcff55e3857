//! External services

mod mailer;

pub use mailer::*;
