//! portfolio-core
//!
//! Localization resolver and resilient HTTP client behind a portfolio site,
//! plus the contact form and language switcher built on them.

pub mod config;
pub mod contact;
pub mod http;
pub mod i18n;
pub mod locale;

#[cfg(test)]
mod test_utils;

pub use http::{
    Outcome,
    RequestClient,
};
pub use i18n::{
    Resolver,
    Translator,
};
