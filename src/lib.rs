//! Daily email digest of bot-authored pull request reviews.
//!
//! One run lists every repository of an organization, keeps the pull
//! requests created today or yesterday (UTC) that a designated bot account
//! reviewed, renders the reviews into an HTML report and emails it.

pub mod config;
pub mod digest;
pub mod error;
pub mod mail;
pub mod platform;
pub mod render;
pub mod workflow;
