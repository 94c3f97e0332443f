/**
 * Routes Module
 * API route handlers
 */

pub mod analytics;
pub mod auth;
pub mod contact;
pub mod extract;
pub mod health;
pub mod projects;
pub mod settings;
pub mod skills;
pub mod social_links;
pub mod visitors;

use serde::{Deserialize, Serialize};

/// `{ "message": "..." }` acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
