// src/services/contact.rs

//! Contact form submission.

use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::http::{create_async_client, post_json};

/// A contact form submission. All fields are required.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactMessage {
    /// Validate required fields, in form order.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("請輸入姓名"));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::validation("請輸入電子郵件"));
        }
        if self.phone.trim().is_empty() {
            return Err(AppError::validation("請輸入電話號碼"));
        }
        if self.message.trim().is_empty() {
            return Err(AppError::validation("請輸入訊息內容"));
        }
        Ok(())
    }
}

/// Service for the contact form endpoint.
pub struct ContactForm {
    config: Arc<Config>,
    client: Client,
}

impl ContactForm {
    /// Create a new contact form client with the given configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = create_async_client(&config.client)?;
        Ok(Self { config, client })
    }

    /// Validate and submit a message.
    pub async fn submit(&self, message: &ContactMessage) -> Result<()> {
        message.validate()?;
        post_json(&self.client, &self.config.contact_url(), message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactMessage {
        ContactMessage {
            name: "陳大文".to_string(),
            email: "tai@example.com".to_string(),
            phone: "65721493".to_string(),
            message: "我想查詢有關幼鋒會及前鋒會的資料。".to_string(),
        }
    }

    #[test]
    fn validate_accepts_filled_form() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_fields_in_form_order() {
        let mut message = filled();
        message.name = "  ".to_string();
        message.email = String::new();
        // Name is reported first even when several fields are blank.
        let error = message.validate().unwrap_err();
        assert!(error.to_string().contains("姓名"));

        let mut message = filled();
        message.message = String::new();
        let error = message.validate().unwrap_err();
        assert!(error.to_string().contains("訊息"));
    }
}
