pub mod bot_log;
pub mod contact_service;
pub mod email;
pub mod health_service;
