pub mod email;
pub mod honeypot;
pub mod submission;
