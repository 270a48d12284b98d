use crate::domain::submission::Submission;
use serde::Serialize;

const FALLBACK_SUBJECT: &str = "New message";

/// Outbound message in the shape the provider's message-creation endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl EmailMessage {
    /// Renders a validated submission. Replies go straight to the submitter so the
    /// private recipient never has to be disclosed.
    #[must_use]
    pub fn for_submission(submission: &Submission, from: &str, recipient: &str) -> Self {
        let subject = if submission.subject.is_empty() { FALLBACK_SUBJECT } else { &submission.subject };

        Self {
            from: from.to_string(),
            to: vec![recipient.to_string()],
            reply_to: submission.email.clone(),
            subject: format!("[Contact] {subject} — {}", submission.name),
            text: render_text(&submission.name, &submission.email, subject, &submission.message),
            html: render_html(&submission.name, &submission.email, subject, &submission.message),
        }
    }
}

fn render_text(name: &str, email: &str, subject: &str, message: &str) -> String {
    format!("Name:    {name}\nEmail:   {email}\nSubject: {subject}\n\n{message}")
}

fn render_html(name: &str, email: &str, subject: &str, message: &str) -> String {
    let name = escape_html(name);
    let email = escape_html(email);
    let subject = escape_html(subject);
    let message = escape_html(message);

    format!(
        concat!(
            r#"<div style="font-family: sans-serif; max-width: 600px; padding: 24px; border: 1px solid #eee;">"#,
            r#"<h2 style="color: #111; border-bottom: 2px solid #eee; padding-bottom: 12px; margin-top: 0;">New Contact Form Message</h2>"#,
            r#"<table style="width: 100%; border-collapse: collapse; margin-bottom: 20px;">"#,
            r#"<tr><td style="padding: 8px 0; color: #666; width: 80px;"><strong>Name</strong></td><td style="padding: 8px 0;">{name}</td></tr>"#,
            r#"<tr><td style="padding: 8px 0; color: #666;"><strong>Email</strong></td><td style="padding: 8px 0;"><a href="mailto:{email}" style="color: #0070f3;">{email}</a></td></tr>"#,
            r#"<tr><td style="padding: 8px 0; color: #666;"><strong>Subject</strong></td><td style="padding: 8px 0;">{subject}</td></tr>"#,
            "</table>",
            r#"<div style="background: #f9f9f9; border-left: 4px solid #0070f3; padding: 16px; border-radius: 4px;"><p style="margin: 0; white-space: pre-wrap; color: #333;">{message}</p></div>"#,
            r#"<p style="margin-top: 20px; font-size: 12px; color: #999;">Sent from the CrackingWall contact form. Reply to this email to respond to {name}</p>"#,
            "</div>",
        ),
        name = name,
        email = email,
        subject = subject,
        message = message,
    )
}

/// Escapes the characters that are significant in HTML text and attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
