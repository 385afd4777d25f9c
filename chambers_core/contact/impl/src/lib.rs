use std::sync::Arc;

use chambers_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use chambers_di::Build;
use chambers_email_contracts::{ContentType, Email, EmailService};
use chambers_models::{contact::ContactSubmission, email_address::EmailAddress};
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub recipient: Arc<EmailAddress>,
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let email = Email {
            recipient: (*self.config.recipient).clone().into(),
            subject: format!("Contact Inquiry: {}", *submission.subject),
            body: render_body(&submission),
            content_type: ContentType::Text,
            reply_to: Some(submission.author.email.clone().into()),
        };

        // Transport errors are reported to the submitter the same way as a
        // rejected message; the cause only goes to the log.
        match self.email.send(email).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                error!("smtp transport rejected contact email");
                Err(ContactSendMessageError::Send)
            }
            Err(err) => {
                error!("Failed to send contact email: {err:#}");
                Err(ContactSendMessageError::Send)
            }
        }
    }
}

fn render_body(submission: &ContactSubmission) -> String {
    let phone_line = (!submission.author.phone.is_empty())
        .then(|| format!("Phone: {}\n", *submission.author.phone))
        .unwrap_or_default();

    format!(
        "Name: {}\nEmail: {}\n{}Subject: {}\n\nMessage:\n{}\n\nSent via the website contact form.",
        *submission.author.name,
        submission.author.email,
        phone_line,
        *submission.subject,
        *submission.content,
    )
}
