use chambers_models::contact::ContactSubmissionDraft;
use serde::Deserialize;

/// The contact form payload as posted by the website. Field checks happen in
/// [`chambers_models::contact::ContactSubmission::validate`], not during
/// deserialization, so that the first violated rule is reported.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactSubmission {
    /// Full name of the sender
    pub name: String,
    /// Email address replies should go to
    pub email: String,
    /// Optional phone number
    pub phone: Option<String>,
    /// Subject of the message
    pub subject: String,
    /// Content of the message
    pub message: String,
}

impl From<ApiContactSubmission> for ContactSubmissionDraft {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            message: value.message,
        }
    }
}
