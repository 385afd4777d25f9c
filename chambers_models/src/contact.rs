use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A contact form submission that has passed all field checks.
///
/// Instances only exist as the output of [`ContactSubmission::validate`]; they
/// are handed to the notifier and dropped afterwards, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub author: ContactAuthor,
    pub subject: ContactSubject,
    pub content: ContactContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAuthor {
    pub name: ContactName,
    pub email: EmailAddress,
    pub phone: ContactPhone,
}

#[nutype(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

/// The phone field is optional and not trimmed; whitespace is part of its
/// allowed character set.
#[nutype(
    validate(len_char_max = 20, regex = PHONE_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactPhone(String);

pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+0-9\s\-()]*$").unwrap());

#[nutype(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 200),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactSubject(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactContent(String);

const MAX_EMAIL_LENGTH: usize = 254;

/// The contact form payload as it arrives on the wire, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactSubmissionDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactValidateError {
    #[error("Name is required.")]
    NameMissing,
    #[error("Name must be at most 100 characters.")]
    NameTooLong,
    #[error("Email is required.")]
    EmailMissing,
    #[error("Email must be at most 254 characters.")]
    EmailTooLong,
    #[error("Email address is invalid.")]
    EmailInvalid,
    #[error("Phone must be at most 20 characters.")]
    PhoneTooLong,
    #[error("Phone number contains invalid characters.")]
    PhoneInvalid,
    #[error("Subject is required.")]
    SubjectMissing,
    #[error("Subject must be at most 200 characters.")]
    SubjectTooLong,
    #[error("Message is required.")]
    MessageMissing,
    #[error("Message must be at most 5000 characters.")]
    MessageTooLong,
}

impl ContactSubmission {
    /// Checks the draft field by field (name, email, phone, subject, message)
    /// and stops at the first violated rule. No side effects.
    pub fn validate(draft: ContactSubmissionDraft) -> Result<Self, ContactValidateError> {
        let name = ContactName::try_new(draft.name).map_err(|err| match err {
            ContactNameError::LenCharMinViolated => ContactValidateError::NameMissing,
            ContactNameError::LenCharMaxViolated => ContactValidateError::NameTooLong,
        })?;

        let email = validate_email(&draft.email)?;

        let phone = ContactPhone::try_new(draft.phone.unwrap_or_default()).map_err(|err| {
            match err {
                ContactPhoneError::LenCharMaxViolated => ContactValidateError::PhoneTooLong,
                ContactPhoneError::RegexViolated => ContactValidateError::PhoneInvalid,
            }
        })?;

        let subject = ContactSubject::try_new(draft.subject).map_err(|err| match err {
            ContactSubjectError::LenCharMinViolated => ContactValidateError::SubjectMissing,
            ContactSubjectError::LenCharMaxViolated => ContactValidateError::SubjectTooLong,
        })?;

        let content = ContactContent::try_new(draft.message).map_err(|err| match err {
            ContactContentError::LenCharMinViolated => ContactValidateError::MessageMissing,
            ContactContentError::LenCharMaxViolated => ContactValidateError::MessageTooLong,
        })?;

        Ok(Self {
            author: ContactAuthor { name, email, phone },
            subject,
            content,
        })
    }
}

fn validate_email(raw: &str) -> Result<EmailAddress, ContactValidateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ContactValidateError::EmailMissing);
    }
    if trimmed.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ContactValidateError::EmailTooLong);
    }
    trimmed
        .parse()
        .map_err(|_| ContactValidateError::EmailInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ContactSubmissionDraft {
        ContactSubmissionDraft {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: None,
            subject: "Inquiry".into(),
            message: "Hello".into(),
        }
    }

    #[test]
    fn ok() {
        let submission = ContactSubmission::validate(draft()).unwrap();

        assert_eq!(*submission.author.name, "Jane Doe");
        assert_eq!(submission.author.email.as_str(), "jane@example.com");
        assert_eq!(*submission.author.phone, "");
        assert_eq!(*submission.subject, "Inquiry");
        assert_eq!(*submission.content, "Hello");
    }

    #[test]
    fn ok_trims_fields() {
        let submission = ContactSubmission::validate(ContactSubmissionDraft {
            name: "  Jane Doe  ".into(),
            email: " jane@example.com ".into(),
            subject: " Inquiry ".into(),
            message: " Hello ".into(),
            ..draft()
        })
        .unwrap();

        assert_eq!(*submission.author.name, "Jane Doe");
        assert_eq!(submission.author.email.as_str(), "jane@example.com");
        assert_eq!(*submission.subject, "Inquiry");
        assert_eq!(*submission.content, "Hello");
    }

    #[test]
    fn ok_phone_present() {
        let submission = ContactSubmission::validate(ContactSubmissionDraft {
            phone: Some("+49 (0) 123-456".into()),
            ..draft()
        })
        .unwrap();

        assert_eq!(*submission.author.phone, "+49 (0) 123-456");
    }

    #[test]
    fn name_missing() {
        for name in ["", "   "] {
            let result = ContactSubmission::validate(ContactSubmissionDraft {
                name: name.into(),
                ..draft()
            });
            assert_eq!(result, Err(ContactValidateError::NameMissing));
        }
    }

    #[test]
    fn name_too_long() {
        assert_eq!(
            *ContactName::try_new("x".repeat(100)).unwrap(),
            "x".repeat(100)
        );

        let result = ContactSubmission::validate(ContactSubmissionDraft {
            name: "x".repeat(101),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::NameTooLong));
    }

    #[test]
    fn email_missing() {
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            email: "  ".into(),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::EmailMissing));
    }

    #[test]
    fn email_too_long() {
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            email: format!("{}@example.com", "x".repeat(250)),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::EmailTooLong));
    }

    #[test]
    fn email_invalid() {
        for email in ["not-an-email", "foo@", "@example.com", "a b@example.com"] {
            let result = ContactSubmission::validate(ContactSubmissionDraft {
                email: email.into(),
                ..draft()
            });
            assert_eq!(result, Err(ContactValidateError::EmailInvalid), "{email}");
        }
    }

    #[test]
    fn phone_too_long() {
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            phone: Some("0".repeat(21)),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::PhoneTooLong));
    }

    #[test]
    fn phone_invalid_characters() {
        for phone in ["abc", "123#456", "12.34"] {
            let result = ContactSubmission::validate(ContactSubmissionDraft {
                phone: Some(phone.into()),
                ..draft()
            });
            assert_eq!(result, Err(ContactValidateError::PhoneInvalid), "{phone}");
        }
    }

    #[test]
    fn phone_length_checked_before_characters() {
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            phone: Some("x".repeat(21)),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::PhoneTooLong));
    }

    #[test]
    fn subject_missing() {
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            subject: "".into(),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::SubjectMissing));
    }

    #[test]
    fn subject_too_long() {
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            subject: "x".repeat(201),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::SubjectTooLong));
    }

    #[test]
    fn message_missing() {
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            message: " \n ".into(),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::MessageMissing));
    }

    #[test]
    fn message_too_long() {
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            message: "x".repeat(5001),
            ..draft()
        });
        assert_eq!(result, Err(ContactValidateError::MessageTooLong));
    }

    #[test]
    fn first_violation_wins() {
        // every field is invalid, the name rule fires first
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            name: "".into(),
            email: "nope".into(),
            phone: Some("abc".into()),
            subject: "".into(),
            message: "".into(),
        });
        assert_eq!(result, Err(ContactValidateError::NameMissing));

        // with a valid name, the email rule is next
        let result = ContactSubmission::validate(ContactSubmissionDraft {
            name: "Jane".into(),
            email: "nope".into(),
            phone: Some("abc".into()),
            subject: "".into(),
            message: "".into(),
        });
        assert_eq!(result, Err(ContactValidateError::EmailInvalid));
    }

    #[test]
    fn draft_deserializes_without_phone() {
        let draft: ContactSubmissionDraft = serde_json::from_value(serde_json::json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "subject": "Inquiry",
            "message": "Hello",
        }))
        .unwrap();

        assert_eq!(draft.phone, None);
        ContactSubmission::validate(draft).unwrap();
    }
}
