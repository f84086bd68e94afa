//! Server rejection to user message mapping.
//!
//! The API reports validation failures as free text in the status message
//! (e.g. `Bad Request: data/title must NOT have more than 128 characters`).
//! Each form matches that text against the fragments it knows about, in a
//! fixed order, and shows a curated message. Order matters: more specific
//! fragments (`data/title`, `email must match format`) are checked before the
//! generic ones they contain.

use super::ClientError;

/// The form whose submission produced the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    CreatePetition,
    EditPetition,
    Login,
    Register,
    EditProfile,
    /// Search bar on the explore screen; shows the raw status text.
    Explore,
    /// Support dialog on the petition screen; shows the raw status text.
    Support,
}

/// Map a server rejection to the message shown for `form`.
///
/// Returns `None` when no known fragment matches.
pub fn classify_rejection(form: FormKind, status: u16, status_text: &str) -> Option<String> {
    let text = status_text;
    let message = match form {
        FormKind::Explore | FormKind::Support => {
            return (!text.trim().is_empty()).then(|| text.to_string());
        }
        FormKind::CreatePetition => {
            if status == 403 {
                "Petition title already exists, please choose a different one"
            } else if text.contains("categoryId") {
                "Category is a required field"
            } else if text.contains("data/title") {
                "Title must be between 1 and 128 characters long"
            } else if text.contains("data/description") {
                "Description must be between 1 and 1024 characters long"
            } else if text.contains("unique titles") {
                "Support tiers must have unique titles"
            } else if text.contains("title") {
                "Tier title must be between 1 and 128 characters long"
            } else if text.contains("description") {
                "Tier description must be between 1 and 1024 characters long"
            } else if text.contains("cost") {
                "Cost is required and must be a positive integer"
            } else {
                return None;
            }
        }
        FormKind::EditPetition => {
            if status == 403 {
                "Petition title already exists, please choose a different one"
            } else if text.contains("categoryId") {
                "Category is a required field"
            } else if text.contains("data/title") {
                "Title must be between 1 and 128 characters long"
            } else if text.contains("data/description") {
                "Description must be between 1 and 1024 characters long"
            } else {
                return None;
            }
        }
        FormKind::Login => {
            if status == 401 {
                "Incorrect email or password"
            } else if text.contains("email must match format") {
                "Email must be of the form 'adam@example.com'"
            } else if text.contains("email") {
                "Email must be between 1 and 256 characters long"
            } else if text.contains("password") {
                "Password must be between 6 and 64 characters long"
            } else {
                return None;
            }
        }
        FormKind::Register => {
            if status == 403 {
                "Email already in use"
            } else if text.contains("firstName") {
                "First name must be between 1 and 64 characters long"
            } else if text.contains("lastName") {
                "Last name must be between 1 and 64 characters long"
            } else if text.contains("email must match format") {
                "Email must be of the form 'adam@example.com'"
            } else if text.contains("email") {
                "Email must be between 1 and 256 characters long"
            } else if text.contains("password") {
                "Password must be between 6 and 64 characters long"
            } else {
                return None;
            }
        }
        FormKind::EditProfile => {
            if status == 401 || text.contains("Incorrect currentPassword") {
                "Your current password is incorrect"
            } else if text.contains("Email already in use") {
                "Email already in use"
            } else if text.contains("firstName") {
                "First name must be between 1 and 64 characters long"
            } else if text.contains("lastName") {
                "Last name must be between 1 and 64 characters long"
            } else if text.contains("email must match format") {
                "Email must be of the form 'adam@example.com'"
            } else if text.contains("email") {
                "Email must be between 1 and 256 characters long"
            } else if text.contains("New password can not be the same as old password") {
                return Some(text.to_string());
            } else if text.contains("currentPassword") {
                "Current password must be between 6 and 64 characters long"
            } else if text.contains("password") {
                "Password must be between 6 and 64 characters long"
            } else {
                return None;
            }
        }
    };
    Some(message.to_string())
}

/// The banner message for an error raised while submitting `form`.
///
/// Validation errors carry their own text; server rejections go through
/// [`classify_rejection`]. Anything else has no user-facing message.
pub fn user_message(form: FormKind, error: &ClientError) -> Option<String> {
    match error {
        ClientError::Validation(v) => Some(v.to_string()),
        ClientError::Forbidden(msg) => Some(msg.clone()),
        ClientError::Rejected {
            status,
            status_text,
        } => classify_rejection(form, *status, status_text),
        _ => None,
    }
}
