//! Client-side validation.
//!
//! Mirrors the server's rules so that obviously invalid forms fail before any
//! request is sent. Lengths are counted in characters.

use std::collections::HashSet;

use crate::draft::{PetitionDraft, TierDraft};
use crate::errors::ValidationError;
use crate::models::{TierRequest, MAX_TIERS};

pub const MAX_TITLE_CHARS: usize = 128;
pub const MAX_DESCRIPTION_CHARS: usize = 1024;
pub const MAX_NAME_CHARS: usize = 64;
pub const MAX_EMAIL_CHARS: usize = 256;
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_PASSWORD_CHARS: usize = 64;

fn within(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if within(title, 1, MAX_TITLE_CHARS) {
        Ok(())
    } else {
        Err(ValidationError::TitleLength)
    }
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if within(description, 1, MAX_DESCRIPTION_CHARS) {
        Ok(())
    } else {
        Err(ValidationError::DescriptionLength)
    }
}

/// Parse a cost field: ASCII digits only, no sign, no decimals.
pub fn parse_cost(cost: &str) -> Result<u32, ValidationError> {
    if cost.is_empty() || !cost.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::TierCost);
    }
    cost.parse().map_err(|_| ValidationError::TierCost)
}

/// Parse the optional max-cost search filter. Blank means no filter.
pub fn parse_max_cost(max_cost: &str) -> Result<Option<u32>, ValidationError> {
    let trimmed = max_cost.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_cost(trimmed)
        .map(Some)
        .map_err(|_| ValidationError::MaxCost)
}

/// Validate one tier and build its request body.
pub fn validate_tier(tier: &TierDraft) -> Result<TierRequest, ValidationError> {
    if !within(&tier.title, 1, MAX_TITLE_CHARS) {
        return Err(ValidationError::TierTitleLength);
    }
    if !within(&tier.description, 1, MAX_DESCRIPTION_CHARS) {
        return Err(ValidationError::TierDescriptionLength);
    }
    let cost = parse_cost(&tier.cost)?;
    Ok(TierRequest {
        title: tier.title.clone(),
        description: tier.description.clone(),
        cost,
    })
}

/// Validate a tier list.
///
/// Supported tiers are not re-validated (they can not change) but still take
/// part in the case-insensitive title uniqueness check.
pub fn validate_tiers(tiers: &[TierDraft]) -> Result<(), ValidationError> {
    if tiers.is_empty() {
        return Err(ValidationError::NoTiers);
    }
    if tiers.len() > MAX_TIERS {
        return Err(ValidationError::TooManyTiers);
    }

    let mut titles = HashSet::new();
    for tier in tiers {
        if !tier.has_support {
            validate_tier(tier)?;
        }
        if !titles.insert(tier.title.to_lowercase()) {
            return Err(ValidationError::DuplicateTierTitle);
        }
    }
    Ok(())
}

/// Validate a whole petition form.
pub fn validate_petition(draft: &PetitionDraft) -> Result<(), ValidationError> {
    validate_title(&draft.title)?;
    validate_description(&draft.description)?;
    if draft.category_id.is_none() {
        return Err(ValidationError::CategoryRequired);
    }
    validate_tiers(draft.tiers())
}

pub fn validate_first_name(name: &str) -> Result<(), ValidationError> {
    if within(name, 1, MAX_NAME_CHARS) {
        Ok(())
    } else {
        Err(ValidationError::FirstNameLength)
    }
}

pub fn validate_last_name(name: &str) -> Result<(), ValidationError> {
    if within(name, 1, MAX_NAME_CHARS) {
        Ok(())
    } else {
        Err(ValidationError::LastNameLength)
    }
}

/// Length check, then a `local@domain.tld` shape check.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !within(email, 1, MAX_EMAIL_CHARS) {
        return Err(ValidationError::EmailLength);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::EmailFormat);
    };
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) || !domain_ok
    {
        return Err(ValidationError::EmailFormat);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if within(password, MIN_PASSWORD_CHARS, MAX_PASSWORD_CHARS) {
        Ok(())
    } else {
        Err(ValidationError::PasswordLength)
    }
}

pub fn validate_current_password(password: &str) -> Result<(), ValidationError> {
    if within(password, MIN_PASSWORD_CHARS, MAX_PASSWORD_CHARS) {
        Ok(())
    } else {
        Err(ValidationError::CurrentPasswordLength)
    }
}
