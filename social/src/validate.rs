//! Form validation for auth, community, post, comment, and payment inputs.
//!
//! Each validator returns `Err(message)` with the text shown under the field.
//! Lengths count characters, not bytes.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub type Validation = Result<(), &'static str>;

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Email field check used by the login and register forms.
pub fn validate_email(email: &str) -> Validation {
    if email.is_empty() {
        return Err("Email is required");
    }
    if !is_valid_email(email) {
        return Err("Invalid email format");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Validation {
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number");
    }
    Ok(())
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Validation {
    if password == confirmation { Ok(()) } else { Err("Passwords do not match") }
}

pub fn validate_username(username: &str) -> Validation {
    if username.is_empty() {
        return Err("Username is required");
    }
    let len = username.chars().count();
    if len < 3 {
        return Err("Username must be at least 3 characters");
    }
    if len > 30 {
        return Err("Username must be less than 30 characters");
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username can only contain letters, numbers, and underscores");
    }
    Ok(())
}

/// Shared shape of the required + bounded-length text validators.
struct LengthRule {
    min: usize,
    max: usize,
    required: &'static str,
    too_short: &'static str,
    too_long: &'static str,
}

impl LengthRule {
    fn check(&self, value: &str) -> Validation {
        if value.is_empty() {
            return Err(self.required);
        }
        let len = value.chars().count();
        if len < self.min {
            return Err(self.too_short);
        }
        if len > self.max {
            return Err(self.too_long);
        }
        Ok(())
    }
}

const COMMUNITY_NAME: LengthRule = LengthRule {
    min: 3,
    max: 50,
    required: "Community name is required",
    too_short: "Community name must be at least 3 characters",
    too_long: "Community name must be less than 50 characters",
};

const POST_TITLE: LengthRule = LengthRule {
    min: 5,
    max: 100,
    required: "Post title is required",
    too_short: "Post title must be at least 5 characters",
    too_long: "Post title must be less than 100 characters",
};

const POST_CONTENT: LengthRule = LengthRule {
    min: 10,
    max: 5000,
    required: "Post content is required",
    too_short: "Post content must be at least 10 characters",
    too_long: "Post content must be less than 5000 characters",
};

const COMMENT_CONTENT: LengthRule = LengthRule {
    min: 2,
    max: 1000,
    required: "Comment content is required",
    too_short: "Comment content must be at least 2 characters",
    too_long: "Comment content must be less than 1000 characters",
};

pub fn validate_community_name(name: &str) -> Validation {
    COMMUNITY_NAME.check(name)
}

pub fn validate_post_title(title: &str) -> Validation {
    POST_TITLE.check(title)
}

pub fn validate_post_content(content: &str) -> Validation {
    POST_CONTENT.check(content)
}

pub fn validate_comment_content(content: &str) -> Validation {
    COMMENT_CONTENT.check(content)
}

/// Amount in minor units; `None` models an empty amount field.
pub fn validate_payment_amount(amount: Option<i64>) -> Validation {
    match amount {
        None => Err("Payment amount is required"),
        Some(a) if a <= 0 => Err("Payment amount must be a positive number"),
        Some(_) => Ok(()),
    }
}
