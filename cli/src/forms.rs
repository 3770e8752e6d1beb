//! Client-side form checks run before anything is sent to the backend.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use quill::net::types::NewUser;

/// Registration form as entered, before validation.
#[derive(Debug, Default, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: Option<String>,
}

impl RegistrationForm {
    /// Check the form and build the registration payload.
    ///
    /// # Errors
    ///
    /// Returns the first failed rule as a display message.
    pub fn validate(self) -> Result<NewUser, String> {
        if [&self.username, &self.email, &self.password, &self.confirm_password]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err("All fields are required".to_owned());
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_owned());
        }
        if self.password.chars().count() < 8 {
            return Err("Password must be at least 8 characters long".to_owned());
        }
        if !self.password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err("Password must contain at least one uppercase letter".to_owned());
        }
        if !self.password.chars().any(|c| c.is_ascii_digit()) {
            return Err("Password must contain at least one digit".to_owned());
        }
        if !looks_like_email(&self.email) {
            return Err("Please enter a valid email address".to_owned());
        }

        Ok(NewUser {
            email: self.email,
            username: self.username,
            password: self.password,
            full_name: self.full_name.filter(|name| !name.is_empty()),
            bio: None,
        })
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Title and content are mandatory for both new and edited posts.
///
/// # Errors
///
/// Returns a display message when either is blank.
pub fn require_post_fields(title: &str, content: &str) -> Result<(), String> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err("Please fill in all required fields.".to_owned());
    }
    Ok(())
}
