//! Landlord registration form. The auth provider itself is an external collaborator; this
//! module only prepares and checks what gets sent to it.

use serde::{Deserialize, Serialize};

use crate::listings::validation::is_phone_formatted;

const MIN_PASSWORD_LEN: usize = 6;

/// Only landlords register; tenants browse anonymously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Landlord,
}

impl AccountRole {
    /// Read-only label on the profile settings dialog.
    pub const fn label(self) -> &'static str {
        match self {
            AccountRole::Landlord => "Mwenye Nyumba/Mpangisha",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignUpDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Profile metadata stored alongside the auth user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpMetadata {
    pub full_name: String,
    pub phone: String,
    pub user_type: AccountRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub metadata: SignUpMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignUpError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("phone number is not valid")]
    InvalidPhone,
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    WeakPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl SignUpError {
    pub const fn user_message(&self) -> &'static str {
        match self {
            SignUpError::Missing(_) => "Tafadhali jaza sehemu zote",
            SignUpError::InvalidEmail => "Barua pepe si sahihi",
            SignUpError::InvalidPhone => "Nambari ya simu si sahihi",
            SignUpError::WeakPassword => "Nywila ni fupi mno",
            SignUpError::PasswordMismatch => "Nywila hazifanani",
        }
    }
}

impl SignUpDraft {
    /// Produce the request for the auth provider. The role is always landlord regardless of
    /// how the user reached the page.
    pub fn into_request(self) -> Result<SignUpRequest, SignUpError> {
        let full_name = self.full_name.trim().to_string();
        let email = self.email.trim().to_ascii_lowercase();
        let phone = self.phone.trim().to_string();

        if full_name.is_empty() {
            return Err(SignUpError::Missing("full_name"));
        }
        if email.is_empty() {
            return Err(SignUpError::Missing("email"));
        }
        if !looks_like_email(&email) {
            return Err(SignUpError::InvalidEmail);
        }
        if !phone.is_empty() && !is_phone_formatted(&phone) {
            return Err(SignUpError::InvalidPhone);
        }
        if self.password.is_empty() {
            return Err(SignUpError::Missing("password"));
        }
        if self.password != self.confirm_password {
            return Err(SignUpError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SignUpError::WeakPassword);
        }

        Ok(SignUpRequest {
            email,
            password: self.password,
            metadata: SignUpMetadata {
                full_name,
                phone,
                user_type: AccountRole::Landlord,
            },
        })
    }
}

/// Profile settings dialog. `user_type` is carried for display only and never applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub full_name: String,
    pub phone: String,
    pub user_type: String,
}

/// Profile fields written back to the auth provider's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: String,
    pub user_type: AccountRole,
}

impl ProfileDraft {
    pub fn into_update(self) -> Result<ProfileUpdate, SignUpError> {
        let full_name = self.full_name.trim().to_string();
        let phone = self.phone.trim().to_string();

        if full_name.is_empty() {
            return Err(SignUpError::Missing("full_name"));
        }
        if phone.is_empty() {
            return Err(SignUpError::Missing("phone"));
        }
        if !is_phone_formatted(&phone) {
            return Err(SignUpError::InvalidPhone);
        }

        Ok(ProfileUpdate {
            full_name,
            phone,
            user_type: AccountRole::Landlord,
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SignUpDraft {
        SignUpDraft {
            full_name: "Amina Juma".to_string(),
            email: " Amina@Example.co.tz ".to_string(),
            phone: "+255712345678".to_string(),
            password: "siri-kali".to_string(),
            confirm_password: "siri-kali".to_string(),
        }
    }

    #[test]
    fn registration_is_always_landlord() {
        let request = draft().into_request().expect("valid sign up");

        assert_eq!(request.email, "amina@example.co.tz");
        assert_eq!(request.metadata.user_type, AccountRole::Landlord);

        let json = serde_json::to_value(&request).expect("serializes");
        assert_eq!(json["metadata"]["user_type"], "landlord");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn rejects_mismatched_passwords() {
        let mut draft = draft();
        draft.confirm_password = "siri-nyingine".to_string();
        assert_eq!(draft.into_request(), Err(SignUpError::PasswordMismatch));
    }

    #[test]
    fn rejects_missing_and_malformed_fields() {
        let mut missing_name = draft();
        missing_name.full_name = "  ".to_string();
        assert_eq!(missing_name.into_request(), Err(SignUpError::Missing("full_name")));

        let mut bad_email = draft();
        bad_email.email = "amina.example.com".to_string();
        assert_eq!(bad_email.into_request(), Err(SignUpError::InvalidEmail));

        let mut short = draft();
        short.password = "abc".to_string();
        short.confirm_password = "abc".to_string();
        let err = short.into_request().expect_err("weak password");
        assert_eq!(err.user_message(), "Nywila ni fupi mno");
    }

    fn profile() -> ProfileDraft {
        ProfileDraft {
            full_name: " Baraka Mwakyusa ".to_string(),
            phone: "0754 000 111".to_string(),
            user_type: "tenant".to_string(),
        }
    }

    #[test]
    fn profile_update_keeps_landlord_role() {
        let update = profile().into_update().expect("valid profile");

        assert_eq!(update.full_name, "Baraka Mwakyusa");
        assert_eq!(update.phone, "0754 000 111");
        assert_eq!(update.user_type, AccountRole::Landlord);
        assert_eq!(update.user_type.label(), "Mwenye Nyumba/Mpangisha");
    }

    #[test]
    fn profile_requires_name_and_phone() {
        let mut missing_name = profile();
        missing_name.full_name = "   ".to_string();
        assert_eq!(missing_name.into_update(), Err(SignUpError::Missing("full_name")));

        let mut missing_phone = profile();
        missing_phone.phone = String::new();
        assert_eq!(missing_phone.into_update(), Err(SignUpError::Missing("phone")));
    }

    #[test]
    fn profile_rejects_malformed_phone() {
        let mut bad_phone = profile();
        bad_phone.phone = "simu yangu".to_string();
        let err = bad_phone.into_update().expect_err("bad phone");

        assert_eq!(err, SignUpError::InvalidPhone);
        assert_eq!(err.user_message(), "Nambari ya simu si sahihi");
    }
}
