use serde::{Deserialize, Deserializer, Serialize};

use super::{require_text, BaseModel, Entity, ValidationError, ValidationResult};
use crate::auth::password::PasswordHash;

const MAX_NAME_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseModel,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: PasswordHash,
    pub is_admin: bool,
}

/// Registration payload. The clear password only lives until it is hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "UserPatchBody")]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
    /// The body carried an `email` or `password` key, even one set to null.
    pub credentials_sent: bool,
}

impl UserPatch {
    pub fn touches_credentials(&self) -> bool {
        self.credentials_sent || self.email.is_some() || self.password.is_some()
    }
}

/// Wire form of [`UserPatch`]; the outer `Option` records key presence.
#[derive(Deserialize)]
struct UserPatchBody {
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    password: Option<Option<String>>,
    is_admin: Option<bool>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<String>>, D::Error> {
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UserPatchBody> for UserPatch {
    fn from(body: UserPatchBody) -> Self {
        Self {
            credentials_sent: body.email.is_some() || body.password.is_some(),
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email.flatten(),
            password: body.password.flatten(),
            is_admin: body.is_admin,
        }
    }
}

impl User {
    pub fn new(input: NewUser) -> ValidationResult<Self> {
        let email = normalize_email(&input.email);
        Self::validate(&input.first_name, &input.last_name, &email)?;
        validate_password(&input.password)?;

        Ok(Self {
            base: BaseModel::new(),
            first_name: input.first_name,
            last_name: input.last_name,
            email,
            password: PasswordHash::new(&input.password),
            is_admin: input.is_admin,
        })
    }

    pub fn validate(first_name: &str, last_name: &str, email: &str) -> ValidationResult {
        require_text(first_name, MAX_NAME_CHARS, "First name")?;
        require_text(last_name, MAX_NAME_CHARS, "Last name")?;
        validate_email(email)
    }

    /// Merge a patch into a candidate copy and commit it only if the whole
    /// record is still valid.
    pub fn update(&mut self, patch: UserPatch) -> ValidationResult {
        let mut candidate = self.clone();
        if let Some(first_name) = patch.first_name {
            candidate.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            candidate.last_name = last_name;
        }
        if let Some(email) = patch.email {
            candidate.email = normalize_email(&email);
        }
        if let Some(is_admin) = patch.is_admin {
            candidate.is_admin = is_admin;
        }
        Self::validate(&candidate.first_name, &candidate.last_name, &candidate.email)?;
        if let Some(password) = patch.password {
            validate_password(&password)?;
            candidate.password = PasswordHash::new(&password);
        }

        candidate.base.touch();
        *self = candidate;
        Ok(())
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.password.verify(password)
    }
}

impl Entity for User {
    fn base(&self) -> &BaseModel {
        &self.base
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> ValidationResult {
    let invalid = || ValidationError::new("Invalid email format");

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return Err(ValidationError::new("Password must be provided"));
    }
    Ok(())
}
