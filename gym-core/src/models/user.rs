use super::form::{FieldErrors, Fields, FormData};
use crate::ports::Repository;

/// The profile of a registered user.
///
/// Staff users are the administrators of gyms and the only accounts allowed
/// to manage products.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserData {
    /// A unique login name
    pub username: String,
    /// Contact email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Whether the user is an administrator
    pub is_staff: bool,
}

/// A stored user. The password hash never leaves the repository.
#[cfg_attr(
    feature = "schemars",
    derive(schemars::JsonSchema),
    schemars(
        rename = "UserRecord",
        bound = "
            T::DateTime: schemars::JsonSchema,
            T::UserId: schemars::JsonSchema,
        "
    )
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(bound(serialize = "
            T::DateTime: serde::Serialize,
            T::UserId: serde::Serialize,
        "))
)]
pub struct UserRecord<T: Repository> {
    /// The unique identifier of the user
    pub id: T::UserId,
    /// The user's profile
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: UserData,
    /// When the user registered
    pub date_joined: T::DateTime,
}

/// A validated registration request: the profile plus the plain-text password
/// that the caller is expected to hash before storage.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The profile to store
    pub user: UserData,
    /// The submitted password
    pub password: String,
}

/// The minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

impl Registration {
    /// Validate a submitted registration form.
    ///
    /// `username`, `email`, and `password` are required; names may be blank;
    /// `is_staff` defaults to false.
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(form);
        let username = fields.text("username", Some(150));
        let email = fields.email("email", 254);
        let first_name = fields.optional_text("first_name", Some(150)).flatten();
        let last_name = fields.optional_text("last_name", Some(150)).flatten();
        let password = fields.text("password", Some(128));
        let is_staff = fields.flag("is_staff").unwrap_or(false);

        if let Some(password) = &password {
            if password.chars().count() < MIN_PASSWORD_LENGTH {
                fields.error(
                    "password",
                    format!(
                        "This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters."
                    ),
                );
            }
        }
        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        Ok(Self {
            user: UserData {
                username,
                email,
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
                is_staff,
            },
            password,
        })
    }
}
