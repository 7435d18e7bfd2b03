use super::form::{FieldErrors, Fields, FormData};
use crate::ports::Repository;

/// A mentor's public profile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MentorData {
    /// Login name
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// The mentor's area of expertise, e.g. "yoga" or "strength"
    pub expertise: String,
    /// Contact email address
    pub email: String,
    /// Contact phone number
    pub phone_number: String,
}

/// A validated mentor submission: the profile plus the password to hash.
#[derive(Debug, Clone)]
pub struct MentorRegistration {
    /// The profile to store
    pub mentor: MentorData,
    /// The submitted password
    pub password: String,
}

impl MentorRegistration {
    /// Validate a submitted mentor form. Every field is required.
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(form);
        let username = fields.text("username", Some(50));
        let first_name = fields.text("first_name", Some(50));
        let last_name = fields.text("last_name", Some(50));
        let expertise = fields.text("expertise", Some(50));
        let email = fields.email("email", 254);
        let password = fields.text("password", Some(200));
        let phone_number = fields.text("phone_number", Some(20));

        let (
            Some(username),
            Some(first_name),
            Some(last_name),
            Some(expertise),
            Some(email),
            Some(password),
            Some(phone_number),
        ) = (
            username,
            first_name,
            last_name,
            expertise,
            email,
            password,
            phone_number,
        )
        else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        Ok(Self {
            mentor: MentorData {
                username,
                first_name,
                last_name,
                expertise,
                email,
                phone_number,
            },
            password,
        })
    }
}

/// A stored mentor and the gym they belong to.
#[cfg_attr(
    feature = "schemars",
    derive(schemars::JsonSchema),
    schemars(
        rename = "MentorRecord",
        bound = "
            T::MentorId: schemars::JsonSchema,
            T::GymId: schemars::JsonSchema,
        "
    )
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(bound(serialize = "
            T::MentorId: serde::Serialize,
            T::GymId: serde::Serialize,
        "))
)]
pub struct MentorRecord<T: Repository> {
    /// The unique identifier of the mentor
    pub id: T::MentorId,
    /// The gym the mentor works at, if any
    pub gym: Option<T::GymId>,
    /// The mentor's profile
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: MentorData,
}
