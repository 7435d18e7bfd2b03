use super::form::{FieldErrors, Fields, FormData};
use crate::ports::Repository;

/// Descriptive attributes of a gym.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GymData {
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Free-form description, possibly empty
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Contact phone number, possibly empty
    #[cfg_attr(feature = "serde", serde(default))]
    pub phone_number: String,
}

impl GymData {
    /// Validate a submitted gym form. `name` and `address` are required.
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(form);
        let name = fields.text("name", Some(100));
        let address = fields.text("address", Some(255));
        let description = fields.optional_text("description", None).flatten();
        let phone_number = fields.optional_text("phone_number", Some(20)).flatten();

        let (Some(name), Some(address)) = (name, address) else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        Ok(Self {
            name,
            address,
            description: description.unwrap_or_default(),
            phone_number: phone_number.unwrap_or_default(),
        })
    }
}

/// A stored gym and the admin who administers it.
#[cfg_attr(
    feature = "schemars",
    derive(schemars::JsonSchema),
    schemars(
        rename = "GymRecord",
        bound = "
            T::GymId: schemars::JsonSchema,
            T::UserId: schemars::JsonSchema,
        "
    )
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(bound(serialize = "
            T::GymId: serde::Serialize,
            T::UserId: serde::Serialize,
        "))
)]
pub struct GymRecord<T: Repository> {
    /// The unique identifier of the gym
    pub id: T::GymId,
    /// The administering admin, if any remains
    pub admin: Option<T::UserId>,
    /// The gym's attributes
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: GymData,
}

impl<T: Repository> GymRecord<T> {
    /// Whether the gym is administered by the given admin.
    pub fn is_administered_by(&self, admin_id: &T::UserId) -> bool {
        self.admin.as_ref() == Some(admin_id)
    }
}
