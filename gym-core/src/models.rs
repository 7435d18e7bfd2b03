mod form;
mod gym;
mod mentor;
mod product;
mod user;

pub use form::{FieldErrors, FormData, non_blank};
pub use gym::{GymData, GymRecord};
pub use mentor::{MentorData, MentorRecord, MentorRegistration};
pub use product::{
    PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS, ProductData, ProductFilter, ProductLookup, ProductPatch,
    ProductRecord,
};
pub use user::{MIN_PASSWORD_LENGTH, Registration, UserData, UserRecord};
