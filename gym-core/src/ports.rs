mod gym;
mod mentor;
mod product;
mod user;

pub use gym::GymRepository;
pub use mentor::MentorRepository;
pub use product::ProductRepository;
pub use user::{UserFailure, UserRepository};

/// The base trait every backend implements, naming the concrete types it uses
/// for identifiers and timestamps.
///
/// Identifiers are opaque to the core: a backend is free to choose any
/// representation, so long as values can be cloned and compared.
pub trait Repository: Sized {
    /// The backend's error type
    type Error: std::error::Error + Send + Sync + 'static;
    /// The representation of a point in time
    type DateTime: Clone + Send + Sync + 'static;
    /// Identifies a user (admin or otherwise)
    type UserId: Clone + PartialEq + Send + Sync + 'static;
    /// Identifies a gym
    type GymId: Clone + PartialEq + Send + Sync + 'static;
    /// Identifies a mentor
    type MentorId: Clone + PartialEq + Send + Sync + 'static;
    /// Identifies a product
    type ProductId: Clone + PartialEq + Send + Sync + 'static;
}

/// An application ties a concrete repository to the policies an API needs:
/// the current time and how identifiers are generated.
pub trait Application {
    /// The storage backend
    type Repository: UserRepository + GymRepository + MentorRepository + ProductRepository;

    /// Access the storage backend
    fn database(&self) -> &Self::Repository;

    /// The current time, as the backend represents it
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Generate the identifier for a new user
    fn generate_user_id(
        &self,
        data: &crate::models::UserData,
    ) -> <Self::Repository as Repository>::UserId;

    /// Generate the identifier for a new gym
    fn generate_gym_id(
        &self,
        data: &crate::models::GymData,
    ) -> <Self::Repository as Repository>::GymId;

    /// Generate the identifier for a new mentor
    fn generate_mentor_id(
        &self,
        data: &crate::models::MentorData,
    ) -> <Self::Repository as Repository>::MentorId;

    /// Generate the identifier for a new product
    fn generate_product_id(
        &self,
        data: &crate::models::ProductData,
    ) -> <Self::Repository as Repository>::ProductId;
}
