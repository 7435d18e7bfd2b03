use crate::models::{UserData, UserRecord};

/// Ways a user write can fail without the backend itself failing.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum UserFailure {
    /// Another user already has the requested username
    #[error("A user with that username already exists.")]
    UsernameTaken,
}

/// Repository interface for registered users.
///
/// Admins are simply users with the staff flag set; [`get_admin`] is the
/// lookup every privileged operation goes through, and it treats a
/// non-staff user exactly like a missing one.
///
/// [`get_admin`]: UserRepository::get_admin
pub trait UserRepository: super::Repository {
    /// Store a new user with an already hashed password.
    fn create_user(
        &self,
        user_id: Self::UserId,
        data: UserData,
        password_hash: String,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<UserRecord<Self>, UserFailure>, Self::Error>> + Send;

    /// Get any user by id.
    fn get_user(
        &self,
        user_id: Self::UserId,
    ) -> impl Future<Output = Result<Option<UserRecord<Self>>, Self::Error>> + Send;

    /// Get a user by id only if they have staff privileges.
    fn get_admin(
        &self,
        admin_id: Self::UserId,
    ) -> impl Future<Output = Result<Option<UserRecord<Self>>, Self::Error>> + Send;
}
