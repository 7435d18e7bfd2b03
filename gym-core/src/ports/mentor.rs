use crate::models::{MentorData, MentorRecord};

/// Repository interface for mentors.
///
/// A mentor optionally belongs to a gym; deleting the gym deletes its mentors.
pub trait MentorRepository: super::Repository {
    /// Store a new mentor with an already hashed password.
    fn create_mentor(
        &self,
        mentor_id: Self::MentorId,
        gym_id: Option<Self::GymId>,
        data: MentorData,
        password_hash: String,
    ) -> impl Future<Output = Result<MentorRecord<Self>, Self::Error>> + Send;

    /// Get a mentor by id.
    fn get_mentor(
        &self,
        mentor_id: Self::MentorId,
    ) -> impl Future<Output = Result<Option<MentorRecord<Self>>, Self::Error>> + Send;

    /// List mentors in creation order, optionally restricted to one gym.
    fn list_mentors(
        &self,
        gym_id: Option<Self::GymId>,
    ) -> impl Future<Output = Result<Vec<MentorRecord<Self>>, Self::Error>> + Send;

    /// Delete a mentor, returning whether one was deleted.
    fn delete_mentor(
        &self,
        mentor_id: Self::MentorId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
