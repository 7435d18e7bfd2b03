use crate::models::{GymData, GymRecord};

/// Repository interface for gyms.
pub trait GymRepository: super::Repository {
    /// Create a gym, optionally administered by `admin_id`.
    fn create_gym(
        &self,
        gym_id: Self::GymId,
        admin_id: Option<Self::UserId>,
        data: GymData,
    ) -> impl Future<Output = Result<GymRecord<Self>, Self::Error>> + Send;

    /// Get a gym by id.
    fn get_gym(
        &self,
        gym_id: Self::GymId,
    ) -> impl Future<Output = Result<Option<GymRecord<Self>>, Self::Error>> + Send;

    /// List gyms in creation order, optionally restricted to one admin's.
    fn list_gyms(
        &self,
        admin_id: Option<Self::UserId>,
    ) -> impl Future<Output = Result<Vec<GymRecord<Self>>, Self::Error>> + Send;

    /// Delete a gym along with its mentors and products.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the gym existed and was deleted
    /// - Ok(false) if no such gym exists
    fn delete_gym(
        &self,
        gym_id: Self::GymId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
