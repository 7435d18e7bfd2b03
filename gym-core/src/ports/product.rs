use crate::models::{ProductData, ProductPatch, ProductRecord};

/// Repository interface for products.
///
/// The repository stores what it is given: checking that the admin is staff
/// and administers the gym is the caller's job, and happens before any of the
/// mutating methods here are invoked.
pub trait ProductRepository: super::Repository {
    /// Store a new product for `gym_id`, created by `admin_id`.
    fn create_product(
        &self,
        product_id: Self::ProductId,
        gym_id: Self::GymId,
        admin_id: Self::UserId,
        data: ProductData,
    ) -> impl Future<Output = Result<ProductRecord<Self>, Self::Error>> + Send;

    /// Get a product by id.
    fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self>>, Self::Error>> + Send;

    /// Get a product only if it was created by `admin_id` for `gym_id`.
    fn get_owned_product(
        &self,
        product_id: Self::ProductId,
        admin_id: Self::UserId,
        gym_id: Self::GymId,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self>>, Self::Error>> + Send;

    /// List products in creation order, optionally scoped to a gym, an admin,
    /// or both.
    fn list_products(
        &self,
        gym_id: Option<Self::GymId>,
        admin_id: Option<Self::UserId>,
    ) -> impl Future<Output = Result<Vec<ProductRecord<Self>>, Self::Error>> + Send;

    /// Apply a partial update.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) with the updated product
    /// - Ok(None) if no such product exists
    fn update_product(
        &self,
        product_id: Self::ProductId,
        patch: ProductPatch,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self>>, Self::Error>> + Send;

    /// Delete a product, returning whether one was deleted.
    fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
