use crate::{
    ApiApplication,
    error::ApiError,
    ownership::{GYM_NOT_ADMINISTERED, PRODUCT_NOT_FOUND, optional_id, require_admin, require_gym},
    params::QueryParams,
};
use axum::{Json, extract::State};
use gym_core::{
    models::{ProductFilter, ProductLookup, ProductRecord},
    ports::{ProductRepository as _, Repository},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Optional filters for querying products. Blank values are ignored.
#[derive(Deserialize, JsonSchema)]
pub(crate) struct ProductQuery {
    /// Restrict to the products of this gym
    gym_id: Option<String>,
    /// Together with `gym_id`, restrict to the products this admin created
    admin: Option<String>,
    /// Select exactly this product
    product_id: Option<String>,
}

/// Either the single product asked for, or a list.
#[derive(Serialize, JsonSchema)]
#[serde(untagged, bound = "ProductRecord<R>: Serialize")]
#[schemars(bound = "ProductRecord<R>: JsonSchema", rename = "ProductQueryResponse")]
pub(crate) enum ProductQueryResponse<R: Repository> {
    /// The product named by `product_id`
    One(ProductRecord<R>),
    /// Every product matching the filters, oldest first
    Many(Vec<ProductRecord<R>>),
}

pub(crate) async fn query_products<T: ApiApplication>(
    State(app): State<T>,
    QueryParams(query): QueryParams<ProductQuery>,
) -> Result<Json<ProductQueryResponse<T::Repository>>, ApiError> {
    let db = app.database();

    let gym_id = optional_id(query.gym_id.as_deref())?;
    let admin_id: Option<<T::Repository as Repository>::UserId> =
        optional_id(query.admin.as_deref())?;
    let product_id = optional_id(query.product_id.as_deref())?;

    let gym = match gym_id {
        Some(gym_id) => Some(require_gym(db, gym_id).await?),
        None => None,
    };
    if let Some(admin_id) = &admin_id {
        require_admin(db, admin_id.clone()).await?;
    }

    let filter = ProductFilter::<T::Repository> {
        gym: gym.as_ref().map(|gym| gym.id.clone()),
        admin: admin_id,
        product: product_id,
    };

    let products = match filter.lookup() {
        ProductLookup::One(product_id) => {
            let product = db
                .get_product(product_id)
                .await
                .map_err(ApiError::storage)?
                .ok_or(ApiError::NotFound(PRODUCT_NOT_FOUND))?;
            return Ok(Json(ProductQueryResponse::One(product)));
        }
        ProductLookup::AdminGym { admin, gym: gym_id } => {
            // The gym was resolved above whenever the lookup names one
            if !gym
                .as_ref()
                .is_some_and(|gym| gym.is_administered_by(&admin))
            {
                return Err(ApiError::NotFound(GYM_NOT_ADMINISTERED));
            }
            db.list_products(Some(gym_id), Some(admin)).await
        }
        ProductLookup::Gym(gym_id) => db.list_products(Some(gym_id), None).await,
        ProductLookup::All => db.list_products(None, None).await,
    }
    .map_err(ApiError::storage)?;

    Ok(Json(ProductQueryResponse::Many(products)))
}
