use super::form::{FieldErrors, Fields, FormData};
use crate::ports::Repository;
use rust_decimal::Decimal;

/// Prices are stored with at most this many digits in total...
pub const PRICE_MAX_DIGITS: u32 = 10;
/// ...and at most this many after the decimal point.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// A sellable item, as submitted by an admin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductData {
    /// Display name
    pub name: String,
    /// A tag describing the kind of product, e.g. "supplement" or "apparel"
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Long-form description
    pub desc: String,
    /// A reference to the product image (the uploaded file name or a URL)
    pub image: String,
    /// Free-form review text
    pub reviews: String,
    /// Units in stock
    pub stock: u32,
    /// Unit price, serialized as a decimal string
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub price: Decimal,
    /// The payment provider's price identifier, stored opaquely
    #[cfg_attr(feature = "serde", serde(default))]
    pub stripe_price_id: Option<String>,
    /// The payment provider's product identifier, stored opaquely
    #[cfg_attr(feature = "serde", serde(default))]
    pub stripe_product_id: Option<String>,
}

impl ProductData {
    /// Validate a submitted product form.
    ///
    /// Every field except the payment provider identifiers is required.
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(form);
        let name = fields.text("name", Some(100));
        let kind = fields.text("type", Some(50));
        let desc = fields.text("desc", None);
        let image = fields.text("image", None);
        let reviews = fields.text("reviews", None);
        let stock = fields.count("stock");
        let price = fields.decimal("price", PRICE_MAX_DIGITS, PRICE_DECIMAL_PLACES);
        let stripe_price_id = fields.optional_text("stripe_price_id", Some(255)).flatten();
        let stripe_product_id = fields
            .optional_text("stripe_product_id", Some(255))
            .flatten();

        let (
            Some(name),
            Some(kind),
            Some(desc),
            Some(image),
            Some(reviews),
            Some(stock),
            Some(price),
        ) = (name, kind, desc, image, reviews, stock, price)
        else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        Ok(Self {
            name,
            kind,
            desc,
            image,
            reviews,
            stock,
            price,
            stripe_price_id,
            stripe_product_id,
        })
    }
}

/// A partial update to a product. `None` leaves the field unchanged.
///
/// The payment provider identifiers are doubly optional: `Some(None)` clears
/// a stored identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    /// Replacement name
    pub name: Option<String>,
    /// Replacement type tag
    pub kind: Option<String>,
    /// Replacement description
    pub desc: Option<String>,
    /// Replacement image reference
    pub image: Option<String>,
    /// Replacement review text
    pub reviews: Option<String>,
    /// Replacement stock count
    pub stock: Option<u32>,
    /// Replacement price
    pub price: Option<Decimal>,
    /// Replacement (or cleared) price identifier
    pub stripe_price_id: Option<Option<String>>,
    /// Replacement (or cleared) product identifier
    pub stripe_product_id: Option<Option<String>>,
}

impl ProductPatch {
    /// Validate the supplied subset of a product form.
    ///
    /// Fields that are present are held to the same rules as on creation;
    /// absent fields are ignored.
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut fields = Fields::partial(form);
        let patch = Self {
            name: fields.text("name", Some(100)),
            kind: fields.text("type", Some(50)),
            desc: fields.text("desc", None),
            image: fields.text("image", None),
            reviews: fields.text("reviews", None),
            stock: fields.count("stock"),
            price: fields.decimal("price", PRICE_MAX_DIGITS, PRICE_DECIMAL_PLACES),
            stripe_price_id: fields.optional_text("stripe_price_id", Some(255)),
            stripe_product_id: fields.optional_text("stripe_product_id", Some(255)),
        };
        fields.finish()?;
        Ok(patch)
    }

    /// True if applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the supplied fields of `data`, leaving the rest untouched.
    pub fn apply(self, data: &mut ProductData) {
        if let Some(name) = self.name {
            data.name = name;
        }
        if let Some(kind) = self.kind {
            data.kind = kind;
        }
        if let Some(desc) = self.desc {
            data.desc = desc;
        }
        if let Some(image) = self.image {
            data.image = image;
        }
        if let Some(reviews) = self.reviews {
            data.reviews = reviews;
        }
        if let Some(stock) = self.stock {
            data.stock = stock;
        }
        if let Some(price) = self.price {
            data.price = price;
        }
        if let Some(stripe_price_id) = self.stripe_price_id {
            data.stripe_price_id = stripe_price_id;
        }
        if let Some(stripe_product_id) = self.stripe_product_id {
            data.stripe_product_id = stripe_product_id;
        }
    }
}

/// A stored product, scoped to one gym and created by one admin.
#[cfg_attr(
    feature = "schemars",
    derive(schemars::JsonSchema),
    schemars(
        rename = "ProductRecord",
        bound = "
            T::ProductId: schemars::JsonSchema,
            T::GymId: schemars::JsonSchema,
            T::UserId: schemars::JsonSchema,
        "
    )
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(bound(serialize = "
            T::ProductId: serde::Serialize,
            T::GymId: serde::Serialize,
            T::UserId: serde::Serialize,
        "))
)]
pub struct ProductRecord<T: Repository> {
    /// The unique identifier of the product
    pub id: T::ProductId,
    /// The product's attributes
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ProductData,
    /// The gym the product is sold at
    pub gym: T::GymId,
    /// The admin who created the product
    pub admin: T::UserId,
}

/// The optional filters of a product query, already parsed into identifiers.
pub struct ProductFilter<T: Repository> {
    /// Restrict to one gym
    pub gym: Option<T::GymId>,
    /// Restrict to one admin (only honored together with `gym`)
    pub admin: Option<T::UserId>,
    /// Select exactly one product
    pub product: Option<T::ProductId>,
}

/// What a product query resolves to, in priority order.
///
/// | product | admin | gym | lookup        |
/// |---------|-------|-----|---------------|
/// | set     | any   | any | `One`         |
/// | unset   | set   | set | `AdminGym`    |
/// | unset   | unset | set | `Gym`         |
/// | unset   | any   | unset | `All`       |
pub enum ProductLookup<T: Repository> {
    /// Exactly the identified product
    One(T::ProductId),
    /// Products of a gym created by the admin administering it
    AdminGym {
        /// The admin, who must administer `gym`
        admin: T::UserId,
        /// The gym
        gym: T::GymId,
    },
    /// Every product of a gym
    Gym(T::GymId),
    /// Every product
    All,
}

impl<T: Repository> ProductFilter<T> {
    /// Resolve the filters into a single lookup.
    ///
    /// Existence of each supplied identifier is checked separately, before
    /// the lookup is carried out; an admin without a gym selects everything.
    pub fn lookup(self) -> ProductLookup<T> {
        match (self.product, self.admin, self.gym) {
            (Some(product), _, _) => ProductLookup::One(product),
            (None, Some(admin), Some(gym)) => ProductLookup::AdminGym { admin, gym },
            (None, None, Some(gym)) => ProductLookup::Gym(gym),
            (None, _, None) => ProductLookup::All,
        }
    }
}
