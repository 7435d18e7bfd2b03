use crate::{Db, types::ProductRow};
use gym_core::{
    models::{ProductData, ProductPatch, ProductRecord},
    ports::ProductRepository,
};

const COLUMNS: &str = "id, gym_id, admin_id, name, kind, description, image, reviews, stock, price, stripe_price_id, stripe_product_id";

fn collect(rows: Vec<ProductRow>) -> Result<Vec<ProductRecord<Db>>, sqlx::Error> {
    rows.into_iter().map(TryInto::try_into).collect()
}

impl ProductRepository for Db {
    async fn create_product(
        &self,
        product_id: Self::ProductId,
        gym_id: Self::GymId,
        admin_id: Self::UserId,
        data: ProductData,
    ) -> Result<ProductRecord<Self>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            insert into
                product ({COLUMNS})
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            returning
                {COLUMNS}
            "#
        ))
        .bind(product_id)
        .bind(gym_id)
        .bind(admin_id)
        .bind(data.name)
        .bind(data.kind)
        .bind(data.desc)
        .bind(data.image)
        .bind(data.reviews)
        .bind(i64::from(data.stock))
        .bind(data.price.to_string())
        .bind(data.stripe_price_id)
        .bind(data.stripe_product_id)
        .fetch_one(&self.writer)
        .await?;

        row.try_into()
    }

    async fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Option<ProductRecord<Self>>, Self::Error> {
        sqlx::query_as::<_, ProductRow>(&format!("select {COLUMNS} from product where id = $1"))
            .bind(product_id)
            .fetch_optional(&self.reader)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn get_owned_product(
        &self,
        product_id: Self::ProductId,
        admin_id: Self::UserId,
        gym_id: Self::GymId,
    ) -> Result<Option<ProductRecord<Self>>, Self::Error> {
        sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            select
                {COLUMNS}
            from
                product
            where
                id = $1
            and
                admin_id = $2
            and
                gym_id = $3
            "#
        ))
        .bind(product_id)
        .bind(admin_id)
        .bind(gym_id)
        .fetch_optional(&self.reader)
        .await?
        .map(TryInto::try_into)
        .transpose()
    }

    async fn list_products(
        &self,
        gym_id: Option<Self::GymId>,
        admin_id: Option<Self::UserId>,
    ) -> Result<Vec<ProductRecord<Self>>, Self::Error> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            select
                {COLUMNS}
            from
                product
            where
                ($1 is null or gym_id = $1)
            and
                ($2 is null or admin_id = $2)
            order by
                rowid
            "#
        ))
        .bind(gym_id)
        .bind(admin_id)
        .fetch_all(&self.reader)
        .await?;

        collect(rows)
    }

    async fn update_product(
        &self,
        product_id: Self::ProductId,
        patch: ProductPatch,
    ) -> Result<Option<ProductRecord<Self>>, Self::Error> {
        // Read and write on the writer connection so no other write lands in between
        let mut tx = self.writer.begin().await?;

        let Some(row) = sqlx::query_as::<_, ProductRow>(&format!(
            "select {COLUMNS} from product where id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        let mut record = ProductRecord::<Self>::try_from(row)?;
        if patch.is_empty() {
            return Ok(Some(record));
        }
        patch.apply(&mut record.data);

        let data = &record.data;
        sqlx::query(
            r#"
            update
                product
            set
                name = $2,
                kind = $3,
                description = $4,
                image = $5,
                reviews = $6,
                stock = $7,
                price = $8,
                stripe_price_id = $9,
                stripe_product_id = $10
            where
                id = $1
            "#,
        )
        .bind(product_id)
        .bind(&data.name)
        .bind(&data.kind)
        .bind(&data.desc)
        .bind(&data.image)
        .bind(&data.reviews)
        .bind(i64::from(data.stock))
        .bind(data.price.to_string())
        .bind(&data.stripe_price_id)
        .bind(&data.stripe_product_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(record))
    }

    async fn delete_product(&self, product_id: Self::ProductId) -> Result<bool, Self::Error> {
        let result = sqlx::query("delete from product where id = $1")
            .bind(product_id)
            .execute(&self.writer)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
