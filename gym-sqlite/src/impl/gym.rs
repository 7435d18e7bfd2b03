use crate::{Db, types::GymRow};
use gym_core::{
    models::{GymData, GymRecord},
    ports::GymRepository,
};

impl GymRepository for Db {
    async fn create_gym(
        &self,
        gym_id: Self::GymId,
        admin_id: Option<Self::UserId>,
        data: GymData,
    ) -> Result<GymRecord<Self>, Self::Error> {
        let row = sqlx::query_as::<_, GymRow>(
            r#"
            insert into
                gym (id, admin_id, name, address, description, phone_number)
            values
                ($1, $2, $3, $4, $5, $6)
            returning
                id, admin_id, name, address, description, phone_number
            "#,
        )
        .bind(gym_id)
        .bind(admin_id)
        .bind(data.name)
        .bind(data.address)
        .bind(data.description)
        .bind(data.phone_number)
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn get_gym(&self, gym_id: Self::GymId) -> Result<Option<GymRecord<Self>>, Self::Error> {
        let row = sqlx::query_as::<_, GymRow>(
            r#"
            select
                id, admin_id, name, address, description, phone_number
            from
                gym
            where
                id = $1
            "#,
        )
        .bind(gym_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_gyms(
        &self,
        admin_id: Option<Self::UserId>,
    ) -> Result<Vec<GymRecord<Self>>, Self::Error> {
        let rows = sqlx::query_as::<_, GymRow>(
            r#"
            select
                id, admin_id, name, address, description, phone_number
            from
                gym
            where
                ($1 is null or admin_id = $1)
            order by
                rowid
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_gym(&self, gym_id: Self::GymId) -> Result<bool, Self::Error> {
        // Mentors and products go with the gym via `on delete cascade`
        let result = sqlx::query("delete from gym where id = $1")
            .bind(gym_id)
            .execute(&self.writer)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
