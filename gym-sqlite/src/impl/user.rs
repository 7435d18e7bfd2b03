use crate::{Db, types::UserRow};
use gym_core::{
    models::{UserData, UserRecord},
    ports::{UserFailure, UserRepository},
};

impl UserRepository for Db {
    async fn create_user(
        &self,
        user_id: Self::UserId,
        data: UserData,
        password_hash: String,
        as_of: Self::DateTime,
    ) -> Result<Result<UserRecord<Self>, UserFailure>, Self::Error> {
        let inserted = sqlx::query_as::<_, UserRow>(
            r#"
            insert into
                users (id, username, email, first_name, last_name, password, is_staff, date_joined)
            values
                ($1, $2, $3, $4, $5, $6, $7, $8)
            returning
                id, username, email, first_name, last_name, is_staff, date_joined
            "#,
        )
        .bind(user_id)
        .bind(data.username)
        .bind(data.email)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(password_hash)
        .bind(data.is_staff)
        .bind(as_of)
        .fetch_one(&self.writer)
        .await;

        match inserted {
            Ok(row) => Ok(Ok(row.into())),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Ok(Err(UserFailure::UsernameTaken))
            }
            Err(err) => Err(err),
        }
    }

    async fn get_user(&self, user_id: Self::UserId) -> Result<Option<UserRecord<Self>>, Self::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            select
                id, username, email, first_name, last_name, is_staff, date_joined
            from
                users
            where
                id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn get_admin(
        &self,
        admin_id: Self::UserId,
    ) -> Result<Option<UserRecord<Self>>, Self::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            select
                id, username, email, first_name, last_name, is_staff, date_joined
            from
                users
            where
                id = $1
            and
                is_staff
            "#,
        )
        .bind(admin_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }
}

