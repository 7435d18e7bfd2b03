use crate::{Db, types::MentorRow};
use gym_core::{
    models::{MentorData, MentorRecord},
    ports::MentorRepository,
};

impl MentorRepository for Db {
    async fn create_mentor(
        &self,
        mentor_id: Self::MentorId,
        gym_id: Option<Self::GymId>,
        data: MentorData,
        password_hash: String,
    ) -> Result<MentorRecord<Self>, Self::Error> {
        let row = sqlx::query_as::<_, MentorRow>(
            r#"
            insert into
                mentor (id, gym_id, username, first_name, last_name, expertise, email, password, phone_number)
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            returning
                id, gym_id, username, first_name, last_name, expertise, email, phone_number
            "#,
        )
        .bind(mentor_id)
        .bind(gym_id)
        .bind(data.username)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.expertise)
        .bind(data.email)
        .bind(password_hash)
        .bind(data.phone_number)
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn get_mentor(
        &self,
        mentor_id: Self::MentorId,
    ) -> Result<Option<MentorRecord<Self>>, Self::Error> {
        let row = sqlx::query_as::<_, MentorRow>(
            r#"
            select
                id, gym_id, username, first_name, last_name, expertise, email, phone_number
            from
                mentor
            where
                id = $1
            "#,
        )
        .bind(mentor_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_mentors(
        &self,
        gym_id: Option<Self::GymId>,
    ) -> Result<Vec<MentorRecord<Self>>, Self::Error> {
        let rows = sqlx::query_as::<_, MentorRow>(
            r#"
            select
                id, gym_id, username, first_name, last_name, expertise, email, phone_number
            from
                mentor
            where
                ($1 is null or gym_id = $1)
            order by
                rowid
            "#,
        )
        .bind(gym_id)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_mentor(&self, mentor_id: Self::MentorId) -> Result<bool, Self::Error> {
        let result = sqlx::query("delete from mentor where id = $1")
            .bind(mentor_id)
            .execute(&self.writer)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
