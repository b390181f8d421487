use async_trait::async_trait;
use chrono::Utc;
use fieldbook_core::{
    errors::{BookingError, BookingResult},
    models::field::{Field, FieldData},
    pagination::PageQuery,
    store::FieldStore,
};
use uuid::Uuid;

use crate::{
    DbPool,
    errors::{db_error, is_foreign_key_violation},
    models::DbField,
};

const FIELD_COLUMNS: &str =
    "id, uuid, name, code, price_per_hour, images, created_at, updated_at";

#[derive(Clone)]
pub struct PgFieldRepository {
    pool: DbPool,
}

impl PgFieldRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldStore for PgFieldRepository {
    async fn find_all(&self) -> BookingResult<Vec<Field>> {
        let sql = format!("SELECT {FIELD_COLUMNS} FROM fields ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, DbField>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Field::from).collect())
    }

    async fn find_all_paginated(&self, query: &PageQuery) -> BookingResult<(Vec<Field>, i64)> {
        // sort_column comes from a fixed whitelist
        let sql = format!(
            "SELECT {FIELD_COLUMNS} FROM fields ORDER BY {} {}, id {} LIMIT $1 OFFSET $2",
            query.sort_column,
            query.sort_order.as_sql(),
            query.sort_order.as_sql(),
        );
        tracing::debug!("Listing fields: page={}, limit={}", query.page, query.limit);

        let rows = sqlx::query_as::<_, DbField>(&sql)
            .bind(i64::from(query.limit))
            .bind(query.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fields")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok((rows.into_iter().map(Field::from).collect(), total))
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> BookingResult<Field> {
        let sql = format!("SELECT {FIELD_COLUMNS} FROM fields WHERE uuid = $1");
        sqlx::query_as::<_, DbField>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .map(Field::from)
            .ok_or(BookingError::FieldNotFound(uuid))
    }

    async fn create(&self, data: FieldData) -> BookingResult<Field> {
        let uuid = Uuid::new_v4();
        let now = Utc::now();

        tracing::debug!("Creating field: uuid={}, code={}", uuid, data.code);

        let sql = format!(
            r#"
            INSERT INTO fields (uuid, name, code, price_per_hour, images, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {FIELD_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, DbField>(&sql)
            .bind(uuid)
            .bind(&data.name)
            .bind(&data.code)
            .bind(data.price_per_hour)
            .bind(&data.images)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.into())
    }

    async fn update(&self, uuid: Uuid, data: FieldData) -> BookingResult<Field> {
        let sql = format!(
            r#"
            UPDATE fields
            SET name = $2, code = $3, price_per_hour = $4, images = $5, updated_at = NOW()
            WHERE uuid = $1
            RETURNING {FIELD_COLUMNS}
            "#
        );
        sqlx::query_as::<_, DbField>(&sql)
            .bind(uuid)
            .bind(&data.name)
            .bind(&data.code)
            .bind(data.price_per_hour)
            .bind(&data.images)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .map(Field::from)
            .ok_or(BookingError::FieldNotFound(uuid))
    }

    async fn delete(&self, uuid: Uuid) -> BookingResult<()> {
        let result = sqlx::query("DELETE FROM fields WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    BookingError::FieldHasSchedules(uuid)
                } else {
                    db_error(err)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(BookingError::FieldNotFound(uuid));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) const FIELD_TEST_IMAGE: &str = "http://localhost:3000/uploads/images/test.jpg";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_test_pool;
    use fieldbook_core::pagination::{PaginationParams, PageQuery};
    use fieldbook_core::store::FIELD_SORT_COLUMNS;
    use pretty_assertions::assert_eq;

    fn data(code: &str) -> FieldData {
        FieldData {
            name: format!("Lapangan {code}"),
            code: code.to_string(),
            price_per_hour: 120_000,
            images: vec![FIELD_TEST_IMAGE.to_string()],
        }
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_field_crud() {
        let repo = PgFieldRepository::new(create_test_pool().await);

        let created = repo.create(data("CRUD")).await.unwrap();
        assert_eq!(created.images, vec![FIELD_TEST_IMAGE.to_string()]);

        let mut changed = data("CRUD");
        changed.price_per_hour = 90_000;
        let updated = repo.update(created.uuid, changed).await.unwrap();
        assert_eq!(updated.price_per_hour, 90_000);

        repo.delete(created.uuid).await.unwrap();
        assert!(matches!(
            repo.find_by_uuid(created.uuid).await,
            Err(BookingError::FieldNotFound(_))
        ));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_field_page_is_bounded_by_limit() {
        let repo = PgFieldRepository::new(create_test_pool().await);
        repo.create(data("P1")).await.unwrap();
        repo.create(data("P2")).await.unwrap();

        let query = PageQuery::new(
            &PaginationParams {
                page: 1,
                limit: 1,
                ..Default::default()
            },
            FIELD_SORT_COLUMNS,
        )
        .unwrap();
        let (page, total) = repo.find_all_paginated(&query).await.unwrap();

        assert_eq!(page.len(), 1);
        assert!(total >= 2);
    }
}
