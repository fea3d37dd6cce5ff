use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::features::schools::models::{NewSchool, School};

/// Storage seam for schools.
///
/// Each method issues exactly one statement; errors are the driver's own so
/// callers decide how much of them to expose.
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Insert a school and return its auto-assigned id
    async fn insert(&self, school: &NewSchool) -> Result<i64, sqlx::Error>;

    /// Every stored school, unordered
    async fn fetch_all(&self) -> Result<Vec<School>, sqlx::Error>;
}

/// MySQL-backed repository over the shared connection pool
pub struct MySqlSchoolRepository {
    pool: MySqlPool,
}

impl MySqlSchoolRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for MySqlSchoolRepository {
    async fn insert(&self, school: &NewSchool) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO schools (name, address, latitude, longitude)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(school.latitude)
        .bind(school.longitude)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn fetch_all(&self) -> Result<Vec<School>, sqlx::Error> {
        sqlx::query_as::<_, School>(
            r#"
            SELECT id, name, address, latitude, longitude
            FROM schools
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
