use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::IdentityName;
use crate::domain::identity::ports::IdentityRepository;

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_identity(row: PgRow) -> Result<Identity, IdentityError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;
    let current_token: Option<String> = row
        .try_get("current_token")
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;
    let created_at = row
        .try_get("created_at")
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

    Ok(Identity {
        id: IdentityId(id),
        name: IdentityName::new(name)?,
        current_token,
        created_at,
    })
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, name, current_token, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.name.as_str())
        .bind(identity.current_token.as_deref())
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return IdentityError::NameAlreadyExists(
                        identity.name.as_str().to_string(),
                    );
                }
            }
            IdentityError::DatabaseError(e.to_string())
        })?;

        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, current_token, created_at
            FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        row.map(row_to_identity).transpose()
    }

    async fn find_by_name(&self, name: &IdentityName) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, current_token, created_at
            FROM identities
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        row.map(row_to_identity).transpose()
    }

    async fn update_token(&self, id: &IdentityId, token: &str) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET current_token = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
