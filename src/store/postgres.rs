use super::ProductStore;
use crate::error::AppError;
use crate::filter::ProductFilter;
use crate::model::{Product, ProductInput, ProductStatus};
use crate::sql::{self, bind_all, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgProductStore {
    pool: PgPool,
    schema: String,
    id_prefix: String,
}

impl PgProductStore {
    pub fn new(pool: PgPool, schema: impl Into<String>, id_prefix: impl Into<String>) -> Self {
        PgProductStore {
            pool,
            schema: schema.into(),
            id_prefix: id_prefix.into(),
        }
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<Product>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(product_from_row).collect::<Result<Vec<_>, _>>().map_err(AppError::Db)
    }

    async fn query_optional(&self, q: &QueryBuf) -> Result<Option<Product>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(product_from_row).transpose().map_err(AppError::Db)
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        self.query_many(&sql::select_list(&self.schema, None)).await
    }

    async fn find_all_matching(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        self.query_many(&sql::select_list(&self.schema, Some(filter))).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        self.query_optional(&sql::select_by_id(&self.schema, id)).await
    }

    async fn create(&self, input: ProductInput) -> Result<Product, AppError> {
        let q = sql::insert(&self.schema, &self.id_prefix, &input);
        self.query_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn save(&self, product: &Product) -> Result<Option<Product>, AppError> {
        self.query_optional(&sql::update(&self.schema, product)).await
    }

    async fn delete(&self, product: &Product) -> Result<bool, AppError> {
        let q = sql::delete(&self.schema, &product.product_id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let result = bind_all(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    let status: Option<String> = row.try_get("status")?;
    let status = status
        .map(|s| s.parse::<ProductStatus>())
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".into(),
            source: e.into(),
        })?;
    Ok(Product {
        product_id: row.try_get("product_id")?,
        status,
        fulfillment_center: row.try_get("fulfillment_center")?,
        quantity: row.try_get("quantity")?,
        value: row.try_get("value")?,
    })
}
