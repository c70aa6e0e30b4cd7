//! Repositories for the `concrete_prices` and `asphalt_prices` tables.

use pondasi_core::types::DbId;
use sqlx::PgPool;

use super::apply_sort_order;
use crate::models::price::{
    AsphaltPrice, ConcretePrice, CreateAsphaltPrice, CreateConcretePrice, UpdateAsphaltPrice,
    UpdateConcretePrice,
};

const CONCRETE_COLUMNS: &str =
    "id, code, name, price, unit, description, sort_order, created_at, updated_at";

const ASPHALT_COLUMNS: &str = "id, code, name, price_loco, price_tergelar, unit, description, \
                               sort_order, created_at, updated_at";

pub struct ConcretePriceRepo;

impl ConcretePriceRepo {
    /// All entries in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<ConcretePrice>, sqlx::Error> {
        let query =
            format!("SELECT {CONCRETE_COLUMNS} FROM concrete_prices ORDER BY sort_order, id");
        sqlx::query_as::<_, ConcretePrice>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ConcretePrice>, sqlx::Error> {
        let query = format!("SELECT {CONCRETE_COLUMNS} FROM concrete_prices WHERE id = $1");
        sqlx::query_as::<_, ConcretePrice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an entry at the end of the list.
    pub async fn create(
        pool: &PgPool,
        input: &CreateConcretePrice,
    ) -> Result<ConcretePrice, sqlx::Error> {
        let query = format!(
            "INSERT INTO concrete_prices (code, name, price, unit, description, sort_order)
             VALUES ($1, $2, $3, COALESCE($4, 'm3'), $5,
                     COALESCE((SELECT MAX(sort_order) FROM concrete_prices), 0) + 1)
             RETURNING {CONCRETE_COLUMNS}"
        );
        sqlx::query_as::<_, ConcretePrice>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.unit)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateConcretePrice,
    ) -> Result<Option<ConcretePrice>, sqlx::Error> {
        let query = format!(
            "UPDATE concrete_prices SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                price = COALESCE($4, price),
                unit = COALESCE($5, unit),
                description = COALESCE($6, description)
             WHERE id = $1
             RETURNING {CONCRETE_COLUMNS}"
        );
        sqlx::query_as::<_, ConcretePrice>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.unit)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM concrete_prices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM concrete_prices ORDER BY sort_order, id")
            .fetch_all(pool)
            .await
    }

    pub async fn reorder(pool: &PgPool, order: &[(DbId, i32)]) -> Result<(), sqlx::Error> {
        apply_sort_order(pool, "concrete_prices", order).await
    }
}

pub struct AsphaltPriceRepo;

impl AsphaltPriceRepo {
    /// All entries in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<AsphaltPrice>, sqlx::Error> {
        let query = format!("SELECT {ASPHALT_COLUMNS} FROM asphalt_prices ORDER BY sort_order, id");
        sqlx::query_as::<_, AsphaltPrice>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AsphaltPrice>, sqlx::Error> {
        let query = format!("SELECT {ASPHALT_COLUMNS} FROM asphalt_prices WHERE id = $1");
        sqlx::query_as::<_, AsphaltPrice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an entry at the end of the list.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAsphaltPrice,
    ) -> Result<AsphaltPrice, sqlx::Error> {
        let query = format!(
            "INSERT INTO asphalt_prices
                (code, name, price_loco, price_tergelar, unit, description, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'ton'), $6,
                     COALESCE((SELECT MAX(sort_order) FROM asphalt_prices), 0) + 1)
             RETURNING {ASPHALT_COLUMNS}"
        );
        sqlx::query_as::<_, AsphaltPrice>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.price_loco)
            .bind(input.price_tergelar)
            .bind(&input.unit)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAsphaltPrice,
    ) -> Result<Option<AsphaltPrice>, sqlx::Error> {
        let query = format!(
            "UPDATE asphalt_prices SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                price_loco = COALESCE($4, price_loco),
                price_tergelar = COALESCE($5, price_tergelar),
                unit = COALESCE($6, unit),
                description = COALESCE($7, description)
             WHERE id = $1
             RETURNING {ASPHALT_COLUMNS}"
        );
        sqlx::query_as::<_, AsphaltPrice>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.price_loco)
            .bind(input.price_tergelar)
            .bind(&input.unit)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM asphalt_prices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM asphalt_prices ORDER BY sort_order, id")
            .fetch_all(pool)
            .await
    }

    pub async fn reorder(pool: &PgPool, order: &[(DbId, i32)]) -> Result<(), sqlx::Error> {
        apply_sort_order(pool, "asphalt_prices", order).await
    }
}
