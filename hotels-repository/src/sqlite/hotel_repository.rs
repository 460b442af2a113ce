use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hotels_shared::{HotelData, HotelPart, PartName};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use crate::{HotelRepository, RepositoryError};

/// Maximum length of a hotel address, matching the `address` column.
const MAX_ADDRESS_LENGTH: usize = 63;

/// SQLite implementation of the permanent store.
///
/// Stores raw part documents as JSON text in the `hotels` table. Timestamps
/// are kept as microseconds since the Unix epoch so that cutoff comparisons
/// are plain integer comparisons.
#[derive(Clone)]
pub struct SqliteHotelRepository {
    pool: SqlitePool,
}

impl SqliteHotelRepository {
    /// Creates a repository over a pool whose schema is already migrated.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn validate_address(address: &str) -> Result<(), RepositoryError> {
        if address.is_empty() {
            return Err(RepositoryError::invalid_input("hotel address is required"));
        }
        if address.len() > MAX_ADDRESS_LENGTH {
            return Err(RepositoryError::invalid_input(format!(
                "hotel address is longer than {MAX_ADDRESS_LENGTH} characters: {address}"
            )));
        }
        Ok(())
    }

    /// Appends `address IN (...)` to a query that already has a condition.
    fn push_address_scope<'a>(
        query_builder: &mut QueryBuilder<'a, Sqlite>,
        limit_to: Option<&'a [String]>,
    ) {
        if let Some(addresses) = limit_to {
            query_builder.push(" AND address IN (");
            let mut separated = query_builder.separated(", ");
            for address in addresses {
                separated.push_bind(address.as_str());
            }
            separated.push_unseparated(")");
        }
    }
}

#[async_trait]
impl HotelRepository for SqliteHotelRepository {
    async fn upsert(&self, parts: &[HotelPart]) -> Result<(), RepositoryError> {
        if parts.is_empty() {
            return Err(RepositoryError::invalid_input("No hotel data provided."));
        }
        for part in parts {
            Self::validate_address(&part.address)?;
        }

        let now = Utc::now().timestamp_micros();
        let mut tx = self.pool.begin().await?;
        let mut to_insert: Vec<(&HotelPart, String)> = Vec::new();

        for part in parts {
            let raw_data = serde_json::to_string(&part.raw_data)?;
            let modified = sqlx::query(
                r#"
                UPDATE hotels
                SET raw_data = ?, updated_at = ?
                WHERE address = ? AND part_name = ?
                "#,
            )
            .bind(&raw_data)
            .bind(now)
            .bind(&part.address)
            .bind(part.part_name.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if modified > 0 {
                continue;
            }

            // The same part twice in one batch: the later document wins.
            match to_insert.iter_mut().find(|(queued, _)| {
                queued.address == part.address && queued.part_name == part.part_name
            }) {
                Some(queued) => *queued = (part, raw_data),
                None => to_insert.push((part, raw_data)),
            }
        }

        if !to_insert.is_empty() {
            debug!(count = to_insert.len(), "Inserting new hotel parts");
            let mut query_builder = QueryBuilder::<Sqlite>::new(
                "INSERT INTO hotels (address, part_name, raw_data, created_at, updated_at) ",
            );
            query_builder.push_values(to_insert, |mut b, (part, raw_data)| {
                b.push_bind(part.address.clone())
                    .push_bind(part.part_name.as_str())
                    .push_bind(raw_data)
                    .push_bind(now)
                    .push_bind(now);
            });
            query_builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_hotel_data(
        &self,
        address: &str,
        part_names: &[PartName],
    ) -> Result<HotelData, RepositoryError> {
        let mut hotel = HotelData::empty(address);
        if part_names.is_empty() {
            return Ok(hotel);
        }

        let mut query_builder =
            QueryBuilder::<Sqlite>::new("SELECT part_name, raw_data FROM hotels WHERE address = ");
        query_builder.push_bind(address).push(" AND part_name IN (");
        let mut separated = query_builder.separated(", ");
        for part_name in part_names {
            separated.push_bind(part_name.as_str());
        }
        separated.push_unseparated(")");

        let rows = query_builder.build().fetch_all(&self.pool).await?;
        for row in rows {
            let part_name: String = row.try_get("part_name")?;
            let raw_data: String = row.try_get("raw_data")?;
            let part_name =
                PartName::from_str(&part_name).map_err(RepositoryError::InvalidPartName)?;
            hotel.data.insert(part_name, serde_json::from_str(&raw_data)?);
        }

        Ok(hotel)
    }

    async fn get_addresses(
        &self,
        limit: u32,
        start_with: Option<&str>,
    ) -> Result<Vec<String>, RepositoryError> {
        let mut query_builder = QueryBuilder::<Sqlite>::new("SELECT DISTINCT address FROM hotels");
        if let Some(start_with) = start_with {
            query_builder.push(" WHERE address >= ").push_bind(start_with);
        }
        query_builder
            .push(" ORDER BY address LIMIT ")
            .push_bind(i64::from(limit));

        let rows = query_builder.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("address").map_err(RepositoryError::from))
            .collect()
    }

    async fn delete_obsolete(
        &self,
        cutoff: DateTime<Utc>,
        limit_to: Option<&[String]>,
    ) -> Result<Vec<String>, RepositoryError> {
        if matches!(limit_to, Some(addresses) if addresses.is_empty()) {
            return Ok(Vec::new());
        }
        let cutoff = cutoff.timestamp_micros();

        let mut select = QueryBuilder::<Sqlite>::new(
            "SELECT DISTINCT address FROM hotels WHERE updated_at < ",
        );
        select.push_bind(cutoff);
        Self::push_address_scope(&mut select, limit_to);
        select.push(" ORDER BY address");
        let addresses = select
            .build()
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(|row| row.try_get::<String, _>("address"))
            .collect::<Result<Vec<_>, _>>()?;

        // NOTE: Not atomic with the select above. A part refreshed in between
        // survives but its hotel is still reported, which only costs a
        // redundant reindex.
        let mut delete = QueryBuilder::<Sqlite>::new("DELETE FROM hotels WHERE updated_at < ");
        delete.push_bind(cutoff);
        Self::push_address_scope(&mut delete, limit_to);
        let deleted = delete.build().execute(&self.pool).await?.rows_affected();

        debug!(
            deleted_rows = deleted,
            hotel_count = addresses.len(),
            "Deleted obsolete hotel parts"
        );
        Ok(addresses)
    }

    async fn delete(&self, address: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM hotels WHERE address = ?")
            .bind(address)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
