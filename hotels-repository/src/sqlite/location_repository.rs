use async_trait::async_trait;
use hotels_shared::{Location, LocationFilter, LocationSorting, LOCATION_TABLE};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::{LocationMatch, LocationRepository, RepositoryError};

/// SQLite implementation of the location index.
#[derive(Clone)]
pub struct SqliteLocationRepository {
    pool: SqlitePool,
}

impl SqliteLocationRepository {
    /// Creates a repository over a pool whose schema is already migrated.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Descriptors are compiled for the location table only.
    fn check_table(table: &str) -> Result<(), RepositoryError> {
        if table != LOCATION_TABLE {
            return Err(RepositoryError::invalid_input(format!(
                "descriptor targets unknown table: {table}"
            )));
        }
        Ok(())
    }

    /// The sort column is spliced into the statement as an alias.
    fn check_column(column_name: &str) -> Result<(), RepositoryError> {
        let mut chars = column_name.chars();
        let valid = chars
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(RepositoryError::invalid_input(format!(
                "invalid sort column name: {column_name:?}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepository {
    async fn upsert(&self, location: &Location) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO location (hotel_address, lat, lng)
            VALUES (?, ?, ?)
            ON CONFLICT (hotel_address)
            DO UPDATE SET
                lat = excluded.lat,
                lng = excluded.lng
            "#,
        )
        .bind(&location.hotel_address)
        .bind(location.lat)
        .bind(location.lng)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, hotel_address: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM location WHERE hotel_address = ?")
            .bind(hotel_address)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn get(&self, hotel_address: &str) -> Result<Option<Location>, RepositoryError> {
        let row =
            sqlx::query("SELECT hotel_address, lat, lng FROM location WHERE hotel_address = ?")
                .bind(hotel_address)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|row| {
            Ok(Location {
                hotel_address: row.try_get("hotel_address")?,
                lat: row.try_get("lat")?,
                lng: row.try_get("lng")?,
            })
        })
        .transpose()
    }

    async fn search(
        &self,
        filters: &[LocationFilter],
        sorting: Option<&LocationSorting>,
        limit: Option<u32>,
    ) -> Result<Vec<LocationMatch>, RepositoryError> {
        for filter in filters {
            Self::check_table(&filter.table)?;
        }
        if let Some(sorting) = sorting {
            Self::check_table(&sorting.table)?;
            Self::check_column(&sorting.column_name)?;
        }

        let mut query_builder = QueryBuilder::<Sqlite>::new("SELECT hotel_address, lat, lng");
        if let Some(sorting) = sorting {
            query_builder
                .push(", ((lat - ")
                .push_bind(sorting.origin_lat)
                .push(") * (lat - ")
                .push_bind(sorting.origin_lat)
                .push(") + (lng - ")
                .push_bind(sorting.origin_lng)
                .push(") * (lng - ")
                .push_bind(sorting.origin_lng)
                .push(") * ")
                .push_bind(sorting.lng_scale)
                .push(") AS ")
                .push(&sorting.column_name);
        }
        query_builder.push(" FROM ").push(LOCATION_TABLE);

        for (i, filter) in filters.iter().enumerate() {
            let bbox = &filter.condition;
            query_builder
                .push(if i == 0 { " WHERE " } else { " AND " })
                .push("lat BETWEEN ")
                .push_bind(bbox.min_lat)
                .push(" AND ")
                .push_bind(bbox.max_lat)
                .push(" AND lng BETWEEN ")
                .push_bind(bbox.min_lng)
                .push(" AND ")
                .push_bind(bbox.max_lng);
        }

        match sorting {
            Some(sorting) => {
                query_builder
                    .push(" ORDER BY ")
                    .push(&sorting.column_name)
                    .push(" ASC, hotel_address ASC");
            }
            None => {
                query_builder.push(" ORDER BY hotel_address ASC");
            }
        }
        if let Some(limit) = limit {
            query_builder.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows = query_builder.build().fetch_all(&self.pool).await?;
        let mut matches = Vec::with_capacity(rows.len());
        for row in rows {
            let score = match sorting {
                Some(sorting) => {
                    let raw: f64 = row.try_get(sorting.column_name.as_str())?;
                    Some(sorting.compute_score(raw))
                }
                None => None,
            };
            matches.push(LocationMatch {
                location: Location {
                    hotel_address: row.try_get("hotel_address")?,
                    lat: row.try_get("lat")?,
                    lng: row.try_get("lng")?,
                },
                score,
            });
        }

        Ok(matches)
    }
}
