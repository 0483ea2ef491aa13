use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use ratesync_core::rates::{PersistedRate, RateRepositoryTrait, RateUpsert};
use ratesync_core::Result;

use super::model::{ExchangeRateChangesDB, ExchangeRateDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::exchange_rates;
use crate::schema::exchange_rates::dsl::*;

pub struct RateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RateRepository { pool, writer }
    }

    fn list_all_impl(&self) -> Result<Vec<PersistedRate>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = exchange_rates
            .select(ExchangeRateDB::as_select())
            .order(rate_type.asc())
            .load::<ExchangeRateDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(PersistedRate::try_from).collect()
    }

    fn get_by_type_impl(&self, key: &str) -> Result<Option<PersistedRate>> {
        let mut conn = get_connection(&self.pool)?;
        let row = exchange_rates
            .filter(rate_type.eq(key))
            .select(ExchangeRateDB::as_select())
            .first::<ExchangeRateDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(PersistedRate::try_from).transpose()
    }
}

#[async_trait]
impl RateRepositoryTrait for RateRepository {
    async fn upsert(&self, upsert: RateUpsert) -> Result<PersistedRate> {
        let changes = ExchangeRateChangesDB::try_from(upsert)?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PersistedRate> {
                let existing_id = exchange_rates
                    .filter(rate_type.eq(&changes.rate_type))
                    .select(id)
                    .first::<i32>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                let row = match existing_id {
                    Some(existing) => {
                        debug!("Updating exchange rate '{}' (id {})", changes.rate_type, existing);
                        diesel::update(exchange_rates.find(existing))
                            .set(&changes)
                            .returning(ExchangeRateDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?
                    }
                    None => {
                        debug!("Inserting exchange rate '{}'", changes.rate_type);
                        diesel::insert_into(exchange_rates::table)
                            .values(&changes)
                            .returning(ExchangeRateDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?
                    }
                };

                PersistedRate::try_from(row)
            })
            .await
    }

    fn list_all(&self) -> Result<Vec<PersistedRate>> {
        self.list_all_impl()
    }

    fn get_by_type(&self, key: &str) -> Result<Option<PersistedRate>> {
        self.get_by_type_impl(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use chrono::{DateTime, NaiveDateTime};
    use ratesync_core::errors::{DatabaseError, Error};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn setup() -> (TempDir, RateRepository) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("db").join("rates.db");
        let db_path = init(db_path.to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone()).unwrap();
        (dir, RateRepository::new(pool, writer))
    }

    fn at(secs: i64) -> NaiveDateTime {
        DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
    }

    fn upsert(key: &str, buy_price: Decimal, sell_price: Decimal, secs: i64) -> RateUpsert {
        RateUpsert {
            rate_type: key.to_string(),
            buy: buy_price,
            sell: sell_price,
            rate: dec!(1.0605),
            diff: dec!(63.34),
            updated_at: at(secs),
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_new_record() {
        let (_dir, repo) = setup();

        let saved = repo
            .upsert(upsert("blue", dec!(1100), dec!(1120), 1_000))
            .await
            .unwrap();

        assert!(saved.id > 0);
        assert_eq!(saved.rate_type, "blue");
        assert_eq!(saved.buy, dec!(1100));
        assert_eq!(saved.sell, dec!(1120));
        assert_eq!(saved.rate, dec!(1.06));
        assert_eq!(saved.updated_at, at(1_000));
    }

    #[tokio::test]
    async fn test_upsert_updates_existing_record_in_place() {
        let (_dir, repo) = setup();

        let first = repo
            .upsert(upsert("blue", dec!(1100), dec!(1120), 1_000))
            .await
            .unwrap();
        let second = repo
            .upsert(upsert("blue", dec!(1200), dec!(1220), 2_000))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.buy, dec!(1200));
        assert_eq!(second.updated_at, at(2_000));

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], second);
    }

    #[tokio::test]
    async fn test_reads_return_stored_records() {
        let (_dir, repo) = setup();
        repo.upsert(upsert("oficial", dec!(950), dec!(990), 1_000))
            .await
            .unwrap();
        repo.upsert(upsert("blue", dec!(1100), dec!(1120), 1_000))
            .await
            .unwrap();

        let all = repo.list_all().unwrap();
        let keys: Vec<&str> = all.iter().map(|r| r.rate_type.as_str()).collect();
        assert_eq!(keys, vec!["blue", "oficial"]);

        let oficial = repo.get_by_type("oficial").unwrap().unwrap();
        assert_eq!(oficial.buy, dec!(950));
        assert!(repo.get_by_type("cripto").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_values_are_quantized_on_write() {
        let (_dir, repo) = setup();

        let saved = repo
            .upsert(RateUpsert {
                rate_type: "mep".to_string(),
                buy: dec!(1050.555),
                sell: dec!(1070.004),
                rate: dec!(0.9268),
                diff: dec!(-76.665),
                updated_at: at(0),
            })
            .await
            .unwrap();

        assert_eq!(saved.buy, dec!(1050.56));
        assert_eq!(saved.sell, dec!(1070.00));
        assert_eq!(saved.rate, dec!(0.93));
        assert_eq!(saved.diff, dec!(-76.67));
    }

    #[tokio::test]
    async fn test_out_of_range_value_is_rejected_without_writing() {
        let (_dir, repo) = setup();

        let err = repo
            .upsert(upsert("blue", dec!(123456789), dec!(1), 0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::ConstraintViolation(_))
        ));
        assert!(repo.list_all().unwrap().is_empty());
    }
}
