use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::BoxFuture;
use moka::future::Cache;

use crate::error::AnalyticsResult;
use crate::model::holiday::Holiday;
use crate::store::HolidayStore;

/// Read-through cache over a [`HolidayStore`], keyed by the requested range.
/// Holidays are read-only for this service, so entries only expire by TTL.
pub struct CachedHolidayStore {
    inner: Arc<dyn HolidayStore>,
    ranges: Cache<(NaiveDate, NaiveDate), Arc<Vec<Holiday>>>,
}

impl CachedHolidayStore {
    pub fn new(inner: Arc<dyn HolidayStore>, ttl: Duration) -> Self {
        Self {
            inner,
            ranges: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl HolidayStore for CachedHolidayStore {
    fn find_active_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'_, AnalyticsResult<Vec<Holiday>>> {
        Box::pin(async move {
            if let Some(hit) = self.ranges.get(&(start, end)).await {
                return Ok(hit.as_ref().clone());
            }

            // Failures are not cached; the next call goes to the store again.
            let holidays = self.inner.find_active_in_range(start, end).await?;
            self.ranges
                .insert((start, end), Arc::new(holidays.clone()))
                .await;

            log::debug!(
                "Cached {} holidays for {} to {}",
                holidays.len(),
                start,
                end
            );
            Ok(holidays)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::holiday::HolidayType;
    use crate::store::memory::MemoryStore;
    use std::sync::atomic::Ordering;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[actix_web::test]
    async fn second_read_of_same_range_is_served_from_cache() {
        let store = Arc::new(MemoryStore::new());
        store.add_holiday(Holiday {
            id: 1,
            date: date(10),
            name: "Founders Day".into(),
            holiday_type: HolidayType::Company,
            is_active: true,
            is_recurring: true,
        });
        let cached = CachedHolidayStore::new(store.clone(), Duration::from_secs(60));

        let first = cached.find_active_in_range(date(1), date(31)).await.unwrap();
        let second = cached.find_active_in_range(date(1), date(31)).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(store.holiday_reads.load(Ordering::SeqCst), 1);

        cached.find_active_in_range(date(1), date(15)).await.unwrap();
        assert_eq!(store.holiday_reads.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn failures_are_not_cached() {
        let store = Arc::new(MemoryStore::new());
        store.fail_reads.store(true, Ordering::SeqCst);
        let cached = CachedHolidayStore::new(store.clone(), Duration::from_secs(60));

        assert!(cached.find_active_in_range(date(1), date(31)).await.is_err());

        store.fail_reads.store(false, Ordering::SeqCst);
        assert!(cached.find_active_in_range(date(1), date(31)).await.is_ok());
        assert_eq!(store.holiday_reads.load(Ordering::SeqCst), 2);
    }
}
