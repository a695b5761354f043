//! Field-visit state machine and distance bookkeeping.
//!
//! A visit moves `Pending -> InProgress -> Completed`; `Cancelled` is set by
//! the assignment subsystem. Every mutation is a read-modify-write of the
//! whole visit under that visit's writer lock, ending in one `save`.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use super::geo::{point_distance_km, round2, route_distance_km};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::visit::{GeoPoint, RoutePoint, Visit, VisitStatus};
use crate::store::{VisitFilter, VisitStore};
use crate::utils::visit_locks::VisitLocks;

/// Location payload accepted by every tracking call.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct LocationInput {
    #[schema(example = 23.8103)]
    pub latitude: f64,
    #[schema(example = 90.4125)]
    pub longitude: f64,
}

impl LocationInput {
    pub fn validate(self) -> AnalyticsResult<GeoPoint> {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisitDistanceDetail {
    pub visit_id: u64,
    pub address: String,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub visit_date: Option<DateTime<Utc>>,
    pub distance: f64,
    pub route_points: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DistanceSummary {
    pub user_id: u64,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub total_visits: usize,
    pub total_distance: f64,
    pub average_distance: f64,
    pub visits: Vec<VisitDistanceDetail>,
}

/// Distance of a visit as it should be stored: the route when there are at
/// least two samples, otherwise the straight line from start to end.
pub fn visit_distance_km(visit: &Visit) -> Option<f64> {
    if visit.route_points.len() >= 2 {
        return Some(round2(route_distance_km(&visit.route_points)));
    }
    match (&visit.start_location, &visit.end_location) {
        (Some(start), Some(end)) => Some(round2(point_distance_km(start, end))),
        _ => None,
    }
}

/// Stored distance, or the recomputed one when the stored value is missing
/// or not finite.
pub fn reported_distance(visit: &Visit) -> f64 {
    match visit.distance_traveled {
        Some(km) if km.is_finite() => km,
        _ => visit_distance_km(visit).unwrap_or(0.0),
    }
}

pub struct DistanceTracker {
    visits: Arc<dyn VisitStore>,
    locks: VisitLocks,
}

impl DistanceTracker {
    pub fn new(visits: Arc<dyn VisitStore>, locks: VisitLocks) -> Self {
        Self { visits, locks }
    }

    async fn load(&self, visit_id: u64) -> AnalyticsResult<Visit> {
        self.visits
            .find_by_id(visit_id)
            .await?
            .ok_or_else(|| AnalyticsError::visit_not_found(visit_id))
    }

    /// Opens a pending visit at `location`. Starting twice is rejected.
    #[instrument(skip(self, location))]
    pub async fn start(&self, visit_id: u64, location: LocationInput) -> AnalyticsResult<Visit> {
        let point = location.validate()?.stamped(Utc::now());
        let _slot = self.locks.acquire(visit_id).await;

        let mut visit = self.load(visit_id).await?;
        visit.begin(point)?;
        self.visits.save(visit.clone()).await?;

        info!(visit_id, user_id = visit.user_id, "Visit started");
        Ok(visit)
    }

    /// Appends a GPS sample and recomputes the full route distance.
    #[instrument(skip(self, location))]
    pub async fn update_route(
        &self,
        visit_id: u64,
        location: LocationInput,
    ) -> AnalyticsResult<Visit> {
        let point = location.validate()?.stamped(Utc::now());
        let _slot = self.locks.acquire(visit_id).await;

        let mut visit = self.load(visit_id).await?;
        self.append_point(&mut visit, point)?;
        self.visits.save(visit.clone()).await?;

        debug!(
            visit_id,
            points = visit.route_points.len(),
            distance = ?visit.distance_traveled,
            "Route updated"
        );
        Ok(visit)
    }

    fn append_point(&self, visit: &mut Visit, point: RoutePoint) -> AnalyticsResult<()> {
        visit.record_point(point)?;
        if visit.route_points.len() >= 2 {
            visit.set_distance(round2(route_distance_km(&visit.route_points)));
        }
        Ok(())
    }

    /// Closes the visit at `location` and fixes its final distance.
    #[instrument(skip(self, location))]
    pub async fn complete(&self, visit_id: u64, location: LocationInput) -> AnalyticsResult<Visit> {
        let point = location.validate()?.stamped(Utc::now());
        let _slot = self.locks.acquire(visit_id).await;

        let mut visit = self.load(visit_id).await?;
        visit.finish(point)?;
        if let Some(km) = visit_distance_km(&visit) {
            visit.set_distance(km);
        }
        self.visits.save(visit.clone()).await?;

        info!(
            visit_id,
            user_id = visit.user_id,
            distance = ?visit.distance_traveled,
            "Visit completed"
        );
        Ok(visit)
    }

    /// Feeds one ping into every open visit of `user_id`; returns how many were updated.
    #[instrument(skip(self, location))]
    pub async fn track_user_movement(
        &self,
        user_id: u64,
        location: LocationInput,
    ) -> AnalyticsResult<usize> {
        location.validate()?;

        let open: Vec<u64> = self
            .visits
            .find_by_user(user_id, VisitFilter::with_status(VisitStatus::Pending))
            .await?
            .into_iter()
            .filter(|v| v.start_location.is_some())
            .map(|v| v.id)
            .collect();

        let mut updated = 0;
        for visit_id in open {
            match self.update_route(visit_id, location).await {
                Ok(_) => updated += 1,
                // Completed or cancelled between the listing and the update.
                Err(AnalyticsError::InvalidTransition(reason)) => {
                    warn!(visit_id, %reason, "Skipped visit during movement tracking");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(updated)
    }

    pub async fn user_distance_summary(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AnalyticsResult<DistanceSummary> {
        let completed = self
            .visits
            .find_by_user(
                user_id,
                VisitFilter::with_status(VisitStatus::Completed).between(start, end),
            )
            .await?;

        let visits: Vec<VisitDistanceDetail> = completed
            .into_iter()
            .map(|v| VisitDistanceDetail {
                visit_id: v.id,
                distance: reported_distance(&v),
                route_points: v.route_points.len(),
                visit_date: v.visit_date,
                address: v.address,
            })
            .collect();

        let total_visits = visits.len();
        let total_distance = round2(visits.iter().map(|v| v.distance).sum());
        let average_distance = if total_visits > 0 {
            round2(total_distance / total_visits as f64)
        } else {
            0.0
        };

        Ok(DistanceSummary {
            user_id,
            start_date: start,
            end_date: end,
            total_visits,
            total_distance,
            average_distance,
            visits,
        })
    }
}
