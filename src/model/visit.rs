use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::{AnalyticsError, AnalyticsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VisitStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Validated coordinate pair. Only constructible through [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> AnalyticsResult<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(AnalyticsError::validation(
                "latitude and longitude must be finite numbers",
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AnalyticsError::validation(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(AnalyticsError::validation(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(GeoPoint { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn stamped(self, timestamp: DateTime<Utc>) -> RoutePoint {
        RoutePoint {
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp,
        }
    }
}

/// One GPS sample. Start and end locations share this shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: DateTime<Utc>,
}

/// Lifecycle stage derived from the persisted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStage {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl VisitStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, VisitStage::Completed | VisitStage::Cancelled)
    }
}

/// A field visit. Fields are read-only outside this crate's tracker; all
/// mutation goes through the transition methods below.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Visit {
    pub id: u64,
    pub user_id: u64,
    pub address: String,
    pub visit_status: VisitStatus,
    pub start_location: Option<RoutePoint>,
    pub end_location: Option<RoutePoint>,
    pub route_points: Vec<RoutePoint>,
    /// Kilometres, rounded to 2 decimals when stored.
    pub distance_traveled: Option<f64>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub visit_date: Option<DateTime<Utc>>,
}

impl Visit {
    pub fn new(id: u64, user_id: u64, address: impl Into<String>) -> Self {
        Visit {
            id,
            user_id,
            address: address.into(),
            visit_status: VisitStatus::Pending,
            start_location: None,
            end_location: None,
            route_points: Vec::new(),
            distance_traveled: None,
            visit_date: None,
        }
    }

    pub fn stage(&self) -> VisitStage {
        match (self.visit_status, self.start_location) {
            (VisitStatus::Completed, _) => VisitStage::Completed,
            (VisitStatus::Cancelled, _) => VisitStage::Cancelled,
            (VisitStatus::Pending, Some(_)) => VisitStage::InProgress,
            (VisitStatus::Pending, None) => VisitStage::Pending,
        }
    }

    pub(crate) fn begin(&mut self, point: RoutePoint) -> AnalyticsResult<()> {
        match self.stage() {
            VisitStage::Pending => {
                self.start_location = Some(point);
                self.route_points = vec![point];
                Ok(())
            }
            VisitStage::InProgress => Err(AnalyticsError::InvalidTransition(format!(
                "visit {} is already started",
                self.id
            ))),
            stage => Err(self.terminal_error(stage)),
        }
    }

    pub(crate) fn record_point(&mut self, point: RoutePoint) -> AnalyticsResult<()> {
        let stage = self.stage();
        if stage.is_terminal() {
            return Err(self.terminal_error(stage));
        }
        self.route_points.push(point);
        Ok(())
    }

    pub(crate) fn finish(&mut self, point: RoutePoint) -> AnalyticsResult<()> {
        let stage = self.stage();
        if stage.is_terminal() {
            return Err(self.terminal_error(stage));
        }
        self.end_location = Some(point);
        self.route_points.push(point);
        self.visit_status = VisitStatus::Completed;
        self.visit_date = Some(point.timestamp);
        Ok(())
    }

    pub(crate) fn set_distance(&mut self, km: f64) {
        self.distance_traveled = Some(km);
    }

    fn terminal_error(&self, stage: VisitStage) -> AnalyticsError {
        AnalyticsError::InvalidTransition(format!(
            "visit {} is {} and can no longer change",
            self.id,
            match stage {
                VisitStage::Cancelled => "cancelled",
                _ => "completed",
            }
        ))
    }
}

/// Raw `visit_locations` row. Locations and route are JSON columns.
#[derive(Debug, sqlx::FromRow)]
pub struct VisitRow {
    pub id: u64,
    pub user_id: u64,
    pub address: String,
    pub visit_status: String,
    pub start_location: Option<Json<RoutePoint>>,
    pub end_location: Option<Json<RoutePoint>>,
    pub route_points: Option<Json<Vec<RoutePoint>>>,
    pub distance_traveled: Option<f64>,
    pub visit_date: Option<DateTime<Utc>>,
}

impl TryFrom<VisitRow> for Visit {
    type Error = AnalyticsError;

    fn try_from(row: VisitRow) -> Result<Self, Self::Error> {
        let visit_status = row.visit_status.parse().map_err(|_| {
            AnalyticsError::Upstream(format!(
                "visit {} has unknown status '{}'",
                row.id, row.visit_status
            ))
        })?;

        Ok(Visit {
            id: row.id,
            user_id: row.user_id,
            address: row.address,
            visit_status,
            start_location: row.start_location.map(|j| j.0),
            end_location: row.end_location.map(|j| j.0),
            route_points: row.route_points.map(|j| j.0).unwrap_or_default(),
            distance_traveled: row.distance_traveled,
            visit_date: row.visit_date,
        })
    }
}
