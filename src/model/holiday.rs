use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HolidayType {
    National,
    Regional,
    Company,
    Weekly,
}

/// A materialised holiday. Recurring holidays are expanded per year before they
/// reach this service, so `date` is always a concrete day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Holiday {
    pub id: u64,
    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Founders Day")]
    pub name: String,
    pub holiday_type: HolidayType,
    pub is_active: bool,
    pub is_recurring: bool,
}

#[derive(Debug, sqlx::FromRow)]
pub struct HolidayRow {
    pub id: u64,
    pub date: NaiveDate,
    pub name: String,
    pub holiday_type: String,
    pub is_active: bool,
    pub is_recurring: bool,
}

impl From<HolidayRow> for Holiday {
    fn from(row: HolidayRow) -> Self {
        let holiday_type = row.holiday_type.parse().unwrap_or(HolidayType::Company);

        Holiday {
            id: row.id,
            date: row.date,
            name: row.name,
            holiday_type,
            is_active: row.is_active,
            is_recurring: row.is_recurring,
        }
    }
}
