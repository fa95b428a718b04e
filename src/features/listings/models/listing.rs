use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationError;

use crate::features::categories::schema::DetailKind;

/// Lifecycle state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Sold,
    Expired,
    Deleted,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Active => write!(f, "active"),
            ListingStatus::Sold => write!(f, "sold"),
            ListingStatus::Expired => write!(f, "expired"),
            ListingStatus::Deleted => write!(f, "deleted"),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ListingStatus::Active),
            "sold" => Ok(ListingStatus::Sold),
            "expired" => Ok(ListingStatus::Expired),
            "deleted" => Ok(ListingStatus::Deleted),
            other => Err(format!("Unknown listing status: {}", other)),
        }
    }
}

/// How long a listing stays up. Stored, never enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "listing_expiry")]
pub enum ExpireIn {
    #[sqlx(rename = "1 month")]
    #[serde(rename = "1 month")]
    OneMonth,
    #[sqlx(rename = "3 months")]
    #[serde(rename = "3 months")]
    ThreeMonths,
    #[default]
    #[sqlx(rename = "6 months")]
    #[serde(rename = "6 months")]
    SixMonths,
    #[sqlx(rename = "1 year")]
    #[serde(rename = "1 year")]
    OneYear,
    #[sqlx(rename = "Never")]
    #[serde(rename = "Never")]
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub mileage: Option<i64>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub property_type: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<i32>,
    #[serde(default)]
    pub furnished: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub salary: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetDetails {
    pub breed: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub neutered: bool,
}

/// Category-specific attributes. Exactly one variant per listing, stored as
/// JSONB in the `{"kind": ..., "data": ...}` shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum DetailBlock {
    Vehicle(VehicleDetails),
    Property(PropertyDetails),
    Job(JobDetails),
    Pet(PetDetails),
    #[default]
    None,
}

impl DetailBlock {
    pub fn kind(&self) -> DetailKind {
        match self {
            DetailBlock::Vehicle(_) => DetailKind::Vehicle,
            DetailBlock::Property(_) => DetailKind::Property,
            DetailBlock::Job(_) => DetailKind::Job,
            DetailBlock::Pet(_) => DetailKind::Pet,
            DetailBlock::None => DetailKind::None,
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Range checks on the numeric detail fields
pub fn validate_detail_block(block: &DetailBlock) -> Result<(), ValidationError> {
    match block {
        DetailBlock::Vehicle(v) => {
            if matches!(v.year, Some(year) if !(1886..=2100).contains(&year)) {
                return Err(invalid("year", "Vehicle year is out of range"));
            }
            if matches!(v.mileage, Some(m) if m < 0) {
                return Err(invalid("mileage", "Mileage cannot be negative"));
            }
        }
        DetailBlock::Property(p) => {
            let negative = matches!(p.bedrooms, Some(b) if b < 0)
                || matches!(p.bathrooms, Some(b) if b < 0.0 || !b.is_finite())
                || matches!(p.square_feet, Some(s) if s < 0);
            if negative {
                return Err(invalid("property", "Property sizes cannot be negative"));
            }
        }
        DetailBlock::Job(_) | DetailBlock::Pet(_) | DetailBlock::None => {}
    }
    Ok(())
}

/// Stored listing as the service sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: Uuid,
    pub location: Location,
    pub images: Vec<String>,
    pub seller_id: Uuid,
    pub contact: Contact,
    pub details: DetailBlock,
    pub expire_in: ExpireIn,
    pub status: ListingStatus,
    pub featured: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, resolved listing content handed to the store on insert and update.
/// Owner, views and timestamps are never part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingContent {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: Uuid,
    pub location: Location,
    pub images: Vec<String>,
    pub contact: Contact,
    pub details: DetailBlock,
    pub expire_in: ExpireIn,
    pub featured: bool,
}
