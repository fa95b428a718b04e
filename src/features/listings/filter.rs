//! Translates raw listing queries into a validated [`ListingFilter`].
//!
//! Everything a client can send is either allow-listed (sort fields, status)
//! or reduced to plain values (numbers, search terms) before it reaches a store.

use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::error::{AppError, FieldError, Result};
use crate::features::categories::tree::CategoryTree;
use crate::features::listings::dtos::{ListingQueryParams, MyListingsQuery};
use crate::features::listings::models::ListingStatus;
use crate::shared::constants::{DEFAULT_OWNER_PAGE_SIZE, DEFAULT_PAGE_SIZE};
use crate::shared::types::PageRequest;
use crate::shared::validation::search_terms;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    /// Anything other than `asc` sorts descending
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_lowercase()).as_deref() {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Allow-listed sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Price,
    Title,
    Views,
}

impl SortField {
    /// Unknown keys fall back to `createdAt`
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("updatedAt") => SortField::UpdatedAt,
            Some("price") => SortField::Price,
            Some("title") => SortField::Title,
            Some("views") => SortField::Views,
            _ => SortField::CreatedAt,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Price => "price",
            SortField::Title => "title",
            SortField::Views => "views",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingSort {
    pub field: SortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusScope {
    Only(ListingStatus),
    Any,
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    pub fn contains(&self, price: Decimal) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

/// Store-neutral listing query
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    pub status: StatusScope,
    pub seller_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring, raw (unescaped)
    pub city: Option<String>,
    /// Case-insensitive substring, raw (unescaped)
    pub state: Option<String>,
    pub price: PriceRange,
    /// Lowercase alphanumeric terms, matched with OR semantics
    pub search_terms: Vec<String>,
    pub sort: ListingSort,
    pub page: PageRequest,
}

impl ListingFilter {
    fn new(status: StatusScope, page: PageRequest) -> Self {
        Self {
            status,
            seller_id: None,
            category_id: None,
            city: None,
            state: None,
            price: PriceRange::default(),
            search_terms: Vec::new(),
            sort: ListingSort::default(),
            page,
        }
    }
}

fn present(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(field: &str, raw: &Option<String>, errors: &mut Vec<FieldError>) -> Option<Decimal> {
    let raw = present(raw)?;
    match Decimal::from_str(raw) {
        Ok(value) if value.is_sign_negative() && !value.is_zero() => {
            errors.push(FieldError::new(field, "must not be negative"));
            None
        }
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldError::new(field, "must be a number"));
            None
        }
    }
}

fn parse_int(field: &str, raw: &Option<String>, errors: &mut Vec<FieldError>) -> Option<i64> {
    let raw = present(raw)?;
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldError::new(field, "must be an integer"));
            None
        }
    }
}

fn page_request(
    page: &Option<String>,
    limit: &Option<String>,
    default_limit: i64,
    errors: &mut Vec<FieldError>,
) -> PageRequest {
    let page = parse_int("page", page, errors).unwrap_or(1);
    let limit = parse_int("limit", limit, errors).unwrap_or(default_limit);
    PageRequest::new(page, limit)
}

fn finish(filter: ListingFilter, mut errors: Vec<FieldError>) -> Result<ListingFilter> {
    if errors.is_empty() {
        Ok(filter)
    } else {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Err(AppError::InvalidFields(errors))
    }
}

pub struct FilterEngine;

impl FilterEngine {
    /// Public browse query. Always scoped to active listings; an unknown
    /// category token is ignored rather than rejected.
    pub fn browse(params: &ListingQueryParams, categories: &CategoryTree) -> Result<ListingFilter> {
        let mut errors = Vec::new();
        let page = page_request(&params.page, &params.limit, DEFAULT_PAGE_SIZE, &mut errors);
        let mut filter = ListingFilter::new(StatusScope::Only(ListingStatus::Active), page);

        if let Some(token) = present(&params.category) {
            filter.category_id = categories.resolve_ref(token).map(|c| c.id);
            if filter.category_id.is_none() {
                tracing::debug!("Ignoring unknown category filter '{}'", token);
            }
        }

        filter.city = present(&params.city).map(str::to_string);
        filter.state = present(&params.state).map(str::to_string);
        filter.price = PriceRange {
            min: parse_price("minPrice", &params.min_price, &mut errors),
            max: parse_price("maxPrice", &params.max_price, &mut errors),
        };
        filter.search_terms = present(&params.search).map(search_terms).unwrap_or_default();
        filter.sort = ListingSort {
            field: SortField::from_param(params.sort_by.as_deref()),
            direction: SortDirection::from_param(params.sort_order.as_deref()),
        };

        finish(filter, errors)
    }

    /// The caller's own listings, newest first
    pub fn owner(owner_id: Uuid, params: &MyListingsQuery) -> Result<ListingFilter> {
        let mut errors = Vec::new();
        let page = page_request(&params.page, &params.limit, DEFAULT_OWNER_PAGE_SIZE, &mut errors);

        let status = match present(&params.status) {
            None => StatusScope::Only(ListingStatus::Active),
            Some(s) if s.eq_ignore_ascii_case("all") => StatusScope::Any,
            Some(s) => match s.parse::<ListingStatus>() {
                Ok(status) => StatusScope::Only(status),
                Err(_) => {
                    errors.push(FieldError::new(
                        "status",
                        "must be one of active, sold, expired, deleted, all",
                    ));
                    StatusScope::Only(ListingStatus::Active)
                }
            },
        };

        let mut filter = ListingFilter::new(status, page);
        filter.seller_id = Some(owner_id);
        finish(filter, errors)
    }
}
