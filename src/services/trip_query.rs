//! Trip listing query: turns raw query-string parameters into a typed filter,
//! sort and page, and renders them as sea-query statements.
//!
//! The page statement and the count statement are built from the same
//! [`TripFilter::condition`], so `meta.total` always counts exactly the rows
//! the page is drawn from.

use std::collections::HashMap;

use sea_query::{
    extension::postgres::PgExpr, Alias, Asterisk, Condition, Expr, Func, Order, Query,
    SelectStatement, SimpleExpr,
};

use crate::interceptors::{AppError, AppResult};
use crate::models::Trips;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Fields that accept a generic "contains" filter, keyed by their query parameter name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterField {
    Destination,
    Description,
    TravelType,
    StartDate,
    EndDate,
}

impl FilterField {
    pub fn from_param(key: &str) -> Option<Self> {
        match key {
            "destination" => Some(FilterField::Destination),
            "description" => Some(FilterField::Description),
            "travelType" => Some(FilterField::TravelType),
            "startDate" => Some(FilterField::StartDate),
            "endDate" => Some(FilterField::EndDate),
            _ => None,
        }
    }

    fn column(self) -> Trips {
        match self {
            FilterField::Destination => Trips::Destination,
            FilterField::Description => Trips::Description,
            FilterField::TravelType => Trips::TravelType,
            FilterField::StartDate => Trips::StartDate,
            FilterField::EndDate => Trips::EndDate,
        }
    }

    /// Case-insensitive substring match; date columns are matched on their text form
    fn contains(self, value: &str) -> SimpleExpr {
        match self {
            FilterField::StartDate | FilterField::EndDate => {
                Expr::expr(Func::cast_as(Expr::col(self.column()), Alias::new("TEXT")))
                    .ilike(contains_pattern(value))
            }
            _ => Expr::col(self.column()).ilike(contains_pattern(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Destination,
    #[default]
    Budget,
    StartDate,
    EndDate,
    CreatedAt,
}

impl SortField {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "destination" => Some(SortField::Destination),
            "budget" => Some(SortField::Budget),
            "startDate" => Some(SortField::StartDate),
            "endDate" => Some(SortField::EndDate),
            "createdAt" => Some(SortField::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> Trips {
        match self {
            SortField::Destination => Trips::Destination,
            SortField::Budget => Trips::Budget,
            SortField::StartDate => Trips::StartDate,
            SortField::EndDate => Trips::EndDate,
            SortField::CreatedAt => Trips::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_param(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// `searchTerm` is an exact budget when it starts with an integer, a destination substring otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTerm {
    Budget(i64),
    Destination(String),
}

impl SearchTerm {
    /// A term starting with an integer (optional sign, then digits) searches by
    /// that leading integer, so `"500.5"` and `"12abc"` mean budgets 500 and 12.
    pub fn parse(term: &str) -> Self {
        match leading_integer(term) {
            Some(budget) => SearchTerm::Budget(budget),
            None => SearchTerm::Destination(term.to_string()),
        }
    }

    fn predicate(&self) -> SimpleExpr {
        match self {
            SearchTerm::Budget(budget) => Expr::col(Trips::Budget).eq(*budget as f64),
            SearchTerm::Destination(text) => Expr::col(Trips::Destination).ilike(contains_pattern(text)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilter {
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
    pub search_term: Option<SearchTerm>,
    pub fields: Vec<(FilterField, String)>,
}

impl TripFilter {
    /// AND of every present predicate, `None` when nothing constrains the listing
    pub fn condition(&self) -> Option<Condition> {
        let mut predicates: Vec<Condition> = Vec::new();

        match (self.min_budget, self.max_budget) {
            (Some(min), Some(max)) => {
                predicates.push(Condition::all().add(Expr::col(Trips::Budget).between(min, max)))
            }
            (Some(min), None) => predicates.push(Condition::all().add(Expr::col(Trips::Budget).gte(min))),
            (None, Some(max)) => predicates.push(Condition::all().add(Expr::col(Trips::Budget).lte(max))),
            (None, None) => {}
        }

        if let Some(term) = &self.search_term {
            predicates.push(Condition::any().add(term.predicate()));
        }

        for (field, value) in &self.fields {
            predicates.push(Condition::all().add(field.contains(value)));
        }

        if predicates.is_empty() {
            return None;
        }

        Some(predicates.into_iter().fold(Condition::all(), |all, predicate| all.add(predicate)))
    }
}

/// Fully parsed `GET /trips` query
#[derive(Debug, Clone, PartialEq)]
pub struct TripListQuery {
    pub filter: TripFilter,
    pub page: u64,
    pub limit: u64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for TripListQuery {
    fn default() -> Self {
        Self {
            filter: TripFilter::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl TripListQuery {
    /// Parse raw query parameters. Empty values count as absent; the paging,
    /// sorting, budget and search keys are consumed before anything else is
    /// treated as a field filter.
    pub fn from_params(params: &HashMap<String, String>) -> AppResult<Self> {
        let mut query = TripListQuery::default();

        for (key, raw) in params {
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "page" => query.page = parse_positive(key, value)?,
                "limit" => {
                    let limit = parse_positive(key, value)?;
                    if limit > MAX_LIMIT {
                        return Err(AppError::ValidationError(format!(
                            "limit: must be between 1 and {}",
                            MAX_LIMIT
                        )));
                    }
                    query.limit = limit;
                }
                "sortBy" => {
                    query.sort_by = SortField::from_param(value).ok_or_else(|| {
                        AppError::ValidationError(format!("sortBy: cannot sort by '{}'", value))
                    })?
                }
                "sortOrder" => {
                    query.sort_order = SortOrder::from_param(value).ok_or_else(|| {
                        AppError::ValidationError("sortOrder: must be 'asc' or 'desc'".to_string())
                    })?
                }
                "minBudget" => query.filter.min_budget = Some(parse_budget(key, value)?),
                "maxBudget" => query.filter.max_budget = Some(parse_budget(key, value)?),
                "searchTerm" => query.filter.search_term = Some(SearchTerm::parse(value)),
                other => {
                    let field = FilterField::from_param(other).ok_or_else(|| {
                        AppError::ValidationError(format!("{}: unsupported filter field", other))
                    })?;
                    query.filter.fields.push((field, value.to_string()));
                }
            }
        }

        // HashMap order is arbitrary; keep the generated SQL stable
        query.filter.fields.sort_by_key(|(field, _)| *field);

        // Offsets are bound as BIGINT
        let offset_fits = (query.page - 1)
            .checked_mul(query.limit)
            .is_some_and(|offset| offset <= i64::MAX as u64);
        if !offset_fits {
            return Err(AppError::ValidationError(format!(
                "page: {} is out of range for limit {}",
                query.page, query.limit
            )));
        }

        Ok(query)
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// One page of trips in the requested order, `id` breaking ties
    pub fn page_statement(&self) -> SelectStatement {
        let mut select = Query::select();
        select
            .columns([
                Trips::Id,
                Trips::UserId,
                Trips::Destination,
                Trips::Description,
                Trips::TravelType,
                Trips::StartDate,
                Trips::EndDate,
                Trips::Budget,
                Trips::CreatedAt,
                Trips::UpdatedAt,
            ])
            .from(Trips::Table);

        if let Some(condition) = self.filter.condition() {
            select.cond_where(condition);
        }

        select
            .order_by(self.sort_by.column(), self.sort_order.into())
            .order_by(Trips::Id, Order::Asc)
            .limit(self.limit)
            .offset(self.offset());

        select
    }

    /// Number of trips matching the filter, ignoring page and limit
    pub fn count_statement(&self) -> SelectStatement {
        let mut select = Query::select();
        select
            .expr(Func::count(Expr::col(Asterisk)))
            .from(Trips::Table);

        if let Some(condition) = self.filter.condition() {
            select.cond_where(condition);
        }

        select
    }
}

fn parse_positive(key: &str, value: &str) -> AppResult<u64> {
    match value.parse::<u64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::ValidationError(format!(
            "{}: must be a positive integer, got '{}'",
            key, value
        ))),
    }
}

fn parse_budget(key: &str, value: &str) -> AppResult<f64> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(AppError::ValidationError(format!(
            "{}: must be a number, got '{}'",
            key, value
        ))),
    }
}

fn leading_integer(term: &str) -> Option<i64> {
    let (negative, rest) = match term.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, term.strip_prefix('+').unwrap_or(term)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude = rest[..end].parse::<i64>().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

/// `%value%` with LIKE wildcards in the value escaped
fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
