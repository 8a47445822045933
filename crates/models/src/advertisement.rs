use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Deserializer, Serialize};

pub const TITLE_MAX_LEN: usize = 255;
pub const AUTHOR_MAX_LEN: usize = 100;
/// Fractional digits kept in storage (`NUMERIC(10, 2)`).
pub const PRICE_SCALE: u32 = 2;

/// Largest storable price, 99,999,999.99.
// 9_999_999_999 = 2 * 2^32 + 1_410_065_407
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, PRICE_SCALE);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advertisements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub author: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Candidate record for creation. `headline` is accepted as a legacy alias of `title`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NewAdvertisement {
    #[serde(alias = "headline")]
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub author: String,
}

/// Partial update as received from a client.
///
/// The outer `Option` tracks whether a field was sent at all, the inner one
/// whether it was sent as `null`. Nulls are rejected during validation since
/// every column is required.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AdvertisementPatch {
    #[serde(default, alias = "headline", deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present")]
    pub author: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Field changes that passed validation. `None` means "leave untouched".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvertisementChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub author: Option<String>,
}

impl AdvertisementChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.author.is_none()
    }

    /// Copy the supplied fields over `model`; absent fields keep their value.
    pub fn apply_to(&self, model: &mut Model) {
        if let Some(t) = &self.title {
            model.title = t.clone();
        }
        if let Some(d) = &self.description {
            model.description = d.clone();
        }
        if let Some(p) = self.price {
            model.price = p;
        }
        if let Some(a) = &self.author {
            model.author = a.clone();
        }
    }

    /// Same as [`apply_to`](Self::apply_to) but on an `ActiveModel`, marking
    /// only the supplied columns as changed.
    pub fn apply_to_active(&self, am: &mut ActiveModel) {
        if let Some(t) = &self.title {
            am.title = Set(t.clone());
        }
        if let Some(d) = &self.description {
            am.description = Set(d.clone());
        }
        if let Some(p) = self.price {
            am.price = Set(p);
        }
        if let Some(a) = &self.author {
            am.author = Set(a.clone());
        }
    }
}

/// Optional search criteria. Every supplied criterion must hold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvertisementFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl AdvertisementFilter {
    /// In-process evaluation of the filter; mirrors the SQL built by the
    /// SeaORM repository.
    pub fn matches(&self, model: &Model) -> bool {
        contains_ci(&model.title, self.title.as_deref())
            && contains_ci(&model.description, self.description.as_deref())
            && contains_ci(&model.author, self.author.as_deref())
            && self.min_price.map_or(true, |min| model.price >= min)
            && self.max_price.map_or(true, |max| model.price <= max)
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
        None => true,
    }
}
