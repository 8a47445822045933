//! Field rules for advertisements.
//!
//! Validation never touches the store. Successful validation yields a
//! [`Validated`] value; its constructor is private to this module, so the
//! repository layer can only ever receive checked and normalized input.

use std::ops::Deref;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::advertisement::{
    AdvertisementChanges, AdvertisementPatch, NewAdvertisement, AUTHOR_MAX_LEN, PRICE_MAX,
    PRICE_SCALE, TITLE_MAX_LEN,
};
use crate::errors::{FieldError, ValidationError};

/// Input that has passed validation and normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Trim and check a bounded, required text field.
pub fn validate_bounded_text(
    field: &'static str,
    raw: &str,
    max_len: usize,
) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, "must not be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(FieldError::new(field, format!("must be at most {max_len} characters")));
    }
    Ok(trimmed.to_string())
}

pub fn validate_title(raw: &str) -> Result<String, FieldError> {
    validate_bounded_text("title", raw, TITLE_MAX_LEN)
}

pub fn validate_author(raw: &str) -> Result<String, FieldError> {
    validate_bounded_text("author", raw, AUTHOR_MAX_LEN)
}

/// Description is stored verbatim; it only has to contain something.
pub fn validate_description(raw: &str) -> Result<String, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::new("description", "must not be empty"));
    }
    Ok(raw.to_string())
}

/// Round to the storage scale, then enforce `0 < price <= 99,999,999.99`.
pub fn validate_price(raw: Decimal) -> Result<Decimal, FieldError> {
    let mut price = raw.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(PRICE_SCALE);
    if price <= Decimal::ZERO {
        return Err(FieldError::new("price", "must be greater than 0"));
    }
    if price > PRICE_MAX {
        return Err(FieldError::new("price", format!("must be at most {}", PRICE_MAX)));
    }
    Ok(price)
}

fn collect<T>(slot: &mut Option<T>, errors: &mut Vec<FieldError>, result: Result<T, FieldError>) {
    match result {
        Ok(v) => *slot = Some(v),
        Err(e) => errors.push(e),
    }
}

impl NewAdvertisement {
    /// Check every field, reporting all offending fields at once.
    pub fn validate(self) -> Result<Validated<NewAdvertisement>, ValidationError> {
        match (
            validate_title(&self.title),
            validate_description(&self.description),
            validate_price(self.price),
            validate_author(&self.author),
        ) {
            (Ok(title), Ok(description), Ok(price), Ok(author)) => {
                Ok(Validated(NewAdvertisement { title, description, price, author }))
            }
            (t, d, p, a) => Err(ValidationError {
                fields: [t.err(), d.err(), p.err(), a.err()].into_iter().flatten().collect(),
            }),
        }
    }
}

fn not_null<T>(field: &'static str, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or_else(|| FieldError::new(field, "must not be null"))
}

impl AdvertisementPatch {
    /// Validate only the supplied fields. An empty patch is valid.
    pub fn validate(self) -> Result<Validated<AdvertisementChanges>, ValidationError> {
        let mut errors = Vec::new();
        let mut changes = AdvertisementChanges::default();

        if let Some(v) = self.title {
            collect(
                &mut changes.title,
                &mut errors,
                not_null("title", v).and_then(|t| validate_title(&t)),
            );
        }
        if let Some(v) = self.description {
            collect(
                &mut changes.description,
                &mut errors,
                not_null("description", v).and_then(|d| validate_description(&d)),
            );
        }
        if let Some(v) = self.price {
            collect(&mut changes.price, &mut errors, not_null("price", v).and_then(validate_price));
        }
        if let Some(v) = self.author {
            collect(
                &mut changes.author,
                &mut errors,
                not_null("author", v).and_then(|a| validate_author(&a)),
            );
        }

        ValidationError::from_fields(errors)?;
        Ok(Validated(changes))
    }
}
