//! Request field validation.
//!
//! Request bodies derive [`Validate`]. Every violation is reported, each
//! prefixed with the JSON field name, in the order the body declares them.

use std::borrow::Cow;

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::ApiError;

const REQUIRED: &str = "Failed ! This field is required, please fill it";
const PRICE_NOT_POSITIVE: &str = "Failed ! Price must be greater than 0";

/// A validated request body.
pub(crate) trait ValidateRequest: Validate {
    /// Field names, in the order their violations are reported.
    const FIELDS: &'static [&'static str];

    /// `Ok` when nothing was violated, else a 400 "Validation failed".
    fn check(&self) -> Result<(), ApiError> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(report) => Err(ApiError::bad_request(
                "Validation failed",
                violations(&report, Self::FIELDS),
            )),
        }
    }
}

fn violations(report: &ValidationErrors, order: &[&str]) -> Vec<String> {
    let mut fields: Vec<_> = report.field_errors().into_iter().collect();

    fields.sort_by_key(|(field, _)| rank(order, field));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors
                .iter()
                .map(move |error| format!("{field}: {}", message(error)))
        })
        .collect()
}

fn rank(order: &[&str], field: &str) -> usize {
    order
        .iter()
        .position(|name| *name == field)
        .unwrap_or(order.len())
}

fn message(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => error.code.to_string(),
    }
}

/// An empty name is a missing one.
pub(crate) fn filled(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(REQUIRED)));
    }

    Ok(())
}

pub(crate) fn positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("price").with_message(Cow::Borrowed(PRICE_NOT_POSITIVE)));
    }

    Ok(())
}

/// The nil uuid never names a record.
pub(crate) fn not_nil(uuid: &Uuid) -> Result<(), ValidationError> {
    if uuid.is_nil() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(REQUIRED)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct Listing {
        #[validate(
            custom(function = "crate::validation::filled"),
            length(max = 255, message = "Failed ! value should be at most 255")
        )]
        name: String,
        #[validate(
            required(message = "Failed ! This field is required, please fill it"),
            custom(function = "crate::validation::positive_price")
        )]
        price: Option<Decimal>,
        #[validate(
            required(message = "Failed ! This field is required, please fill it"),
            range(min = 0, message = "Failed ! Quantity must be 0 or greater")
        )]
        quantity: Option<i32>,
        #[validate(
            required(message = "Failed ! This field is required, please fill it"),
            custom(function = "crate::validation::not_nil")
        )]
        owner: Option<Uuid>,
    }

    impl ValidateRequest for Listing {
        const FIELDS: &'static [&'static str] = &["name", "price", "quantity", "owner"];
    }

    fn valid() -> Listing {
        Listing {
            name: "Widget".to_string(),
            price: Some(Decimal::ONE),
            quantity: Some(0),
            owner: Some(Uuid::now_v7()),
        }
    }

    fn messages(listing: &Listing) -> Vec<String> {
        match listing.check() {
            Err(ApiError::BadRequest { errors, .. }) => errors,
            _ => Vec::new(),
        }
    }

    #[test]
    fn zero_quantity_is_valid() {
        assert!(valid().check().is_ok());
    }

    #[test]
    fn empty_name_is_reported_as_missing_once() {
        let listing = Listing {
            name: String::new(),
            ..valid()
        };

        assert_eq!(
            messages(&listing),
            vec!["name: Failed ! This field is required, please fill it"]
        );
    }

    #[test]
    fn long_names_are_rejected_by_character_count() {
        let ok = Listing {
            name: "é".repeat(255),
            ..valid()
        };

        let long = Listing {
            name: "a".repeat(256),
            ..valid()
        };

        assert!(ok.check().is_ok());
        assert_eq!(
            messages(&long),
            vec!["name: Failed ! value should be at most 255"]
        );
    }

    #[test]
    fn every_violation_is_collected_in_field_order() {
        let listing = Listing {
            name: String::new(),
            price: Some(Decimal::ZERO),
            quantity: Some(-1),
            owner: None,
        };

        assert_eq!(
            messages(&listing),
            vec![
                "name: Failed ! This field is required, please fill it",
                "price: Failed ! Price must be greater than 0",
                "quantity: Failed ! Quantity must be 0 or greater",
                "owner: Failed ! This field is required, please fill it",
            ]
        );
    }

    #[test]
    fn nil_uuid_counts_as_missing() {
        let listing = Listing {
            owner: Some(Uuid::nil()),
            ..valid()
        };

        assert_eq!(
            messages(&listing),
            vec!["owner: Failed ! This field is required, please fill it"]
        );
    }

    #[test]
    fn unlisted_fields_are_reported_last() {
        assert_eq!(rank(&["a", "b"], "b"), 1);
        assert_eq!(rank(&["a", "b"], "z"), 2);
    }
}
