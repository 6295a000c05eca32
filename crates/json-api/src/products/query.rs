//! Listing query parsing.
//!
//! Query values arrive as raw strings and are parsed here, so a bad value is
//! reported as a 422 with every offending parameter instead of a bare 400.

use std::{fmt::Display, str::FromStr};

use salvo::prelude::StatusError;

use wisteria_app::{
    domain::products::ProductFilters, pagination::PageRequest, validation::ValidationErrors,
};

use crate::errors::validation_failed;

/// Raw catalog listing parameters.
#[derive(Debug, Default)]
pub(crate) struct ListingQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub search: Option<String>,
    pub available_only: Option<String>,
}

/// Who is asking decides what `available_only` may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Audience {
    /// Always restricted to available products.
    Public,

    /// Sees everything unless `available_only=true` is passed.
    Admin,
}

impl ListingQuery {
    pub(crate) fn parse(
        self,
        audience: Audience,
    ) -> Result<(ProductFilters, PageRequest), StatusError> {
        let mut errors = ValidationErrors::new();

        let page = parse_field("page", self.page, &mut errors);
        let per_page = parse_field("per_page", self.per_page, &mut errors);
        let category = parse_field("category", self.category, &mut errors);
        let condition = parse_field("condition", self.condition, &mut errors);
        let available_only = parse_flag("available_only", self.available_only, &mut errors);

        let request = match PageRequest::new(page, per_page) {
            Ok(request) => Some(request),
            Err(page_errors) => {
                for error in page_errors.errors() {
                    errors.add(error.field, error.message.clone());
                }

                None
            }
        };

        let search = self.search.filter(|term| !term.is_empty());

        let filters = match audience {
            Audience::Public => ProductFilters::public(category, condition, search),
            Audience::Admin => ProductFilters {
                available_only: available_only.unwrap_or(false),
                category,
                condition,
                search,
            },
        };

        match (errors.into_result(), request) {
            (Ok(()), Some(request)) => Ok((filters, request)),
            (Err(errors), _) => Err(validation_failed(&errors)),
            (Ok(()), None) => Err(StatusError::unprocessable_entity()),
        }
    }
}

fn parse_field<T>(
    field: &'static str,
    raw: Option<String>,
    errors: &mut ValidationErrors,
) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = raw?;

    raw.trim()
        .parse()
        .inspect_err(|error| errors.add(field, format!("invalid value `{raw}`: {error}")))
        .ok()
}

fn parse_flag(
    field: &'static str,
    raw: Option<String>,
    errors: &mut ValidationErrors,
) -> Option<bool> {
    let raw = raw?;

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            errors.add(field, format!("invalid value `{raw}`: expected a boolean"));

            None
        }
    }
}
