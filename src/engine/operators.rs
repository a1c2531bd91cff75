//! Operator dispatch and clamping
//!
//! Turns a resolved product plus an operator into a store operation without
//! touching the store, so every operator is testable in isolation.

use super::types::ApplyConfig;
use crate::database::FieldUpdate;
use crate::error::{Error, Result};
use crate::types::{Product, UpdateMethod};

/// What the engine should do to the store for one record
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Write the patch (always counted)
    Update(FieldUpdate),
    /// Delete the product
    Remove,
    /// Leave the product unchanged
    Noop,
}

/// Compute the operation for `method` applied to `product`.
///
/// Prices and quantities are clamped at zero, except `quantity_add` which is
/// only clamped when `config.clamp_quantity_add` is set.
pub fn plan(
    product: &Product,
    method: &UpdateMethod,
    param: Option<&str>,
    config: &ApplyConfig,
) -> Result<Operation> {
    let op = match method {
        UpdateMethod::PriceAbs => {
            let delta = parse_float(product, method, param)?;
            let price = clamp_price(product.price + delta);
            Operation::Update(FieldUpdate::new().price(price).counted())
        }
        UpdateMethod::PricePercent => {
            let ratio = parse_float(product, method, param)?;
            let price = clamp_price(product.price * (1.0 + ratio));
            Operation::Update(FieldUpdate::new().price(price).counted())
        }
        UpdateMethod::QuantityAdd => {
            let delta = parse_int(product, method, param)?;
            let quantity = product
                .quantity
                .checked_add(delta)
                .ok_or_else(|| overflow(product, method))?;
            let quantity = if config.clamp_quantity_add {
                quantity.max(0)
            } else {
                quantity
            };
            Operation::Update(FieldUpdate::new().quantity(quantity).counted())
        }
        UpdateMethod::QuantitySub => {
            let delta = parse_int(product, method, param)?;
            let quantity = product
                .quantity
                .checked_sub(delta)
                .ok_or_else(|| overflow(product, method))?
                .max(0);
            Operation::Update(FieldUpdate::new().quantity(quantity).counted())
        }
        UpdateMethod::Available => {
            let param = require_param(product, method, param)?;
            let available = param.eq_ignore_ascii_case("true");
            Operation::Update(FieldUpdate::new().available(available).counted())
        }
        UpdateMethod::Remove => Operation::Remove,
        UpdateMethod::Unknown(_) => Operation::Noop,
    };

    Ok(op)
}

/// `max(0, price)`; a NaN result collapses to zero
fn clamp_price(price: f64) -> f64 {
    price.max(0.0)
}

fn require_param<'a>(
    product: &Product,
    method: &UpdateMethod,
    param: Option<&'a str>,
) -> Result<&'a str> {
    param.ok_or_else(|| Error::operator(&product.name, method.as_str(), "missing 'param'"))
}

fn parse_float(product: &Product, method: &UpdateMethod, param: Option<&str>) -> Result<f64> {
    let raw = require_param(product, method, param)?;
    let value: f64 = raw.parse().map_err(|e| {
        Error::operator(
            &product.name,
            method.as_str(),
            format!("invalid number '{raw}': {e}"),
        )
    })?;
    if !value.is_finite() {
        return Err(Error::operator(
            &product.name,
            method.as_str(),
            format!("non-finite number '{raw}'"),
        ));
    }
    Ok(value)
}

fn parse_int(product: &Product, method: &UpdateMethod, param: Option<&str>) -> Result<i64> {
    let raw = require_param(product, method, param)?;
    raw.parse().map_err(|e| {
        Error::operator(
            &product.name,
            method.as_str(),
            format!("invalid integer '{raw}': {e}"),
        )
    })
}

fn overflow(product: &Product, method: &UpdateMethod) -> Error {
    Error::operator(&product.name, method.as_str(), "quantity overflow")
}
