use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{
    CreateBookingRequest, CreateOrderRequest, MenuType, OrderItem, ValidationError,
    ValidationResult,
};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_PHONE_LENGTH: usize = 50;
pub const MAX_FREE_TEXT_LENGTH: usize = 1000;
pub const MAX_STATUS_LENGTH: usize = 50;
pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 20;
pub const MIN_LINE_QUANTITY: u32 = 1;
pub const MAX_LINE_QUANTITY: u32 = 1000;
pub const MAX_ORDER_LINES: usize = 100;
/// Keeps the largest order total (lines x quantity x price) well inside `Decimal` range
pub const MAX_LINE_PRICE: Decimal = dec!(1000000);

impl Validate for CreateBookingRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_required_text("guest_name", &self.guest_name, MAX_NAME_LENGTH)?;
        validate_email(&self.guest_email)?;
        validate_required_text("guest_phone", &self.guest_phone, MAX_PHONE_LENGTH)?;
        validate_date("check_in_date", &self.check_in_date)?;
        validate_date("check_out_date", &self.check_out_date)?;
        validate_required_text("room_type", &self.room_type, MAX_NAME_LENGTH)?;
        validate_guest_count(self.number_of_guests)?;
        validate_optional_text(
            "special_requests",
            self.special_requests.as_deref(),
            MAX_FREE_TEXT_LENGTH,
        )?;
        Ok(())
    }
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_menu_type("order_type", &self.order_type)?;
        validate_order_items(&self.items)?;
        validate_optional_text("table_number", self.table_number.as_deref(), MAX_NAME_LENGTH)?;
        validate_optional_text(
            "customer_name",
            self.customer_name.as_deref(),
            MAX_NAME_LENGTH,
        )?;
        validate_optional_text(
            "customer_phone",
            self.customer_phone.as_deref(),
            MAX_PHONE_LENGTH,
        )?;
        validate_optional_text(
            "special_instructions",
            self.special_instructions.as_deref(),
            MAX_FREE_TEXT_LENGTH,
        )?;
        Ok(())
    }
}

impl Validate for OrderItem {
    fn validate(&self) -> ValidationResult<()> {
        validate_required_text("item_id", &self.item_id, MAX_NAME_LENGTH)?;
        validate_required_text("name", &self.name, MAX_NAME_LENGTH)?;
        validate_line_price(&self.price)?;
        validate_line_quantity(self.quantity)?;
        Ok(())
    }
}

/// Validate a mandatory text field: non-blank and within `max_length`
pub fn validate_required_text(field: &str, value: &str, max_length: usize) -> ValidationResult<()> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }

    validate_length(field, trimmed, max_length)?;

    if trimmed
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Contains invalid control characters".to_string(),
        });
    }

    Ok(())
}

/// Validate an optional text field; absent and empty values are accepted
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max_length: usize,
) -> ValidationResult<()> {
    match value {
        Some(value) => validate_length(field, value.trim(), max_length),
        None => Ok(()),
    }
}

fn validate_length(field: &str, value: &str, max_length: usize) -> ValidationResult<()> {
    let length = value.chars().count();
    if length > max_length {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max_length,
            actual_length: length,
        });
    }
    Ok(())
}

/// Validate guest email: one `@` with a non-empty local part and a dotted domain
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required_text("guest_email", email, MAX_EMAIL_LENGTH)?;

    let trimmed = email.trim();
    let well_formed = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "guest_email".to_string(),
            expected: "local@domain".to_string(),
        });
    }

    Ok(())
}

/// Validate a calendar date string (`YYYY-MM-DD`) and return the parsed date
pub fn validate_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }

    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            expected: "YYYY-MM-DD".to_string(),
        }
    })
}

/// Validate the number of guests against the booking policy
pub fn validate_guest_count(count: u32) -> ValidationResult<()> {
    if !(MIN_GUESTS..=MAX_GUESTS).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "number_of_guests".to_string(),
            min: MIN_GUESTS.to_string(),
            max: MAX_GUESTS.to_string(),
            value: count.to_string(),
        });
    }
    Ok(())
}

/// Validate a menu type discriminator
pub fn validate_menu_type(field: &str, value: &str) -> ValidationResult<MenuType> {
    value
        .parse::<MenuType>()
        .map_err(|reason| ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason,
        })
}

/// Validate the order lines as a whole and one by one
pub fn validate_order_items(items: &[OrderItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "items".to_string(),
        });
    }

    if items.len() > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: "1".to_string(),
            max: MAX_ORDER_LINES.to_string(),
            value: items.len().to_string(),
        });
    }

    items.iter().try_for_each(Validate::validate)
}

/// Validate a client supplied line price
pub fn validate_line_price(price: &Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::InvalidValue {
            field: "price".to_string(),
            value: price.to_string(),
            reason: "Price cannot be negative".to_string(),
        });
    }
    if *price > MAX_LINE_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: Decimal::ZERO.to_string(),
            max: MAX_LINE_PRICE.to_string(),
            value: price.to_string(),
        });
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_line_quantity(quantity: u32) -> ValidationResult<()> {
    if !(MIN_LINE_QUANTITY..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_LINE_QUANTITY.to_string(),
            max: MAX_LINE_QUANTITY.to_string(),
            value: quantity.to_string(),
        });
    }
    Ok(())
}

/// Validate a new order status. Any non-blank label is accepted.
pub fn validate_order_status(status: &str) -> ValidationResult<()> {
    validate_required_text("status", status, MAX_STATUS_LENGTH)
}
