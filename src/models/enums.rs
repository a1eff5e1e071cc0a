use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Partition of the food & beverage catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuType {
    Bar,
    Restaurant,
}

impl MenuType {
    pub const ALL: [MenuType; 2] = [MenuType::Bar, MenuType::Restaurant];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuType::Bar => "bar",
            MenuType::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuType {
    type Err = String;

    /// Only the exact lowercase names are accepted; they end up verbatim in QR urls.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(MenuType::Bar),
            "restaurant" => Ok(MenuType::Restaurant),
            _ => Err(format!("Invalid menu type: {}", s)),
        }
    }
}

/// Lifecycle of a booking. Only `Confirmed` is ever assigned today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// Status assigned to every freshly placed order. Later statuses are free-form.
pub const INITIAL_ORDER_STATUS: &str = "pending";
