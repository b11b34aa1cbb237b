//! Unified error codes for the back office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Menu errors
//! - 4xxx: Inventory errors
//! - 5xxx: Reservation errors
//! - 6xxx: Table errors
//! - 7xxx: Staff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they survive
/// serialization unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Password does not meet the strength rules
    PasswordTooWeak = 1003,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Menu ====================
    /// Menu not found
    MenuNotFound = 3001,
    /// Menu item not found
    MenuItemNotFound = 3002,
    /// Menu subgroup not found
    SubgroupNotFound = 3003,
    /// Subgroup name used twice within one menu
    SubgroupNameExists = 3004,
    /// Menu item has an invalid price
    MenuItemInvalidPrice = 3005,

    // ==================== 4xxx: Inventory ====================
    /// Inventory item not found
    InventoryItemNotFound = 4001,
    /// Inventory item name already exists
    InventoryItemExists = 4002,

    // ==================== 5xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 5001,
    /// Reservation status is not one of booked/cancelled/completed
    InvalidReservationStatus = 5002,

    // ==================== 6xxx: Table ====================
    /// Table not found
    TableNotFound = 6001,
    /// Table number already exists
    TableNumberExists = 6002,
    /// Table status is not one of free/occupied/reserved
    InvalidTableStatus = 6003,

    // ==================== 7xxx: Staff ====================
    /// User not found
    UserNotFound = 7001,
    /// Username already exists
    UsernameExists = 7002,
    /// Staff task not found
    TaskNotFound = 7003,
    /// User is not a staff member
    NotStaffMember = 7004,
    /// Role is not one of admin/staff/customer
    InvalidRole = 7005,
    /// Task status is not one of assigned/in_progress/completed
    InvalidTaskStatus = 7006,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Database could not be reached
    DatabaseUnavailable = 9003,
    /// Transaction rolled back
    TransactionFailed = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::PasswordTooWeak => "Password does not meet the requirements",

            // Permission
            ErrorCode::AdminRequired => "Admin role required",

            // Menu
            ErrorCode::MenuNotFound => "Menu not found",
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::SubgroupNotFound => "Menu subgroup not found",
            ErrorCode::SubgroupNameExists => "Subgroup name already exists in this menu",
            ErrorCode::MenuItemInvalidPrice => "Menu item has an invalid price",

            // Inventory
            ErrorCode::InventoryItemNotFound => "Inventory item not found",
            ErrorCode::InventoryItemExists => "Inventory item already exists",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InvalidReservationStatus => "Invalid reservation status",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberExists => "Table number already exists",
            ErrorCode::InvalidTableStatus => "Invalid table status",

            // Staff
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameExists => "Username already exists",
            ErrorCode::TaskNotFound => "Staff task not found",
            ErrorCode::NotStaffMember => "User is not a staff member",
            ErrorCode::InvalidRole => "Invalid role",
            ErrorCode::InvalidTaskStatus => "Invalid task status",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::DatabaseUnavailable => "Unable to connect to the database",
            ErrorCode::TransactionFailed => "The change was rolled back",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::PasswordTooWeak),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),

            // Menu
            3001 => Ok(ErrorCode::MenuNotFound),
            3002 => Ok(ErrorCode::MenuItemNotFound),
            3003 => Ok(ErrorCode::SubgroupNotFound),
            3004 => Ok(ErrorCode::SubgroupNameExists),
            3005 => Ok(ErrorCode::MenuItemInvalidPrice),

            // Inventory
            4001 => Ok(ErrorCode::InventoryItemNotFound),
            4002 => Ok(ErrorCode::InventoryItemExists),

            // Reservation
            5001 => Ok(ErrorCode::ReservationNotFound),
            5002 => Ok(ErrorCode::InvalidReservationStatus),

            // Table
            6001 => Ok(ErrorCode::TableNotFound),
            6002 => Ok(ErrorCode::TableNumberExists),
            6003 => Ok(ErrorCode::InvalidTableStatus),

            // Staff
            7001 => Ok(ErrorCode::UserNotFound),
            7002 => Ok(ErrorCode::UsernameExists),
            7003 => Ok(ErrorCode::TaskNotFound),
            7004 => Ok(ErrorCode::NotStaffMember),
            7005 => Ok(ErrorCode::InvalidRole),
            7006 => Ok(ErrorCode::InvalidTaskStatus),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::DatabaseUnavailable),
            9004 => Ok(ErrorCode::TransactionFailed),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
