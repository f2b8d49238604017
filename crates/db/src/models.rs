//! Row structs that map 1-to-1 onto database tables, plus the input and
//! report shapes used by the repository functions.
//!
//! These are *persistence* models — they carry no menu behaviour.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// customer
// ---------------------------------------------------------------------------

/// A persisted customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CustomerRow {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub phone: String,
    pub address: String,
}

/// Fields entered for a new customer; the id is allocated on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub fname: String,
    pub lname: String,
    pub phone: String,
    pub address: String,
}

// ---------------------------------------------------------------------------
// mechanic
// ---------------------------------------------------------------------------

/// A persisted mechanic row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MechanicRow {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    /// Years of experience.
    pub experience: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMechanic {
    pub fname: String,
    pub lname: String,
    pub experience: i32,
}

// ---------------------------------------------------------------------------
// car / owns
// ---------------------------------------------------------------------------

/// A persisted car row. The VIN is the primary key and is entered by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CarRow {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// A persisted ownership row linking a customer to a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OwnershipRow {
    pub ownership_id: i32,
    pub customer_id: i32,
    pub car_vin: String,
}

/// One entry of a customer's numbered car listing.
///
/// `position` starts at 1 and follows ownership insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OwnedCarRow {
    pub position: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// service_request / closed_request
// ---------------------------------------------------------------------------

/// A persisted service request row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ServiceRequestRow {
    pub rid: i32,
    pub customer_id: i32,
    pub car_vin: String,
    pub date: NaiveDate,
    pub odometer: i32,
    pub complain: String,
}

/// A service request about to be opened. The date is the database's
/// current date at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRequest {
    pub customer_id: i32,
    pub car_vin: String,
    pub odometer: i32,
    pub complaint: String,
}

/// A persisted closure row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ClosedRequestRow {
    pub wid: i32,
    pub rid: i32,
    pub mid: i32,
    pub date: NaiveDate,
    pub comment: String,
    pub bill: i32,
}

/// A closure about to be written. The close date is the database's
/// current date at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClosure {
    pub rid: i32,
    pub mechanic_id: i32,
    pub comment: String,
    pub bill: i32,
}

/// Ids allocated when a new car is registered together with its first
/// service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCarRequest {
    pub ownership_id: i32,
    pub rid: i32,
}

// ---------------------------------------------------------------------------
// reports
// ---------------------------------------------------------------------------

/// A closed request billed under the report threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LowBillRow {
    pub fname: String,
    pub lname: String,
    pub bill: i32,
    pub date: NaiveDate,
    pub comment: String,
}

/// A customer and how many cars they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FleetOwnerRow {
    pub fname: String,
    pub lname: String,
    pub num_cars: i64,
}

/// An old, low-mileage car as seen at service intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VintageCarRow {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub odometer: i32,
}

/// A car and its number of open (unclosed) service requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BusyCarRow {
    pub make: String,
    pub model: String,
    pub vin: String,
    pub open_requests: i64,
}

/// A customer's summed bills over all their closed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CustomerBillRow {
    pub fname: String,
    pub lname: String,
    pub total_bill: i64,
}
