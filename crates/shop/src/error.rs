//! Workflow-level error types.

use thiserror::Error;

/// Errors that end a single menu operation.
///
/// None of these stop the menu loop; the operation's message is printed
/// and the user is returned to the main menu.
#[derive(Debug, Error)]
pub enum ShopError {
    // ------ Input errors ------

    /// The answer to a prompt was unusable, or input ended.
    #[error(transparent)]
    Input(#[from] console::ConsoleError),

    /// The entered customer id was not among the customers listed.
    #[error("customer {0} is not one of the listed customers")]
    UnknownCustomer(i32),

    /// The car selection was neither 0 nor a listed position.
    #[error("selection {selection} is out of range (0 for a new car, or 1 to {listed})")]
    SelectionOutOfRange { selection: i32, listed: usize },

    // ------ Closure validation errors ------

    #[error("Please enter a valid Mechanic Identification Number")]
    UnknownMechanic(i32),

    #[error("Please enter a valid Service Request Identification Number")]
    UnknownServiceRequest(i32),

    /// The request is dated after today.
    #[error("Please enter a valid service request date")]
    FutureDatedRequest(i32),

    #[error("Service request {0} is already closed")]
    AlreadyClosed(i32),

    // ------ Persistence errors ------

    /// Gateway failure; the driver's message is passed through.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}
