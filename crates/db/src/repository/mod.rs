//! Repository functions — one function per database operation.
//!
//! Every function takes a `&mut PgConnection` (a pooled connection or an
//! open transaction) and returns a `Result<T, DbError>`.  Every value that
//! came from the console is bound as a parameter.  No menu logic — pure SQL.

pub mod customers;
pub mod mechanics;
pub mod cars;
pub mod requests;
pub mod reports;

use sqlx::PgConnection;

use crate::DbError;

/// Tables whose integer ids are allocated as "row count + 1".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdTable {
    Customer,
    Mechanic,
    Owns,
    ServiceRequest,
    ClosedRequest,
}

impl IdTable {
    pub fn name(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Mechanic => "mechanic",
            Self::Owns => "owns",
            Self::ServiceRequest => "service_request",
            Self::ClosedRequest => "closed_request",
        }
    }
}

/// Allocate the next id for `table` as `COUNT(*) + 1`.
///
/// Must run inside a transaction: the table is locked against concurrent
/// writers until that transaction ends, so the count stays valid for the
/// insert that follows.
pub async fn next_id(conn: &mut PgConnection, table: IdTable) -> Result<i32, DbError> {
    sqlx::query(&format!(
        "LOCK TABLE {} IN SHARE ROW EXCLUSIVE MODE",
        table.name()
    ))
    .execute(&mut *conn)
    .await?;

    let id = sqlx::query_scalar::<_, i32>(&format!(
        "SELECT (COUNT(*) + 1)::int4 FROM {}",
        table.name()
    ))
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}
