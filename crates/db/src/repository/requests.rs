//! Service request and closure repository functions.

use sqlx::PgConnection;

use super::{next_id, IdTable};
use crate::{
    DbError,
    models::{ClosedRequestRow, NewClosure, NewServiceRequest, ServiceRequestRow},
};

// ---------------------------------------------------------------------------
// service_request
// ---------------------------------------------------------------------------

/// Open a service request dated `CURRENT_DATE`. Call inside a transaction.
pub async fn insert_service_request(
    conn: &mut PgConnection,
    request: &NewServiceRequest,
) -> Result<ServiceRequestRow, DbError> {
    let rid = next_id(conn, IdTable::ServiceRequest).await?;

    let row = sqlx::query_as::<_, ServiceRequestRow>(
        r#"
        INSERT INTO service_request (rid, customer_id, car_vin, date, odometer, complain)
        VALUES ($1, $2, $3, CURRENT_DATE, $4, $5)
        RETURNING rid, customer_id, car_vin, date, odometer, complain
        "#,
    )
    .bind(rid)
    .bind(request.customer_id)
    .bind(&request.car_vin)
    .bind(request.odometer)
    .bind(&request.complaint)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

pub async fn get_service_request(
    conn: &mut PgConnection,
    rid: i32,
) -> Result<Option<ServiceRequestRow>, DbError> {
    let row = sqlx::query_as::<_, ServiceRequestRow>(
        r#"
        SELECT rid, customer_id, car_vin, date, odometer, complain
        FROM service_request
        WHERE rid = $1
        "#,
    )
    .bind(rid)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

/// `true` if the request exists and is dated on or before `CURRENT_DATE`.
pub async fn is_dated_on_or_before_today(conn: &mut PgConnection, rid: i32) -> Result<bool, DbError> {
    let ok = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM service_request WHERE rid = $1 AND date <= CURRENT_DATE)",
    )
    .bind(rid)
    .fetch_one(&mut *conn)
    .await?;
    Ok(ok)
}

// ---------------------------------------------------------------------------
// closed_request
// ---------------------------------------------------------------------------

pub async fn get_closure_for_request(
    conn: &mut PgConnection,
    rid: i32,
) -> Result<Option<ClosedRequestRow>, DbError> {
    let row = sqlx::query_as::<_, ClosedRequestRow>(
        "SELECT wid, rid, mid, date, comment, bill FROM closed_request WHERE rid = $1",
    )
    .bind(rid)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

/// Close a request dated `CURRENT_DATE`. Call inside a transaction.
///
/// Returns [`DbError::AlreadyClosed`] if the request already has a closure.
pub async fn insert_closure(
    conn: &mut PgConnection,
    closure: &NewClosure,
) -> Result<ClosedRequestRow, DbError> {
    let wid = next_id(conn, IdTable::ClosedRequest).await?;

    // The table lock taken by `next_id` keeps this check valid until commit.
    if get_closure_for_request(conn, closure.rid).await?.is_some() {
        return Err(DbError::AlreadyClosed(closure.rid));
    }

    let row = sqlx::query_as::<_, ClosedRequestRow>(
        r#"
        INSERT INTO closed_request (wid, rid, mid, date, comment, bill)
        VALUES ($1, $2, $3, CURRENT_DATE, $4, $5)
        RETURNING wid, rid, mid, date, comment, bill
        "#,
    )
    .bind(wid)
    .bind(closure.rid)
    .bind(closure.mechanic_id)
    .bind(&closure.comment)
    .bind(closure.bill)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}
