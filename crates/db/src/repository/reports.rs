//! Read-only report queries behind the listing menu entries.

use sqlx::PgConnection;

use crate::{
    DbError,
    models::{BusyCarRow, CustomerBillRow, FleetOwnerRow, LowBillRow, VintageCarRow},
};

/// Closed requests billed below `max_bill`, with the customer's name.
pub async fn bills_below(conn: &mut PgConnection, max_bill: i32) -> Result<Vec<LowBillRow>, DbError> {
    let rows = sqlx::query_as::<_, LowBillRow>(
        r#"
        SELECT customer.fname, customer.lname, closed_request.bill,
               service_request.date, closed_request.comment
        FROM closed_request
        JOIN service_request ON service_request.rid = closed_request.rid
        JOIN customer ON customer.id = service_request.customer_id
        WHERE closed_request.bill < $1
        ORDER BY closed_request.wid
        "#,
    )
    .bind(max_bill)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Customers owning strictly more than `min_cars` cars.
pub async fn customers_owning_more_than(
    conn: &mut PgConnection,
    min_cars: i64,
) -> Result<Vec<FleetOwnerRow>, DbError> {
    let rows = sqlx::query_as::<_, FleetOwnerRow>(
        r#"
        SELECT customer.fname, customer.lname, COUNT(*) AS num_cars
        FROM owns
        JOIN customer ON customer.id = owns.customer_id
        GROUP BY customer.id, customer.fname, customer.lname
        HAVING COUNT(*) > $1
        ORDER BY customer.id
        "#,
    )
    .bind(min_cars)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Service intakes of cars built before `before_year` with the odometer
/// below `max_odometer`.
pub async fn cars_built_before_under_mileage(
    conn: &mut PgConnection,
    before_year: i32,
    max_odometer: i32,
) -> Result<Vec<VintageCarRow>, DbError> {
    let rows = sqlx::query_as::<_, VintageCarRow>(
        r#"
        SELECT car.make, car.model, car.year, service_request.odometer
        FROM service_request
        JOIN car ON car.vin = service_request.car_vin
        WHERE service_request.odometer < $1 AND car.year < $2
        ORDER BY service_request.rid
        "#,
    )
    .bind(max_odometer)
    .bind(before_year)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Cars with exactly `open_requests` unclosed service requests, highest
/// count first, at most `limit` rows.
pub async fn cars_with_open_requests(
    conn: &mut PgConnection,
    open_requests: i64,
    limit: i64,
) -> Result<Vec<BusyCarRow>, DbError> {
    let rows = sqlx::query_as::<_, BusyCarRow>(
        r#"
        SELECT car.make, car.model, car.vin, COUNT(*) AS open_requests
        FROM service_request
        JOIN car ON car.vin = service_request.car_vin
        WHERE NOT EXISTS (
            SELECT 1 FROM closed_request WHERE closed_request.rid = service_request.rid
        )
        GROUP BY car.make, car.model, car.vin
        HAVING COUNT(*) = $1
        ORDER BY open_requests DESC, car.vin
        LIMIT $2
        "#,
    )
    .bind(open_requests)
    .bind(limit)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Every billed customer with the sum of their bills, largest first.
pub async fn customers_by_total_bill(conn: &mut PgConnection) -> Result<Vec<CustomerBillRow>, DbError> {
    let rows = sqlx::query_as::<_, CustomerBillRow>(
        r#"
        SELECT customer.fname, customer.lname, SUM(closed_request.bill) AS total_bill
        FROM closed_request
        JOIN service_request ON service_request.rid = closed_request.rid
        JOIN customer ON customer.id = service_request.customer_id
        GROUP BY customer.id, customer.fname, customer.lname
        ORDER BY total_bill DESC, customer.id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}
