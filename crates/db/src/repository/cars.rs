//! Car and ownership repository functions.

use sqlx::PgConnection;

use super::{next_id, IdTable};
use crate::{
    DbError,
    models::{CarRow, OwnedCarRow, OwnershipRow},
};

/// Insert a car. A duplicate VIN surfaces as [`DbError::Constraint`].
pub async fn insert_car(conn: &mut PgConnection, car: &CarRow) -> Result<(), DbError> {
    sqlx::query("INSERT INTO car (vin, make, model, year) VALUES ($1, $2, $3, $4)")
        .bind(&car.vin)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn get_car(conn: &mut PgConnection, vin: &str) -> Result<Option<CarRow>, DbError> {
    let row = sqlx::query_as::<_, CarRow>("SELECT vin, make, model, year FROM car WHERE vin = $1")
        .bind(vin)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Link a car to a customer under the next free ownership id.
/// Call inside a transaction.
pub async fn insert_ownership(
    conn: &mut PgConnection,
    customer_id: i32,
    car_vin: &str,
) -> Result<OwnershipRow, DbError> {
    let ownership_id = next_id(conn, IdTable::Owns).await?;

    let row = sqlx::query_as::<_, OwnershipRow>(
        r#"
        INSERT INTO owns (ownership_id, customer_id, car_vin)
        VALUES ($1, $2, $3)
        RETURNING ownership_id, customer_id, car_vin
        "#,
    )
    .bind(ownership_id)
    .bind(customer_id)
    .bind(car_vin)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

/// A customer's cars numbered from 1 in ownership insertion order.
pub async fn list_owned_cars(
    conn: &mut PgConnection,
    customer_id: i32,
) -> Result<Vec<OwnedCarRow>, DbError> {
    let rows = sqlx::query_as::<_, OwnedCarRow>(
        r#"
        SELECT ROW_NUMBER() OVER (ORDER BY owns.ownership_id) AS position,
               car.vin, car.make, car.model, car.year
        FROM owns
        JOIN car ON car.vin = owns.car_vin
        WHERE owns.customer_id = $1
        ORDER BY position
        "#,
    )
    .bind(customer_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}
