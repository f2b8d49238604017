//! Customer repository functions.

use sqlx::PgConnection;

use super::{next_id, IdTable};
use crate::{
    DbError,
    models::{CustomerRow, NewCustomer},
};

/// Insert a customer under the next free id. Call inside a transaction.
pub async fn insert_customer(
    conn: &mut PgConnection,
    customer: &NewCustomer,
) -> Result<CustomerRow, DbError> {
    let id = next_id(conn, IdTable::Customer).await?;

    let row = sqlx::query_as::<_, CustomerRow>(
        r#"
        INSERT INTO customer (id, fname, lname, phone, address)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, fname, lname, phone, address
        "#,
    )
    .bind(id)
    .bind(&customer.fname)
    .bind(&customer.lname)
    .bind(&customer.phone)
    .bind(&customer.address)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

/// Fetch a customer by id.
pub async fn get_customer(conn: &mut PgConnection, id: i32) -> Result<Option<CustomerRow>, DbError> {
    let row = sqlx::query_as::<_, CustomerRow>(
        "SELECT id, fname, lname, phone, address FROM customer WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

/// All customers with exactly this last name, by id.
pub async fn find_by_last_name(
    conn: &mut PgConnection,
    lname: &str,
) -> Result<Vec<CustomerRow>, DbError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
        r#"
        SELECT id, fname, lname, phone, address
        FROM customer
        WHERE lname = $1
        ORDER BY id
        "#,
    )
    .bind(lname)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}
