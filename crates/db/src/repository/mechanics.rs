//! Mechanic repository functions.

use sqlx::PgConnection;

use super::{next_id, IdTable};
use crate::{
    DbError,
    models::{MechanicRow, NewMechanic},
};

/// Insert a mechanic under the next free id. Call inside a transaction.
pub async fn insert_mechanic(
    conn: &mut PgConnection,
    mechanic: &NewMechanic,
) -> Result<MechanicRow, DbError> {
    let id = next_id(conn, IdTable::Mechanic).await?;

    let row = sqlx::query_as::<_, MechanicRow>(
        r#"
        INSERT INTO mechanic (id, fname, lname, experience)
        VALUES ($1, $2, $3, $4)
        RETURNING id, fname, lname, experience
        "#,
    )
    .bind(id)
    .bind(&mechanic.fname)
    .bind(&mechanic.lname)
    .bind(mechanic.experience)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

pub async fn get_mechanic(conn: &mut PgConnection, id: i32) -> Result<Option<MechanicRow>, DbError> {
    let row = sqlx::query_as::<_, MechanicRow>(
        "SELECT id, fname, lname, experience FROM mechanic WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}
