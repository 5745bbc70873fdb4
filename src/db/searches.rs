// src/db/searches.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::AddressResult;
use crate::errors::ServerError;

const RESULT_COLUMNS: &str =
    "id, full_address, street, suburb, state, postcode, lot_plan, title_reference";

fn result_from_row(row: &Row<'_>) -> rusqlite::Result<AddressResult> {
    Ok(AddressResult {
        id: row.get(0)?,
        full_address: row.get(1)?,
        street: row.get(2)?,
        suburb: row.get(3)?,
        state: row.get(4)?,
        postcode: row.get(5)?,
        lot_plan: row.get(6)?,
        title_reference: row.get(7)?,
    })
}

/// Replaces the visitor's previous search results.
pub fn save_search_results(
    conn: &mut Connection,
    visitor: &str,
    results: &[AddressResult],
) -> Result<(), ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute("delete from search_results where visitor = ?", params![visitor])
        .map_err(|e| ServerError::DbError(format!("clear search results failed: {e}")))?;

    {
        let mut stmt = tx
            .prepare(
                "insert or replace into search_results
                 (visitor, position, id, full_address, street, suburb, state, postcode, lot_plan, title_reference)
                 values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .map_err(|e| ServerError::DbError(format!("prepare insert failed: {e}")))?;

        for (position, r) in results.iter().enumerate() {
            stmt.execute(params![
                visitor,
                position as i64,
                r.id,
                r.full_address,
                r.street,
                r.suburb,
                r.state,
                r.postcode,
                r.lot_plan,
                r.title_reference,
            ])
            .map_err(|e| ServerError::DbError(format!("insert search result failed: {e}")))?;
        }
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;
    Ok(())
}

pub fn load_search_results(
    conn: &Connection,
    visitor: &str,
) -> Result<Vec<AddressResult>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {RESULT_COLUMNS} from search_results where visitor = ? order by position"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![visitor], result_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut results = Vec::new();
    for r in rows {
        results.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(results)
}

pub fn find_search_result(
    conn: &Connection,
    visitor: &str,
    property_id: &str,
) -> Result<Option<AddressResult>, ServerError> {
    conn.query_row(
        &format!("select {RESULT_COLUMNS} from search_results where visitor = ? and id = ?"),
        params![visitor, property_id],
        result_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("search result lookup failed: {e}")))
}
