// src/db/carts.rs
use rusqlite::{params, Connection};

use crate::domain::document::find_document;
use crate::domain::{Cart, CartItem};
use crate::errors::ServerError;

pub fn load_cart(conn: &Connection, visitor: &str) -> Result<Cart, ServerError> {
    let mut stmt = conn
        .prepare(
            "select property_id, full_address, street, suburb, state, postcode, title_reference, document_id
             from cart_items
             where visitor = ?
             order by id",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![visitor], |row| {
            Ok((
                CartRow {
                    property_id: row.get(0)?,
                    address: row.get(1)?,
                    street: row.get(2)?,
                    suburb: row.get(3)?,
                    state: row.get(4)?,
                    postcode: row.get(5)?,
                    title_reference: row.get(6)?,
                },
                row.get::<_, String>(7)?,
            ))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut items = Vec::new();
    for r in rows {
        let (row, document_id) = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        match find_document(&document_id) {
            Some(document) => items.push(row.into_item(document)),
            None => log::warn!("dropping cart row with unknown document {document_id}"),
        }
    }

    Ok(Cart::from_items(items))
}

struct CartRow {
    property_id: String,
    address: String,
    street: String,
    suburb: String,
    state: String,
    postcode: String,
    title_reference: Option<String>,
}

impl CartRow {
    fn into_item(self, document: crate::domain::PropertyDocument) -> CartItem {
        CartItem {
            property_id: self.property_id,
            address: self.address,
            street: self.street,
            suburb: self.suburb,
            state: self.state,
            postcode: self.postcode,
            title_reference: self.title_reference,
            document,
        }
    }
}

/// Returns false if the property/document pair was already in the cart.
pub fn add_cart_item(
    conn: &Connection,
    visitor: &str,
    item: &CartItem,
    now: i64,
) -> Result<bool, ServerError> {
    let cart = load_cart(conn, visitor)?;
    if cart.contains(&item.property_id, item.document.id) {
        return Ok(false);
    }

    conn.execute(
        "insert into cart_items
         (visitor, property_id, full_address, street, suburb, state, postcode, title_reference, document_id, added_at)
         values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            visitor,
            item.property_id,
            item.address,
            item.street,
            item.suburb,
            item.state,
            item.postcode,
            item.title_reference,
            item.document.id,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert cart item failed: {e}")))?;

    Ok(true)
}

pub fn remove_cart_item(
    conn: &Connection,
    visitor: &str,
    property_id: &str,
    document_id: &str,
) -> Result<bool, ServerError> {
    let removed = conn
        .execute(
            "delete from cart_items where visitor = ? and property_id = ? and document_id = ?",
            params![visitor, property_id, document_id],
        )
        .map_err(|e| ServerError::DbError(format!("remove cart item failed: {e}")))?;
    Ok(removed > 0)
}

pub fn clear_cart(conn: &Connection, visitor: &str) -> Result<(), ServerError> {
    conn.execute("delete from cart_items where visitor = ?", params![visitor])
        .map_err(|e| ServerError::DbError(format!("clear cart failed: {e}")))?;
    Ok(())
}
