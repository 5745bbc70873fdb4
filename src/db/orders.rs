// src/db/orders.rs
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::document::find_document;
use crate::domain::{ItemStatus, Order, OrderItem, OrderStatus};
use crate::errors::ServerError;

pub fn insert_order(conn: &mut Connection, visitor: &str, order: &Order) -> Result<(), ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute(
        "insert into orders (id, visitor, created_at, total_cents, status, provider_reference, failure_reason)
         values (?, ?, ?, ?, ?, ?, ?)",
        params![
            order.id,
            visitor,
            order.created_at.timestamp(),
            order.total_cents,
            order.status.as_str(),
            order.provider_reference,
            order.failure_reason,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert order failed: {e}")))?;

    for (position, item) in order.items.iter().enumerate() {
        tx.execute(
            "insert into order_items (order_id, position, property_id, full_address, title_reference, document_id, price_cents, status)
             values (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                order.id,
                position as i64,
                item.property_id,
                item.address,
                item.title_reference,
                item.document.id,
                item.price_cents,
                item.status.as_str(),
            ],
        )
        .map_err(|e| ServerError::DbError(format!("insert order item failed: {e}")))?;
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;
    Ok(())
}

pub fn order_exists(conn: &Connection, order_id: &str) -> Result<bool, ServerError> {
    conn.query_row(
        "select exists(select 1 from orders where id = ?)",
        params![order_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("order lookup failed: {e}")))
}

struct OrderRow {
    id: String,
    created_at: i64,
    total_cents: i64,
    status: String,
    provider_reference: Option<String>,
    failure_reason: Option<String>,
}

const ORDER_COLUMNS: &str =
    "id, created_at, total_cents, status, provider_reference, failure_reason";

fn order_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OrderRow> {
    Ok(OrderRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        total_cents: row.get(2)?,
        status: row.get(3)?,
        provider_reference: row.get(4)?,
        failure_reason: row.get(5)?,
    })
}

fn load_items(conn: &Connection, order_id: &str) -> Result<Vec<OrderItem>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select property_id, full_address, title_reference, document_id, price_cents, status
             from order_items where order_id = ? order by position",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![order_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut items = Vec::new();
    for r in rows {
        let (property_id, address, title_reference, document_id, price_cents, status) =
            r.map_err(|e| ServerError::DbError(e.to_string()))?;

        let document = find_document(&document_id).ok_or_else(|| {
            ServerError::DbError(format!("order {order_id} references unknown document {document_id}"))
        })?;
        let status = ItemStatus::parse(&status)
            .ok_or_else(|| ServerError::DbError(format!("bad item status {status}")))?;

        items.push(OrderItem {
            property_id,
            address,
            title_reference,
            document,
            price_cents,
            status,
        });
    }
    Ok(items)
}

fn hydrate(conn: &Connection, row: OrderRow) -> Result<Order, ServerError> {
    let status = OrderStatus::parse(&row.status)
        .ok_or_else(|| ServerError::DbError(format!("bad order status {}", row.status)))?;
    let created_at = DateTime::from_timestamp(row.created_at, 0)
        .ok_or_else(|| ServerError::DbError(format!("bad timestamp {}", row.created_at)))?;
    let items = load_items(conn, &row.id)?;

    Ok(Order {
        id: row.id,
        created_at,
        items,
        total_cents: row.total_cents,
        status,
        provider_reference: row.provider_reference,
        failure_reason: row.failure_reason,
    })
}

pub fn load_order(conn: &Connection, order_id: &str) -> Result<Option<Order>, ServerError> {
    let row = conn
        .query_row(
            &format!("select {ORDER_COLUMNS} from orders where id = ?"),
            params![order_id],
            order_row,
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select order failed: {e}")))?;

    row.map(|r| hydrate(conn, r)).transpose()
}

/// Like [`load_order`] but only finds orders placed by `visitor`.
pub fn load_visitor_order(
    conn: &Connection,
    visitor: &str,
    order_id: &str,
) -> Result<Option<Order>, ServerError> {
    let row = conn
        .query_row(
            &format!("select {ORDER_COLUMNS} from orders where id = ? and visitor = ?"),
            params![order_id, visitor],
            order_row,
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select order failed: {e}")))?;

    row.map(|r| hydrate(conn, r)).transpose()
}

/// Orders placed by `visitor`, newest first.
pub fn list_orders(conn: &Connection, visitor: &str) -> Result<Vec<Order>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {ORDER_COLUMNS} from orders where visitor = ? order by created_at desc, rowid desc"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![visitor], order_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut order_rows = Vec::new();
    for r in rows {
        order_rows.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }

    order_rows.into_iter().map(|r| hydrate(conn, r)).collect()
}

/// Applies a status transition and writes the result back in one transaction.
/// Terminal orders are left untouched and reported as a conflict.
fn transition<F>(conn: &mut Connection, order_id: &str, apply: F) -> Result<Order, ServerError>
where
    F: FnOnce(&mut Order) -> Result<(), crate::domain::TransitionError>,
{
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let mut order = load_order(&tx, order_id)?.ok_or(ServerError::NotFound)?;
    apply(&mut order).map_err(|e| ServerError::Conflict(e.to_string()))?;

    tx.execute(
        "update orders set status = ?, failure_reason = ? where id = ?",
        params![order.status.as_str(), order.failure_reason, order.id],
    )
    .map_err(|e| ServerError::DbError(format!("update order failed: {e}")))?;

    for (position, item) in order.items.iter().enumerate() {
        tx.execute(
            "update order_items set status = ? where order_id = ? and position = ?",
            params![item.status.as_str(), order.id, position as i64],
        )
        .map_err(|e| ServerError::DbError(format!("update order item failed: {e}")))?;
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;
    Ok(order)
}

pub fn complete_order(conn: &mut Connection, order_id: &str) -> Result<Order, ServerError> {
    transition(conn, order_id, Order::complete)
}

pub fn fail_order(
    conn: &mut Connection,
    order_id: &str,
    reason: &str,
) -> Result<Order, ServerError> {
    transition(conn, order_id, |order| order.fail(reason))
}
