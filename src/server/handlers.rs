//! The four shipment handlers plus the static index lookup.
//!
//! Handlers return the JSON envelope as a string and nothing else; the
//! dispatch layer picks the HTTP status per route, independent of
//! whether the envelope carries an `error` field. That split is part of
//! the wire contract (POST answers 201 even when the store failed).

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};

use crate::store::{Row, Store};
use crate::url::FormParams;

const DEFAULT_STATUS: &str = "pending";

// Result columns and parameters cross the store boundary as text, libpq
// style; the casts rebuild the real column types server-side.
pub(crate) const LIST_SQL: &str = "SELECT s.id::text, s.cargo_description, s.origin, s.destination, \
     s.weight_kg::text, s.volume_m3::text, s.status, s.created_at::text, s.updated_at::text, \
     COALESCE(c.name, '') AS client_name, COALESCE(v.vehicle_type, '') AS transport_type, \
     COALESCE(v.license_plate, '') AS vehicle_plate, COALESCE(d.full_name, '') AS driver_name \
     FROM shipments s \
     LEFT JOIN clients c ON s.client_id = c.id \
     LEFT JOIN vehicles v ON s.vehicle_id = v.id \
     LEFT JOIN drivers d ON s.driver_id = d.id \
     ORDER BY s.id";

pub(crate) const INSERT_EXTENDED_SQL: &str = "INSERT INTO shipments (cargo_description, origin, destination, weight_kg, volume_m3, \
     status, client_id, vehicle_id, driver_id) \
     VALUES ($1, $2, $3, $4::text::numeric, $5::text::numeric, $6, $7::text::int, \
     $8::text::int, $9::text::int) RETURNING id::text";

pub(crate) const INSERT_LEGACY_SQL: &str = "INSERT INTO shipments (cargo_description, origin, destination, weight_kg, volume_m3, \
     status) VALUES ($1, $2, $3, $4::text::numeric, $5::text::numeric, $6) RETURNING id::text";

pub(crate) const UPDATE_EXTENDED_SQL: &str = "UPDATE shipments SET cargo_description=$1, origin=$2, destination=$3, \
     weight_kg=$4::text::numeric, volume_m3=$5::text::numeric, status=$6, \
     client_id=$7::text::int, vehicle_id=$8::text::int, driver_id=$9::text::int \
     WHERE id=$10::text::int RETURNING id::text";

pub(crate) const UPDATE_LEGACY_SQL: &str = "UPDATE shipments SET cargo_description=$1, origin=$2, destination=$3, \
     weight_kg=$4::text::numeric, volume_m3=$5::text::numeric, status=$6 \
     WHERE id=$7::text::int RETURNING id::text";

pub(crate) const DELETE_SQL: &str =
    "DELETE FROM shipments WHERE id=$1::text::int RETURNING id::text";

/// The base cargo fields shared by both input schemas. Field values
/// borrow from the decoded form parameters.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ShipmentFields<'a> {
    pub cargo_description: &'a str,
    pub origin: &'a str,
    pub destination: &'a str,
    pub weight_kg: &'a str,
    pub volume_m3: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Which creation/update schema a request uses, decided once during
/// validation: `Extended` iff `vehicle_id` is present and non-empty.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ShipmentInput<'a> {
    Legacy(ShipmentFields<'a>),
    Extended {
        fields: ShipmentFields<'a>,
        client_id: Option<&'a str>,
        vehicle_id: &'a str,
        driver_id: Option<&'a str>,
    },
}

/// Checks the required fields and picks the input schema.
///
/// Required: cargo_description, origin, destination, weight_kg, and at
/// least one of transport_type / vehicle_id present (presence is
/// enough; an empty vehicle_id still validates but selects the legacy
/// schema). Updates additionally require an explicit status.
pub(crate) fn validate<'a>(
    params: &'a FormParams,
    require_status: bool,
) -> Option<ShipmentInput<'a>> {
    let cargo_description = params.get("cargo_description")?.as_str();
    let origin = params.get("origin")?.as_str();
    let destination = params.get("destination")?.as_str();
    let weight_kg = params.get("weight_kg")?.as_str();

    if !params.contains_key("transport_type") && !params.contains_key("vehicle_id") {
        return None;
    }

    let status = params.get("status").map(String::as_str);
    if require_status && status.is_none() {
        return None;
    }

    let fields = ShipmentFields {
        cargo_description,
        origin,
        destination,
        weight_kg,
        volume_m3: non_empty(params, "volume_m3"),
        status,
    };

    match non_empty(params, "vehicle_id") {
        Some(vehicle_id) => Some(ShipmentInput::Extended {
            fields,
            client_id: non_empty(params, "client_id"),
            vehicle_id,
            driver_id: non_empty(params, "driver_id"),
        }),
        None => Some(ShipmentInput::Legacy(fields)),
    }
}

fn non_empty<'a>(params: &'a FormParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Serialize)]
struct ShipmentList<'a> {
    shipments: Vec<ShipmentRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct ShipmentRecord<'a> {
    id: Value,
    cargo_description: &'a str,
    origin: &'a str,
    destination: &'a str,
    weight_kg: Value,
    volume_m3: Value,
    status: &'a str,
    created_at: &'a str,
    updated_at: &'a str,
    client_name: &'a str,
    transport_type: &'a str,
    vehicle_plate: &'a str,
    driver_name: &'a str,
}

impl<'a> ShipmentRecord<'a> {
    fn from_row(row: &'a Row) -> Self {
        let text = |i: usize| row.get(i).and_then(|cell| cell.as_deref()).unwrap_or("");

        Self {
            id: numeric(text(0)),
            cargo_description: text(1),
            origin: text(2),
            destination: text(3),
            weight_kg: numeric(text(4)),
            volume_m3: match row.get(5).and_then(|cell| cell.as_deref()) {
                Some(value) => numeric(value),
                None => Value::Null,
            },
            status: text(6),
            created_at: text(7),
            updated_at: text(8),
            client_name: text(9),
            transport_type: text(10),
            vehicle_plate: text(11),
            driver_name: text(12),
        }
    }
}

/// A stored numeric cell, re-emitted unquoted. Unparsable text (which a
/// numeric column cannot actually produce) degrades to null rather than
/// corrupting the payload.
fn numeric(text: &str) -> Value {
    text.parse::<serde_json::Number>()
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub(crate) fn error_envelope(message: &str) -> String {
    json!({ "error": message }).to_string()
}

fn returned_id(rows: &[Row]) -> Option<&str> {
    rows.first()?.first()?.as_deref()
}

pub(crate) fn list_shipments(store: &dyn Store) -> String {
    let rows = match store.query(LIST_SQL, &[]) {
        Ok(rows) => rows,
        Err(e) => return error_envelope(&e.to_string()),
    };

    let list = ShipmentList {
        shipments: rows.iter().map(ShipmentRecord::from_row).collect(),
    };

    match serde_json::to_string(&list) {
        Ok(json) => json,
        Err(e) => error_envelope(&e.to_string()),
    }
}

pub(crate) fn create_shipment(store: &dyn Store, input: &ShipmentInput<'_>) -> String {
    let outcome = match input {
        ShipmentInput::Extended {
            fields,
            client_id,
            vehicle_id,
            driver_id,
        } => store.query(
            INSERT_EXTENDED_SQL,
            &extended_params(fields, *client_id, vehicle_id, *driver_id),
        ),
        ShipmentInput::Legacy(fields) => store.query(INSERT_LEGACY_SQL, &legacy_params(fields)),
    };

    match outcome {
        Ok(rows) => match returned_id(&rows) {
            Some(id) => json!({ "success": true, "id": numeric(id) }).to_string(),
            None => error_envelope("insert returned no id"),
        },
        Err(e) => error_envelope(&e.to_string()),
    }
}

pub(crate) fn update_shipment(store: &dyn Store, id: i64, input: &ShipmentInput<'_>) -> String {
    let id_text = id.to_string();

    let outcome = match input {
        ShipmentInput::Extended {
            fields,
            client_id,
            vehicle_id,
            driver_id,
        } => {
            let mut params = extended_params(fields, *client_id, vehicle_id, *driver_id);
            params.push(Some(id_text.as_str()));
            store.query(UPDATE_EXTENDED_SQL, &params)
        }
        ShipmentInput::Legacy(fields) => {
            let mut params = legacy_params(fields);
            params.push(Some(id_text.as_str()));
            store.query(UPDATE_LEGACY_SQL, &params)
        }
    };

    match outcome {
        Ok(rows) if rows.is_empty() => error_envelope("Shipment not found"),
        Ok(_) => json!({ "success": true, "id": id }).to_string(),
        Err(e) => error_envelope(&e.to_string()),
    }
}

pub(crate) fn delete_shipment(store: &dyn Store, id: i64) -> String {
    let id_text = id.to_string();

    match store.query(DELETE_SQL, &[Some(id_text.as_str())]) {
        Ok(rows) if rows.is_empty() => error_envelope("Shipment not found"),
        Ok(_) => json!({ "success": true }).to_string(),
        Err(e) => error_envelope(&e.to_string()),
    }
}

/// Reads the first existing index candidate.
pub(crate) fn serve_index(candidates: &[PathBuf]) -> Option<Vec<u8>> {
    candidates.iter().find_map(|path| fs::read(path).ok())
}

fn extended_params<'a>(
    fields: &ShipmentFields<'a>,
    client_id: Option<&'a str>,
    vehicle_id: &'a str,
    driver_id: Option<&'a str>,
) -> Vec<Option<&'a str>> {
    vec![
        Some(fields.cargo_description),
        Some(fields.origin),
        Some(fields.destination),
        Some(fields.weight_kg),
        fields.volume_m3,
        Some(fields.status.unwrap_or(DEFAULT_STATUS)),
        client_id,
        Some(vehicle_id),
        driver_id,
    ]
}

fn legacy_params<'a>(fields: &ShipmentFields<'a>) -> Vec<Option<&'a str>> {
    vec![
        Some(fields.cargo_description),
        Some(fields.origin),
        Some(fields.destination),
        Some(fields.weight_kg),
        fields.volume_m3,
        Some(fields.status.unwrap_or(DEFAULT_STATUS)),
    ]
}
