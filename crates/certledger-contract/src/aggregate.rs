//! Range aggregation - stream a cursor into one JSON array payload

use certledger_store::Cursor;

use crate::error::ContractResult;

/// Serialize every entry of `cursor` into `[{"Key":..,"Record":..},..]`.
///
/// Elements keep the cursor's order. Keys are JSON-escaped; stored values are
/// embedded verbatim and must already be well-formed JSON. An empty cursor
/// produces `[]`. The cursor is released on every return path, including a
/// scan error part-way through.
pub fn aggregate(cursor: Cursor<'_>) -> ContractResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.push(b'[');

    for (index, entry) in cursor.enumerate() {
        let entry = entry?;
        if index > 0 {
            buffer.push(b',');
        }
        buffer.extend_from_slice(b"{\"Key\":");
        serde_json::to_writer(&mut buffer, &entry.key)?;
        buffer.extend_from_slice(b",\"Record\":");
        buffer.extend_from_slice(&entry.value);
        buffer.push(b'}');
    }

    buffer.push(b']');
    Ok(buffer)
}
