use serde_json::Value;

use crate::shared::field_resolver::RawRow;

/// Keys under which list endpoints nest their rows
const ROW_KEYS: &[&str] = &["rows", "recordset", "items"];

/// Envelope nesting accepted before giving up
const MAX_ENVELOPE_DEPTH: usize = 3;

/// Response shape, decided once at the data-source boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawPayload {
    /// A list of rows (a time series, a ranking, ...)
    Series(Vec<RawRow>),
    /// One pre-aggregated row returned by a backend procedure
    Aggregated(RawRow),
    #[default]
    Empty,
}

impl RawPayload {
    /// Accepts `{success, data:{rows}}`, `{data:[...]}`, `{rows:[...]}`, a
    /// bare array or a bare object. Anything else is `Empty`.
    pub fn from_response(value: Value) -> Self {
        let mut current = value;
        for _ in 0..MAX_ENVELOPE_DEPTH {
            match current {
                Value::Array(items) => return Self::from_array(items),
                Value::Object(mut obj) => {
                    if obj.get("success").and_then(Value::as_bool) == Some(false) {
                        return RawPayload::Empty;
                    }
                    if let Some(data) = obj.remove("data") {
                        current = data;
                        continue;
                    }
                    if let Some(key) = ROW_KEYS.iter().find(|k| obj.get(**k).map_or(false, Value::is_array)) {
                        current = obj.remove(*key).unwrap_or(Value::Null);
                        continue;
                    }
                    obj.remove("success");
                    obj.remove("message");
                    if obj.is_empty() {
                        return RawPayload::Empty;
                    }
                    return RawPayload::Aggregated(obj);
                }
                _ => return RawPayload::Empty,
            }
        }
        RawPayload::Empty
    }

    fn from_array(items: Vec<Value>) -> Self {
        let rows: Vec<RawRow> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(obj) => Some(obj),
                _ => None,
            })
            .collect();
        if rows.is_empty() {
            RawPayload::Empty
        } else {
            RawPayload::Series(rows)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawPayload::Empty)
    }

    /// Rows regardless of shape; an aggregated row becomes a one-row list
    pub fn rows(&self) -> Vec<&RawRow> {
        match self {
            RawPayload::Series(rows) => rows.iter().collect(),
            RawPayload::Aggregated(row) => vec![row],
            RawPayload::Empty => Vec::new(),
        }
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        Self::from_response(value)
    }
}
