use serde_json::Value as JsonValue;

/// Accepts a JSON integer or a numeric string (the web client sends ids as
/// either).
pub fn coerce_bigint(v: &JsonValue) -> Result<i64, String> {
    if let Some(n) = v.as_i64() {
        Ok(n)
    } else if let Some(s) = v.as_str() {
        s.trim()
            .parse::<i64>()
            .map_err(|_| format!("expected int, got {:?}", s))
    } else {
        Err(format!("expected int, got {}", v))
    }
}

/// Like [`coerce_bigint`], and checks the value fits an `INTEGER` column.
pub fn coerce_int(v: &JsonValue) -> Result<i32, String> {
    let n = coerce_bigint(v)?;
    i32::try_from(n).map_err(|_| format!("out of range for int: {}", n))
}
