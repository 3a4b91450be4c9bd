#![forbid(unsafe_code)]

//! Compact labels for property values shown in table cells.

/// Label for an array value: `"[]"` when empty, otherwise the item type
/// followed by the length, e.g. `string[1]`.
#[must_use]
pub fn array_value_label(items_type_name: &str, len: usize) -> String {
    if len == 0 {
        return "[]".to_owned();
    }
    format!("{items_type_name}[{len}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_array() {
        assert_eq!(array_value_label("string", 0), "[]");
    }

    #[test]
    fn typed_length() {
        assert_eq!(array_value_label("string", 1), "string[1]");
        assert_eq!(array_value_label("Point3d", 12), "Point3d[12]");
    }
}
