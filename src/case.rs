//! Case conversion from API names (camelCase) to column names (snake_case).

/// Convert a single identifier from camelCase to snake_case.
/// e.g. "productId" -> "product_id"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_field_names_to_columns() {
        assert_eq!(to_snake_case("fulfillmentCenter"), "fulfillment_center");
        assert_eq!(to_snake_case("productId"), "product_id");
        assert_eq!(to_snake_case("value"), "value");
    }
}
