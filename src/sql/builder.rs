//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the products table.

use crate::case::to_snake_case;
use crate::filter::{FieldValue, ProductFilter, PRODUCT_FIELDS};
use crate::model::{Product, ProductInput};
use crate::sql::params::PgBindValue;

pub const PRODUCTS_TABLE: &str = "products";
pub const STATUS_TYPE: &str = "product_status";
pub const ID_SEQUENCE: &str = "product_id_seq";

/// Quote identifier for PostgreSQL (safe: only from settings).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified name.
pub fn qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(name))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// SELECT list in field-table order; the enum column comes back as text.
fn select_column_list() -> String {
    PRODUCT_FIELDS
        .iter()
        .map(|f| {
            let q = quoted(&to_snake_case(f.name));
            if f.name == "status" {
                format!("{}::text AS {}", q, q)
            } else {
                q
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn status_cast(schema: &str, param_num: u32) -> String {
    format!("${}::{}", param_num, qualified(schema, STATUS_TYPE))
}

/// SELECT with optional filter, ORDER BY product_id.
/// Text fields use `strpos` (case-sensitive containment, no LIKE wildcards); other fields use equality. Conditions are AND-combined.
pub fn select_list(schema: &str, filter: Option<&ProductFilter>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified(schema, PRODUCTS_TABLE);

    let mut where_parts = Vec::new();
    if let Some(filter) = filter {
        for (field, value) in filter.example.conditions() {
            let col = quoted(&to_snake_case(field.name));
            let part = match value {
                FieldValue::Text(s) => {
                    let n = q.push_param(PgBindValue::Text(Some(s)));
                    format!("strpos({}, ${}) > 0", col, n)
                }
                FieldValue::Status(s) => {
                    let n = q.push_param(FieldValue::Status(s).into());
                    format!("{} = {}", col, status_cast(schema, n))
                }
                other => {
                    let n = q.push_param(other.into());
                    format!("{} = ${}", col, n)
                }
            };
            where_parts.push(part);
        }
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(),
        table,
        where_clause,
        quoted("product_id")
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(schema: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Text(Some(id.to_string())));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(),
        qualified(schema, PRODUCTS_TABLE),
        quoted("product_id"),
        n
    );
    q
}

/// INSERT with id `<prefix> || nextval(sequence)`; returns the stored row.
pub fn insert(schema: &str, id_prefix: &str, input: &ProductInput) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sequence = qualified(schema, ID_SEQUENCE).replace('\'', "''");
    let prefix = q.push_param(PgBindValue::Text(Some(id_prefix.to_string())));
    let status = q.push_param(PgBindValue::Text(input.status.map(|s| s.as_str().to_string())));
    let fc = q.push_param(PgBindValue::Text(input.fulfillment_center.clone()));
    let quantity = q.push_param(PgBindValue::Int(input.quantity));
    let value = q.push_param(PgBindValue::Float(input.value));
    q.sql = format!(
        "INSERT INTO {} ({}, {}, {}, {}, {}) VALUES (${} || nextval('{}'), {}, ${}, ${}, ${}) RETURNING {}",
        qualified(schema, PRODUCTS_TABLE),
        quoted("product_id"),
        quoted("status"),
        quoted("fulfillment_center"),
        quoted("quantity"),
        quoted("value"),
        prefix,
        sequence,
        status_cast(schema, status),
        fc,
        quantity,
        value,
        select_column_list()
    );
    q
}

/// UPDATE every non-id column from `product`; the id only selects the row.
pub fn update(schema: &str, product: &Product) -> QueryBuf {
    let mut q = QueryBuf::new();
    let status = q.push_param(PgBindValue::Text(product.status.map(|s| s.as_str().to_string())));
    let fc = q.push_param(PgBindValue::Text(product.fulfillment_center.clone()));
    let quantity = q.push_param(PgBindValue::Int(product.quantity));
    let value = q.push_param(PgBindValue::Float(product.value));
    let id = q.push_param(PgBindValue::Text(Some(product.product_id.clone())));
    q.sql = format!(
        "UPDATE {} SET {} = {}, {} = ${}, {} = ${}, {} = ${} WHERE {} = ${} RETURNING {}",
        qualified(schema, PRODUCTS_TABLE),
        quoted("status"),
        status_cast(schema, status),
        quoted("fulfillment_center"),
        fc,
        quoted("quantity"),
        quantity,
        quoted("value"),
        value,
        quoted("product_id"),
        id,
        select_column_list()
    );
    q
}

/// DELETE by id.
pub fn delete(schema: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Text(Some(id.to_string())));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        qualified(schema, PRODUCTS_TABLE),
        quoted("product_id"),
        n
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductStatus;

    const COLS: &str = r#""product_id", "status"::text AS "status", "fulfillment_center", "quantity", "value""#;

    #[test]
    fn unfiltered_list() {
        let q = select_list("public", None);
        assert_eq!(
            q.sql,
            format!(r#"SELECT {} FROM "public"."products" ORDER BY "product_id""#, COLS)
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn filtered_list_uses_strpos_for_text_and_equality_otherwise() {
        let params: Vec<(String, String)> = [
            ("fulfillmentCenter", "fc1"),
            ("status", "Sellable"),
            ("quantity", "3"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let filter = ProductFilter::from_params(&params).unwrap();
        let q = select_list("inv", Some(&filter));
        assert_eq!(
            q.sql,
            format!(
                r#"SELECT {} FROM "inv"."products" WHERE "status" = $1::"inv"."product_status" AND strpos("fulfillment_center", $2) > 0 AND "quantity" = $3 ORDER BY "product_id""#,
                COLS
            )
        );
        assert_eq!(
            q.params,
            vec![
                PgBindValue::Text(Some("Sellable".into())),
                PgBindValue::Text(Some("fc1".into())),
                PgBindValue::Int(Some(3)),
            ]
        );
    }

    #[test]
    fn id_filter_is_containment_on_product_id() {
        let mut filter = ProductFilter::default();
        filter.example.product_id = Some("p1".into());
        let q = select_list("public", Some(&filter));
        assert!(q.sql.contains(r#"WHERE strpos("product_id", $1) > 0 ORDER BY"#));
        assert_eq!(q.params, vec![PgBindValue::Text(Some("p1".into()))]);
    }

    #[test]
    fn insert_generates_prefixed_id() {
        let input = ProductInput {
            status: Some(ProductStatus::Inbound),
            fulfillment_center: None,
            quantity: Some(5),
            value: Some(2.5),
        };
        let q = insert("public", "p", &input);
        assert!(q.sql.starts_with(
            r#"INSERT INTO "public"."products" ("product_id", "status", "fulfillment_center", "quantity", "value") VALUES ($1 || nextval('"public"."product_id_seq"'), $2::"public"."product_status", $3, $4, $5) RETURNING "#
        ));
        assert_eq!(
            q.params,
            vec![
                PgBindValue::Text(Some("p".into())),
                PgBindValue::Text(Some("Inbound".into())),
                PgBindValue::Text(None),
                PgBindValue::Int(Some(5)),
                PgBindValue::Float(Some(2.5)),
            ]
        );
    }

    #[test]
    fn update_sets_every_column_but_the_id() {
        let product = Product {
            product_id: "p4".into(),
            status: None,
            fulfillment_center: Some("fc9".into()),
            quantity: None,
            value: None,
        };
        let q = update("public", &product);
        assert!(q.sql.starts_with(
            r#"UPDATE "public"."products" SET "status" = $1::"public"."product_status", "fulfillment_center" = $2, "quantity" = $3, "value" = $4 WHERE "product_id" = $5 RETURNING "#
        ));
        assert_eq!(q.params[4], PgBindValue::Text(Some("p4".into())));
        assert_eq!(q.params[0], PgBindValue::Text(None));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted(r#"we"ird"#), r#""we""ird""#);
        let q = delete("public", "p1");
        assert_eq!(q.sql, r#"DELETE FROM "public"."products" WHERE "product_id" = $1"#);
    }
}
