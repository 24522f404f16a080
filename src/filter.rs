//! Query-parameter filters: a product-shaped example record matched by containment.
//!
//! Each parameter names a product field (camelCase or snake_case). The field table
//! below maps names to a value kind and to accessors on `Product` and `ProductExample`,
//! so any combination of fields can be filtered without per-field query methods.

use crate::case::to_snake_case;
use crate::error::FilterError;
use crate::model::{Product, ProductStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Status,
    Integer,
    Float,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Status(ProductStatus),
    Integer(i32),
    Float(f64),
}

impl FieldKind {
    /// Coerce a raw query value. Integers must be plain base-10 `i32`; floats must be finite.
    pub fn parse(&self, field: &'static str, raw: &str) -> Result<FieldValue, FilterError> {
        match self {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Status => raw.parse::<ProductStatus>().map(FieldValue::Status).map_err(|_| {
                FilterError::InvalidStatus {
                    field,
                    value: raw.to_string(),
                    allowed: ProductStatus::ALL
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                }
            }),
            FieldKind::Integer => raw
                .parse::<i32>()
                .map(FieldValue::Integer)
                .map_err(|_| FilterError::InvalidInteger {
                    field,
                    value: raw.to_string(),
                }),
            FieldKind::Float => match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(FieldValue::Float(n)),
                _ => Err(FilterError::InvalidNumber {
                    field,
                    value: raw.to_string(),
                }),
            },
        }
    }
}

/// One filterable product field.
pub struct FieldSpec {
    /// API name (camelCase). The column name is its snake_case form.
    pub name: &'static str,
    pub kind: FieldKind,
    read: fn(&Product) -> Option<FieldValue>,
    from_example: fn(&ProductExample) -> Option<FieldValue>,
    assign: fn(&mut ProductExample, FieldValue),
}

impl FieldSpec {
    pub fn read(&self, product: &Product) -> Option<FieldValue> {
        (self.read)(product)
    }
}

pub static PRODUCT_FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        name: "productId",
        kind: FieldKind::Text,
        read: |p| Some(FieldValue::Text(p.product_id.clone())),
        from_example: |e| e.product_id.clone().map(FieldValue::Text),
        assign: |e, v| {
            if let FieldValue::Text(s) = v {
                e.product_id = Some(s);
            }
        },
    },
    FieldSpec {
        name: "status",
        kind: FieldKind::Status,
        read: |p| p.status.map(FieldValue::Status),
        from_example: |e| e.status.map(FieldValue::Status),
        assign: |e, v| {
            if let FieldValue::Status(s) = v {
                e.status = Some(s);
            }
        },
    },
    FieldSpec {
        name: "fulfillmentCenter",
        kind: FieldKind::Text,
        read: |p| p.fulfillment_center.clone().map(FieldValue::Text),
        from_example: |e| e.fulfillment_center.clone().map(FieldValue::Text),
        assign: |e, v| {
            if let FieldValue::Text(s) = v {
                e.fulfillment_center = Some(s);
            }
        },
    },
    FieldSpec {
        name: "quantity",
        kind: FieldKind::Integer,
        read: |p| p.quantity.map(FieldValue::Integer),
        from_example: |e| e.quantity.map(FieldValue::Integer),
        assign: |e, v| {
            if let FieldValue::Integer(n) = v {
                e.quantity = Some(n);
            }
        },
    },
    FieldSpec {
        name: "value",
        kind: FieldKind::Float,
        read: |p| p.value.map(FieldValue::Float),
        from_example: |e| e.value.map(FieldValue::Float),
        assign: |e, v| {
            if let FieldValue::Float(n) = v {
                e.value = Some(n);
            }
        },
    },
];

/// Look up a field by its API name or that name's exact snake_case column spelling.
pub fn field_by_name(name: &str) -> Option<&'static FieldSpec> {
    PRODUCT_FIELDS
        .iter()
        .find(|f| f.name == name || to_snake_case(f.name) == name)
}

/// Product-shaped template; `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductExample {
    pub product_id: Option<String>,
    pub status: Option<ProductStatus>,
    pub fulfillment_center: Option<String>,
    pub quantity: Option<i32>,
    pub value: Option<f64>,
}

impl ProductExample {
    /// Set fields in field-table order.
    pub fn conditions(&self) -> Vec<(&'static FieldSpec, FieldValue)> {
        PRODUCT_FIELDS
            .iter()
            .filter_map(|f| (f.from_example)(self).map(|v| (f, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions().is_empty()
    }
}

/// Example record matched with case-sensitive containment on text fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductFilter {
    pub example: ProductExample,
}

impl ProductFilter {
    /// Build a containment filter from query parameters in request order.
    /// Unknown names, repeated fields (under either spelling), and values that do not coerce are rejected.
    pub fn from_params(params: &[(String, String)]) -> Result<Self, FilterError> {
        let mut example = ProductExample::default();
        let mut seen: Vec<&'static str> = Vec::with_capacity(params.len());
        for (key, raw) in params {
            let field = field_by_name(key).ok_or_else(|| FilterError::UnknownField(key.clone()))?;
            if seen.contains(&field.name) {
                return Err(FilterError::DuplicateField(field.name));
            }
            seen.push(field.name);
            let value = field.kind.parse(field.name, raw)?;
            (field.assign)(&mut example, value);
        }
        Ok(ProductFilter { example })
    }

    pub fn is_empty(&self) -> bool {
        self.example.is_empty()
    }

    /// Every set field must match: text by case-sensitive containment, the rest by equality.
    /// A null product field never matches a set filter field.
    pub fn matches(&self, product: &Product) -> bool {
        self.example.conditions().iter().all(|(field, wanted)| {
            match (field.read(product), wanted) {
                (Some(FieldValue::Text(have)), FieldValue::Text(needle)) => have.contains(needle.as_str()),
                (Some(have), wanted) => have == *wanted,
                (None, _) => false,
            }
        })
    }
}
