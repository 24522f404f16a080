use crate::error::AppError;
use crate::filter::ProductFilter;
use crate::model::{Product, ProductInput};
use crate::store::ProductStore;

pub struct ProductService;

impl ProductService {
    /// All products, or those matching the query-parameter filter when any parameter is given.
    pub async fn list(
        store: &dyn ProductStore,
        params: &[(String, String)],
    ) -> Result<Vec<Product>, AppError> {
        if params.is_empty() {
            return store.find_all().await;
        }
        let filter = ProductFilter::from_params(params)?;
        store.find_all_matching(&filter).await
    }

    /// Sum of `value` over the same selection as `list`.
    pub async fn value_sum(
        store: &dyn ProductStore,
        params: &[(String, String)],
    ) -> Result<f64, AppError> {
        let products = Self::list(store, params).await?;
        Ok(sum_values(&products))
    }

    pub async fn create(store: &dyn ProductStore, input: ProductInput) -> Result<Product, AppError> {
        let product = store.create(input).await?;
        tracing::info!(product_id = %product.product_id, "product created");
        Ok(product)
    }

    pub async fn read(store: &dyn ProductStore, id: &str) -> Result<Product, AppError> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product '{}'", id)))
    }

    /// Replace every field of an existing product except its id.
    pub async fn update(
        store: &dyn ProductStore,
        id: &str,
        input: ProductInput,
    ) -> Result<Product, AppError> {
        let existing = Self::read(store, id).await?;
        let merged = merge_update(input, existing);
        let saved = store
            .save(&merged)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product '{}'", id)))?;
        tracing::info!(product_id = %saved.product_id, "product updated");
        Ok(saved)
    }

    pub async fn delete(store: &dyn ProductStore, id: &str) -> Result<(), AppError> {
        let existing = Self::read(store, id).await?;
        if !store.delete(&existing).await? {
            return Err(AppError::NotFound(format!("product '{}'", id)));
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

/// Missing values count as 0.
pub fn sum_values(products: &[Product]) -> f64 {
    products.iter().map(|p| p.value.unwrap_or(0.0)).sum()
}

/// Full replace of the non-id fields; the existing id always wins.
pub fn merge_update(payload: ProductInput, existing: Product) -> Product {
    payload.into_product(existing.product_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductStatus;
    use crate::store::MemoryProductStore;

    fn product(id: &str, status: ProductStatus, fc: &str, quantity: i32, value: f64) -> Product {
        Product {
            product_id: id.into(),
            status: Some(status),
            fulfillment_center: Some(fc.into()),
            quantity: Some(quantity),
            value: Some(value),
        }
    }

    fn seeded() -> MemoryProductStore {
        MemoryProductStore::with_products(
            "p",
            [
                product("p1", ProductStatus::Sellable, "fc1", 421, 1337.0),
                product("p2", ProductStatus::Inbound, "fc2", 422, 1338.0),
                product("p3", ProductStatus::Unfulfillable, "fc3", 422, 1339.0),
            ],
        )
    }

    #[test]
    fn sum_treats_missing_values_as_zero() {
        let mut products = vec![
            product("p1", ProductStatus::Sellable, "fc1", 421, 1337.0),
            product("p2", ProductStatus::Inbound, "fc2", 422, 1338.0),
            product("p3", ProductStatus::Unfulfillable, "fc3", 422, 1339.0),
        ];
        assert_eq!(sum_values(&products), 4014.0);
        products[1].value = None;
        assert_eq!(sum_values(&products), 2676.0);
        assert_eq!(sum_values(&[]), 0.0);
    }

    #[test]
    fn merge_keeps_id_and_replaces_everything_else() {
        let existing = product("p1", ProductStatus::Sellable, "fc1", 421, 1337.0);
        let payload = ProductInput {
            status: Some(ProductStatus::Inbound),
            fulfillment_center: None,
            quantity: Some(422),
            value: None,
        };
        let merged = merge_update(payload, existing);
        assert_eq!(
            merged,
            Product {
                product_id: "p1".into(),
                status: Some(ProductStatus::Inbound),
                fulfillment_center: None,
                quantity: Some(422),
                value: None,
            }
        );
    }

    #[tokio::test]
    async fn list_without_params_returns_everything() {
        let store = seeded();
        let all = ProductService::list(&store, &[]).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(ProductService::value_sum(&store, &[]).await.unwrap(), 4014.0);
    }

    #[tokio::test]
    async fn list_with_bad_filter_is_a_client_error() {
        let store = seeded();
        let params = vec![("quantity".to_string(), "many".to_string())];
        let err = ProductService::list(&store, &params).await.unwrap_err();
        assert!(matches!(err, AppError::Filter(_)));
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_are_not_found() {
        let store = seeded();
        let err = ProductService::update(&store, "p9", ProductInput::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = ProductService::delete(&store, "p9").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_product() {
        let store = seeded();
        ProductService::delete(&store, "p2").await.unwrap();
        assert!(matches!(ProductService::read(&store, "p2").await, Err(AppError::NotFound(_))));
    }
}
