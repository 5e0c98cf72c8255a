//! Product Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Product, ProductCreate};
use crate::utils::now_millis;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find products, optionally filtered by exact category and/or a
    /// case-insensitive search over name, category and description.
    pub async fn find_filtered(
        &self,
        category: Option<String>,
        search: Option<String>,
    ) -> RepoResult<Vec<Product>> {
        let mut sql = String::from("SELECT * FROM product");
        let mut clauses: Vec<&str> = Vec::new();

        if category.is_some() {
            clauses.push("category = $category");
        }
        if search.is_some() {
            clauses.push(
                "(string::contains(string::lowercase(name), $search) \
                 OR string::contains(string::lowercase(category), $search) \
                 OR string::contains(string::lowercase(description), $search))",
            );
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY name");

        let mut query = self.base.db().query(sql);
        if let Some(category) = category {
            query = query.bind(("category", category));
        }
        if let Some(search) = search {
            query = query.bind(("search", search.to_lowercase()));
        }

        let products: Vec<Product> = query.await?.take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(product)
    }

    /// Create a product (seeding/admin)
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let price = data
            .price
            .ok_or_else(|| RepoError::Validation("price is required".to_string()))?;
        if price < 0.0 {
            return Err(RepoError::Validation(
                "price must not be negative".to_string(),
            ));
        }

        let product = Product {
            id: None,
            name: data.name,
            category: data.category,
            price,
            weight: data.weight,
            image: data.image,
            rating: data.rating.unwrap_or(0.0).clamp(0.0, 5.0),
            reviews: data.reviews.unwrap_or(0),
            description: data.description,
            stock: data.stock.unwrap_or(0),
            in_stock: data.in_stock.unwrap_or(true),
            created_at: now_millis(),
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }
}
