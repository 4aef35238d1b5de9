//! In-memory users, products, and orders.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A user as exposed on the public API (role stripped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub price: u64,
    pub stock: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub user_id: String,
    pub product_id: u32,
    pub product_name: String,
    pub quantity: u32,
    pub price_per_unit: u64,
    pub total_price: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Product list filters; `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: bool,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        let price = product.price as f64;
        self.category.as_deref().map_or(true, |c| product.category == c)
            && self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
            && (!self.in_stock || product.stock > 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: String,
    pub product_id: u32,
    pub quantity: u32,
}

/// Why an order was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("User not found")]
    UserNotFound { user_id: String },
    #[error("Product not found")]
    ProductNotFound { product_id: u32 },
    #[error("Insufficient stock")]
    InsufficientStock { available: u32, requested: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_users: usize,
    pub total_products: usize,
    pub total_orders: usize,
    pub total_revenue: u64,
    pub low_stock_products: usize,
}

#[derive(Debug, Clone)]
struct StoreData {
    users: IndexMap<String, User>,
    products: Vec<Product>,
    orders: Vec<Order>,
    next_order_id: u64,
}

/// Shared handle to the in-memory data set.
///
/// Cloning is cheap and every clone sees the same data. Each operation holds
/// the lock for its whole read-modify-write.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<RwLock<StoreData>>,
}

const LOW_STOCK_THRESHOLD: u32 = 10;

impl Store {
    pub fn new(users: Vec<User>, products: Vec<Product>) -> Self {
        let users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Self {
            inner: Arc::new(RwLock::new(StoreData {
                users,
                products,
                orders: Vec::new(),
                next_order_id: 1,
            })),
        }
    }

    /// The demo data set: three users and six products.
    pub fn seeded() -> Self {
        let user = |id: &str, name: &str, email: &str, role| User {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        };
        let product = |id, name: &str, category: &str, price, stock| Product {
            id,
            name: name.into(),
            category: category.into(),
            price,
            stock,
        };
        Self::new(
            vec![
                user("1", "Alice Johnson", "alice@example.com", Role::User),
                user("2", "Bob Smith", "bob@example.com", Role::User),
                user("3", "Admin User", "admin@example.com", Role::Admin),
            ],
            vec![
                product(1, "Laptop Pro", "electronics", 1299, 15),
                product(2, "Wireless Mouse", "electronics", 29, 50),
                product(3, "Mechanical Keyboard", "electronics", 89, 30),
                product(4, "Office Desk", "furniture", 299, 10),
                product(5, "Ergonomic Chair", "furniture", 399, 8),
                product(6, "USB-C Cable", "accessories", 15, 100),
            ],
        )
    }

    pub async fn user(&self, id: &str) -> Option<PublicUser> {
        self.inner.read().await.users.get(id).map(PublicUser::from)
    }

    pub async fn products(&self, filter: &ProductFilter) -> Vec<Product> {
        self.inner
            .read()
            .await
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub async fn product(&self, id: u32) -> Option<Product> {
        self.inner.read().await.products.iter().find(|p| p.id == id).cloned()
    }

    pub async fn create_order(&self, request: NewOrder) -> Result<Order, OrderError> {
        let mut data = self.inner.write().await;

        if !data.users.contains_key(&request.user_id) {
            return Err(OrderError::UserNotFound {
                user_id: request.user_id,
            });
        }

        let order_id = data.next_order_id;
        let product = data
            .products
            .iter_mut()
            .find(|p| p.id == request.product_id)
            .ok_or(OrderError::ProductNotFound {
                product_id: request.product_id,
            })?;

        if product.stock < request.quantity {
            return Err(OrderError::InsufficientStock {
                available: product.stock,
                requested: request.quantity,
            });
        }

        product.stock -= request.quantity;
        let order = Order {
            id: order_id,
            user_id: request.user_id,
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: request.quantity,
            price_per_unit: product.price,
            total_price: product.price * u64::from(request.quantity),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        data.next_order_id += 1;
        data.orders.push(order.clone());
        Ok(order)
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.inner.read().await.orders.clone()
    }

    /// Remove a user; `false` when no such user exists.
    pub async fn delete_user(&self, id: &str) -> bool {
        self.inner.write().await.users.shift_remove(id).is_some()
    }

    pub async fn stats(&self) -> StoreStats {
        let data = self.inner.read().await;
        StoreStats {
            total_users: data.users.len(),
            total_products: data.products.len(),
            total_orders: data.orders.len(),
            total_revenue: data.orders.iter().map(|o| o.total_price).sum(),
            low_stock_products: data
                .products
                .iter()
                .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
                .count(),
        }
    }

    /// Clear orders and restart order numbering. Users and stock are kept.
    pub async fn reset(&self) {
        let mut data = self.inner.write().await;
        data.orders.clear();
        data.next_order_id = 1;
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::seeded()
    }
}
