//! # Domain Types
//!
//! Core domain types used throughout MobiCare.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ServiceRequest │   │   UserRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (push key)  │   │  id (push key)  │   │  keyed by       │       │
//! │  │  name, brand    │   │  service_id     │   │  identity id    │       │
//! │  │  price_paise    │   │  status         │   │  role           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Role        │   │  ServiceStatus  │   │   DeviceType    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Admin          │   │  Received       │   │  Mobile, Laptop │       │
//! │  │  User           │   │  InProgress     │   │  Cctv, Ups      │       │
//! │  └─────────────────┘   │  Ready          │   └─────────────────┘       │
//! │                        │  Delivered      │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Store-backed entities have:
//! - `id`: the store's generated child key - immutable, used for lookups
//! - Business ID where one exists (`service_id` like "SRV-…") - human-readable

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::SERVICE_ID_PREFIX;

// =============================================================================
// Role
// =============================================================================

/// Authorization level resolved from the `users/{identity_id}` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to the admin panel and ticket/product management.
    Admin,
    /// Regular shopper; sees only their own dashboard.
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mobiles,
    Laptops,
    Camera,
    Accessories,
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Store child key. Empty until the record is persisted.
    pub id: String,

    /// Display name shown in the catalog.
    pub name: String,

    /// Catalog category.
    pub category: Category,

    /// Brand name (e.g. "Apple", "Samsung").
    pub brand: String,

    /// Price in paise (smallest currency unit).
    pub price_paise: i64,

    /// Average rating, 0.0 to 5.0. Display-only, never used in money math.
    pub rating: f64,

    /// Units in stock.
    pub stock: i64,

    /// Catalog thumbnail tag (the storefront renders an emoji per category).
    pub image: String,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new catalog product with creation timestamps set to now.
    ///
    /// The `id` stays empty until the store assigns a child key.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        category: Category,
        brand: impl Into<String>,
        price: Money,
        rating: f64,
        stock: i64,
        image: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Product {
            id: String::new(),
            name: name.into(),
            category,
            brand: brand.into(),
            price_paise: price.paise(),
            rating,
            stock,
            image: image.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// Catalog filter: category, brand, price window, minimum rating, text search.
///
/// All criteria are optional and combine with AND. The view layer builds one
/// of these from the filter sidebar and search box.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub brand: Option<String>,
    pub min_price_paise: Option<i64>,
    pub max_price_paise: Option<i64>,
    pub min_rating: Option<f64>,
    /// Case-insensitive match against name or brand.
    pub search: Option<String>,
}

impl ProductFilter {
    /// Checks whether a product passes every set criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }

        if let Some(brand) = &self.brand {
            if !product.brand.eq_ignore_ascii_case(brand) {
                return false;
            }
        }

        if let Some(min) = self.min_price_paise {
            if product.price_paise < min {
                return false;
            }
        }

        if let Some(max) = self.max_price_paise {
            if product.price_paise > max {
                return false;
            }
        }

        if let Some(min_rating) = self.min_rating {
            if product.rating < min_rating {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let name_hit = product.name.to_lowercase().contains(&needle);
            let brand_hit = product.brand.to_lowercase().contains(&needle);
            if !name_hit && !brand_hit {
                return false;
            }
        }

        true
    }
}

// =============================================================================
// UserRecord
// =============================================================================

/// Side record persisted at `users/{identity_id}` in the hosted store.
///
/// Created once, at first successful authentication, and never mutated by
/// this system afterwards. Role changes are an administrative action
/// performed directly against the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,

    /// Authorization role. Defaults to `user` unless explicitly provisioned.
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Tag of the federated provider that created the record ("google").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Device Type & Brands
// =============================================================================

/// Device families the service desk repairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Laptop,
    Cctv,
    Ups,
}

impl DeviceType {
    /// Brands the service desk accepts for this device family.
    ///
    /// "Other" is always the last entry so the intake form can fall back
    /// to a free-text description of unlisted brands.
    pub fn brands(&self) -> &'static [&'static str] {
        match self {
            DeviceType::Mobile => &[
                "Apple", "Samsung", "OnePlus", "Xiaomi", "Google", "Vivo", "Oppo", "Realme",
                "Other",
            ],
            DeviceType::Laptop => &[
                "Apple", "Dell", "HP", "Lenovo", "ASUS", "Acer", "MSI", "Other",
            ],
            DeviceType::Cctv => &["Hikvision", "Dahua", "CP Plus", "Bosch", "Samsung", "Other"],
            DeviceType::Ups => &["APC", "Luminous", "Microtek", "V-Guard", "Exide", "Other"],
        }
    }
}

// =============================================================================
// Service Status
// =============================================================================

/// Life cycle of a repair ticket.
///
/// Serialized with the display strings the store already holds
/// ("Received", "In Progress", "Ready", "Delivered").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServiceStatus {
    Received,
    #[serde(rename = "In Progress")]
    InProgress,
    Ready,
    Delivered,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        ServiceStatus::Received
    }
}

impl ServiceStatus {
    /// Tickets still on the workbench (drive the "pending repairs" stat).
    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, ServiceStatus::Received | ServiceStatus::InProgress)
    }
}

// =============================================================================
// Service Request
// =============================================================================

/// A repair ticket created by the intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    /// Store child key. Empty until the record is persisted.
    pub id: String,

    /// Human-readable ticket code ("SRV-…"), handed to the customer.
    pub service_id: String,

    pub customer_name: String,

    /// Normalized 10-digit phone number.
    pub phone: String,

    pub email: String,

    pub device_type: DeviceType,

    pub brand: String,

    pub problem_description: String,

    /// Date the customer wants to drop the device off.
    #[ts(as = "String")]
    pub preferred_date: NaiveDate,

    pub status: ServiceStatus,

    /// Set by the admin once the repair is done; clearing it reopens
    /// the ticket.
    #[ts(as = "Option<String>")]
    pub completion_date: Option<NaiveDate>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Identity id of the signed-in submitter, if any.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Builds a human-readable ticket code from a millisecond timestamp.
///
/// The code is the base-36 rendering of the timestamp, uppercased, behind
/// the `SRV-` prefix - short enough to read over the phone, unique enough
/// for a single shop.
///
/// ## Example
/// ```rust
/// use mobicare_core::types::service_id_for;
///
/// assert_eq!(service_id_for(0), "SRV-0");
/// assert_eq!(service_id_for(36), "SRV-10");
/// assert_eq!(service_id_for(1_700_000_000_000), "SRV-LOYW3V28");
/// ```
pub fn service_id_for(timestamp_millis: i64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let mut n = timestamp_millis.unsigned_abs();
    if n == 0 {
        return format!("{}-0", SERVICE_ID_PREFIX);
    }

    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    buf.reverse();

    let digits: String = buf.into_iter().collect();
    format!("{}-{}", SERVICE_ID_PREFIX, digits)
}

// =============================================================================
// Order
// =============================================================================

/// A single line of a past order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub price_paise: i64,
    pub quantity: i64,
}

/// A past order, read-only from this system's perspective.
///
/// The write path belongs to an out-of-scope checkout flow; the dashboard
/// only lists these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store child key.
    pub id: String,

    pub user_id: String,

    pub items: Vec<OrderItem>,

    pub total_paise: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: Category, brand: &str, rupees: i64, rating: f64) -> Product {
        Product::new(
            name,
            category,
            brand,
            Money::from_rupees(rupees),
            rating,
            10,
            "📱",
        )
    }

    #[test]
    fn test_role_serde_tags() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_product_document_is_camel_case() {
        let json =
            serde_json::to_value(product("iPhone 15", Category::Mobiles, "Apple", 79999, 4.5))
                .unwrap();
        assert!(json.get("pricePaise").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("price_paise").is_none());
    }

    #[test]
    fn test_service_status_serde_tags() {
        assert_eq!(
            serde_json::to_string(&ServiceStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        let parsed: ServiceStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, ServiceStatus::InProgress);
    }

    #[test]
    fn test_service_status_pending() {
        assert!(ServiceStatus::Received.is_pending());
        assert!(ServiceStatus::InProgress.is_pending());
        assert!(!ServiceStatus::Ready.is_pending());
        assert!(!ServiceStatus::Delivered.is_pending());
    }

    #[test]
    fn test_device_brands() {
        assert!(DeviceType::Mobile.brands().contains(&"Xiaomi"));
        assert!(DeviceType::Ups.brands().contains(&"APC"));
        assert!(!DeviceType::Ups.brands().contains(&"Apple"));
    }

    #[test]
    fn test_service_id_base36() {
        assert_eq!(service_id_for(0), "SRV-0");
        assert_eq!(service_id_for(35), "SRV-Z");
        assert_eq!(service_id_for(36), "SRV-10");
    }

    #[test]
    fn test_filter_category_and_brand() {
        let phone = product("iPhone 15 Pro Max", Category::Mobiles, "Apple", 159_900, 4.8);
        let laptop = product("Dell XPS 15", Category::Laptops, "Dell", 189_990, 4.6);

        let filter = ProductFilter {
            category: Some(Category::Mobiles),
            ..Default::default()
        };
        assert!(filter.matches(&phone));
        assert!(!filter.matches(&laptop));

        let filter = ProductFilter {
            brand: Some("dell".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&laptop));
        assert!(!filter.matches(&phone));
    }

    #[test]
    fn test_filter_price_window_and_rating() {
        let phone = product("OnePlus 12", Category::Mobiles, "OnePlus", 69_999, 4.6);

        let filter = ProductFilter {
            min_price_paise: Some(Money::from_rupees(50_000).paise()),
            max_price_paise: Some(Money::from_rupees(100_000).paise()),
            ..Default::default()
        };
        assert!(filter.matches(&phone));

        let filter = ProductFilter {
            min_rating: Some(4.7),
            ..Default::default()
        };
        assert!(!filter.matches(&phone));
    }

    #[test]
    fn test_filter_search_hits_name_or_brand() {
        let phone = product("Galaxy S24 Ultra", Category::Mobiles, "Samsung", 134_999, 4.7);

        let by_name = ProductFilter {
            search: Some("galaxy".to_string()),
            ..Default::default()
        };
        let by_brand = ProductFilter {
            search: Some("SAMS".to_string()),
            ..Default::default()
        };
        let miss = ProductFilter {
            search: Some("pixel".to_string()),
            ..Default::default()
        };
        assert!(by_name.matches(&phone));
        assert!(by_brand.matches(&phone));
        assert!(!miss.matches(&phone));
    }

    #[test]
    fn test_user_record_roundtrip_skips_empty_options() {
        let record = UserRecord {
            email: "a@b.com".to_string(),
            role: Role::User,
            display_name: None,
            photo_url: None,
            provider: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("displayName").is_none());
        assert!(json.get("provider").is_none());

        let back: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
