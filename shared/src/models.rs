use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// 价格 (Price)
// =========================================================

/// 后端返回的十进制金额字符串，例如 `"125000.00"`
///
/// 客户端只负责展示和比较，不重新计算服务端给出的合计。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub String);

impl Price {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 转换为以分为单位的整数（两位小数），无法解析时返回 `None`
    pub fn minor_units(&self) -> Option<i64> {
        let raw = self.0.trim();
        if raw.is_empty() {
            return None;
        }
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut cents = 0i64;
        for (i, c) in frac.chars().take(2).enumerate() {
            let d = c.to_digit(10)? as i64;
            cents += if i == 0 { d * 10 } else { d };
        }
        let value = whole.checked_mul(100)?.checked_add(cents)?;
        Some(if negative { -value } else { value })
    }

    /// 整数部分（托曼没有小数位，展示时使用）
    pub fn whole_units(&self) -> Option<i64> {
        self.minor_units().map(|v| v / 100)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.whole_units() {
            Some(units) => {
                let digits = units.abs().to_string();
                let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
                for (i, c) in digits.chars().enumerate() {
                    if i > 0 && (digits.len() - i) % 3 == 0 {
                        grouped.push(',');
                    }
                    grouped.push(c);
                }
                if units < 0 {
                    write!(f, "-")?;
                }
                write!(f, "{}", grouped)
            }
            None => write!(f, "{}", self.0),
        }
    }
}

/// 结算页展示用的运费规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// 满额包邮门槛（整数货币单位）
    pub free_threshold: i64,
    /// 未达门槛时的固定运费
    pub flat_cost: i64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: 500_000,
            flat_cost: 30_000,
        }
    }
}

impl ShippingPolicy {
    pub fn quote(&self, subtotal: &Price) -> i64 {
        match subtotal.whole_units() {
            Some(amount) if amount >= self.free_threshold => 0,
            _ => self.flat_cost,
        }
    }
}

// =========================================================
// 用户 (User)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// 登录接口返回的令牌对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// 刷新接口返回的新访问令牌（服务端开启轮换时附带新的刷新令牌）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

/// 资料更新，只序列化设置了的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

// =========================================================
// 商品与分类 (Catalog)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub category: Option<u64>,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub sale_price: Option<Price>,
    #[serde(default)]
    pub final_price: Price,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub is_in_stock: bool,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub reviews_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub parent: Option<u64>,
    #[serde(default)]
    pub children: Vec<Category>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// =========================================================
// 购物车与收藏夹 (Cart & Wishlist)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub product: u64,
    pub product_detail: Product,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Price,
    #[serde(default)]
    pub subtotal: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub subtotal: Price,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, item_id: u64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn item_for_product(&self, product_id: u64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product == product_id)
    }
}

/// 收藏夹的唯一规范表示：完整商品列表
///
/// 只需要商品 ID 的调用方使用 `contains` / `product_ids`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    pub products: Vec<Product>,
}

impl Wishlist {
    pub fn contains(&self, product_id: u64) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }

    pub fn product_ids(&self) -> Vec<u64> {
        self.products.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =========================================================
// 订单、地址与支付 (Orders, Addresses, Payments)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
    #[serde(other)]
    Other,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Awaiting payment",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
            OrderStatus::Other => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub product: u64,
    pub product_name: String,
    #[serde(default)]
    pub product_sku: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub subtotal: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub order_number: String,
    #[serde(default)]
    pub shipping_name: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub shipping_city: String,
    #[serde(default)]
    pub shipping_state: String,
    #[serde(default)]
    pub shipping_postal_code: String,
    #[serde(default)]
    pub shipping_phone: String,
    #[serde(default)]
    pub subtotal: Price,
    #[serde(default)]
    pub shipping_cost: Price,
    #[serde(default)]
    pub tax: Price,
    #[serde(default)]
    pub discount: Price,
    pub total: Price,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: u64,
    pub title: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub postal_code: String,
    pub phone_number: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressForm {
    pub title: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone_number: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentGateway {
    #[default]
    Zarinpal,
    Paypint,
    Saman,
    Mellat,
}

impl PaymentGateway {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentGateway::Zarinpal => "zarinpal",
            PaymentGateway::Paypint => "paypint",
            PaymentGateway::Saman => "saman",
            PaymentGateway::Mellat => "mellat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Refunded,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub order: u64,
    #[serde(default)]
    pub order_number: String,
    pub gateway: PaymentGateway,
    pub amount: Price,
    pub status: PaymentStatus,
    #[serde(default)]
    pub authority: Option<String>,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub tracking_code: Option<String>,
}

/// 发起支付后的网关跳转信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRedirect {
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub authority: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub shipping_name: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postal_code: String,
    pub shipping_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub payment_method: PaymentGateway,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_minor_units() {
        assert_eq!(Price::from("125000.00").minor_units(), Some(12_500_000));
        assert_eq!(Price::from("99.5").minor_units(), Some(9_950));
        assert_eq!(Price::from("42").minor_units(), Some(4_200));
        assert_eq!(Price::from("-3.25").minor_units(), Some(-325));
        assert_eq!(Price::from("").minor_units(), None);
        assert_eq!(Price::from("12a.00").minor_units(), None);
    }

    #[test]
    fn test_price_display_groups_thousands() {
        assert_eq!(Price::from("1250000.00").to_string(), "1,250,000");
        assert_eq!(Price::from("999").to_string(), "999");
        assert_eq!(Price::from("n/a").to_string(), "n/a");
    }

    #[test]
    fn test_shipping_quote_threshold() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.quote(&Price::from("500000.00")), 0);
        assert_eq!(policy.quote(&Price::from("499999.99")), 30_000);
        assert_eq!(policy.quote(&Price::from("garbage")), 30_000);
    }

    #[test]
    fn test_order_status_unknown_value() {
        let status: OrderStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status, OrderStatus::Other);
        let status: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Shipped);
    }

    #[test]
    fn test_user_display_name_falls_back_to_username() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "sara",
            "created_at": "2024-03-01T10:00:00+03:30"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "sara");
        assert!(user.created_at.is_some());
    }
}
