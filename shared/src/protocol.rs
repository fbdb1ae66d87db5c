use crate::models::*;
use crate::page::{ListResponse, WishlistResponse};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// A 401 from this endpoint means bad credentials, not an expired session,
    /// so the gateway must not try a token refresh.
    const SKIP_AUTH_REFRESH: bool = false;

    /// The URL path relative to the API base, e.g. `/orders/cart/`.
    fn path(&self) -> String;

    /// Query parameters, already in the order they should appear.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// JSON body, if any.
    fn body(&self) -> Option<Value> {
        None
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = TokenPair;
    const METHOD: HttpMethod = HttpMethod::Post;
    const SKIP_AUTH_REFRESH: bool = true;

    fn path(&self) -> String {
        "/auth/login/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "username": self.username, "password": self.password }))
    }
}

impl ApiRequest for RegisterForm {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const SKIP_AUTH_REFRESH: bool = true;

    fn path(&self) -> String {
        "/auth/register/".into()
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

impl ApiRequest for RefreshTokenRequest {
    type Response = AccessToken;
    const METHOD: HttpMethod = HttpMethod::Post;
    const SKIP_AUTH_REFRESH: bool = true;

    fn path(&self) -> String {
        "/auth/token/refresh/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "refresh": self.refresh }))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetProfileRequest;

impl ApiRequest for GetProfileRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/auth/profile/".into()
    }
}

impl ApiRequest for ProfileUpdate {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        "/auth/profile/".into()
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

impl ApiRequest for ChangePasswordRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/change-password/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "old_password": self.old_password, "new_password": self.new_password }))
    }
}

// =========================================================
// Addresses
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListAddressesRequest;

impl ApiRequest for ListAddressesRequest {
    type Response = ListResponse<Address>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/auth/addresses/".into()
    }
}

impl ApiRequest for AddressForm {
    type Response = Address;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/addresses/".into()
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateAddressRequest {
    pub id: u64,
    pub form: AddressForm,
}

impl ApiRequest for UpdateAddressRequest {
    type Response = Address;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/auth/addresses/{}/", self.id)
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(&self.form).ok()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAddressRequest {
    pub id: u64,
}

impl ApiRequest for DeleteAddressRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/auth/addresses/{}/", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SetDefaultAddressRequest {
    pub id: u64,
}

impl ApiRequest for SetDefaultAddressRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/auth/addresses/{}/set_default/", self.id)
    }
}

// =========================================================
// Products
// =========================================================

/// Product listing filters. Only parameters that are set are emitted,
/// always in the same order, so equal queries produce equal URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub on_sale: bool,
    pub in_stock: bool,
    pub ordering: Option<String>,
    pub page: Option<u32>,
}

impl ProductQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_ref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.trim().to_string()));
        }
        if let Some(category) = self.category.as_ref().filter(|c| !c.is_empty()) {
            params.push(("category", category.clone()));
        }
        if let Some(min) = self.min_price {
            params.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("max_price", max.to_string()));
        }
        if self.on_sale {
            params.push(("on_sale", "true".to_string()));
        }
        if self.in_stock {
            params.push(("in_stock", "true".to_string()));
        }
        if let Some(ordering) = self.ordering.as_ref().filter(|o| !o.is_empty()) {
            params.push(("ordering", ordering.clone()));
        }
        if let Some(page) = self.page.filter(|p| *p > 1) {
            params.push(("page", page.to_string()));
        }
        params
    }
}

impl ApiRequest for ProductQuery {
    type Response = ListResponse<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/products/products/".into()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.params()
    }
}

#[derive(Debug, Clone)]
pub struct GetProductRequest {
    pub slug: String,
}

impl ApiRequest for GetProductRequest {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/products/products/{}/", self.slug)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeaturedProductsRequest;

impl ApiRequest for FeaturedProductsRequest {
    type Response = ListResponse<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/products/products/featured/".into()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OnSaleProductsRequest;

impl ApiRequest for OnSaleProductsRequest {
    type Response = ListResponse<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/products/products/on_sale/".into()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Response = ListResponse<Category>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/products/categories/".into()
    }
}

#[derive(Debug, Clone)]
pub struct GetCategoryRequest {
    pub slug: String,
}

impl ApiRequest for GetCategoryRequest {
    type Response = Category;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/products/categories/{}/", self.slug)
    }
}

// =========================================================
// Cart
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct GetCartRequest;

impl ApiRequest for GetCartRequest {
    type Response = Cart;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/orders/cart/".into()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: u64,
    pub quantity: u32,
}

impl ApiRequest for AddCartItemRequest {
    // Mutation responses are ignored: the cart is always re-read.
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders/cart/add_item/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "product_id": self.product_id, "quantity": self.quantity }))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub item_id: u64,
    pub quantity: u32,
}

impl ApiRequest for UpdateCartItemRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders/cart/update_item/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "item_id": self.item_id, "quantity": self.quantity }))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RemoveCartItemRequest {
    pub item_id: u64,
}

impl ApiRequest for RemoveCartItemRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders/cart/remove_item/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "item_id": self.item_id }))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClearCartRequest;

impl ApiRequest for ClearCartRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders/cart/clear/".into()
    }
}

// =========================================================
// Wishlist
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct GetWishlistRequest;

impl ApiRequest for GetWishlistRequest {
    type Response = WishlistResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/orders/wishlist/".into()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AddToWishlistRequest {
    pub product_id: u64,
}

impl ApiRequest for AddToWishlistRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders/wishlist/add/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "product_id": self.product_id }))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveFromWishlistRequest {
    pub product_id: u64,
}

impl ApiRequest for RemoveFromWishlistRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders/wishlist/remove/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "product_id": self.product_id }))
    }
}

// =========================================================
// Orders & Payments
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOrdersRequest;

impl ApiRequest for ListOrdersRequest {
    type Response = ListResponse<Order>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/orders/orders/".into()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetOrderRequest {
    pub id: u64,
}

impl ApiRequest for GetOrderRequest {
    type Response = Order;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/orders/orders/{}/", self.id)
    }
}

/// Order creation carries only the shipping fields; the payment method
/// goes to the payment request.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest<'a> {
    pub form: &'a CheckoutForm,
}

impl ApiRequest for CreateOrderRequest<'_> {
    type Response = Order;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders/orders/".into()
    }

    fn body(&self) -> Option<Value> {
        let f = self.form;
        Some(json!({
            "shipping_name": f.shipping_name,
            "shipping_address": f.shipping_address,
            "shipping_city": f.shipping_city,
            "shipping_state": f.shipping_state,
            "shipping_postal_code": f.shipping_postal_code,
            "shipping_phone": f.shipping_phone,
            "notes": f.notes,
        }))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RequestPaymentRequest {
    pub order_id: u64,
    pub payment_method: PaymentGateway,
}

impl ApiRequest for RequestPaymentRequest {
    type Response = PaymentRedirect;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/payments/request/".into()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "order_id": self.order_id,
            "payment_method": self.payment_method.as_str(),
        }))
    }
}

/// Gateway callback verification; the parameter names are the ones the
/// gateway appends to the return URL.
#[derive(Debug, Clone)]
pub struct VerifyPaymentRequest {
    pub authority: String,
    pub status: String,
}

impl ApiRequest for VerifyPaymentRequest {
    type Response = Payment;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/payments/verify/".into()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authority", self.authority.clone()),
            ("Status", self.status.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_query_only_emits_set_params() {
        let query = ProductQuery {
            search: Some("  rice ".into()),
            on_sale: true,
            ordering: Some("-created_at".into()),
            page: Some(1),
            ..Default::default()
        };
        assert_eq!(
            query.params(),
            vec![
                ("search", "rice".to_string()),
                ("on_sale", "true".to_string()),
                ("ordering", "-created_at".to_string()),
            ]
        );
    }

    #[test]
    fn test_product_query_is_deterministic() {
        let query = ProductQuery {
            category: Some("dairy".into()),
            min_price: Some(1000),
            max_price: Some(50000),
            in_stock: true,
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(query.params(), query.clone().params());
        assert_eq!(query.params().last(), Some(&("page", "3".to_string())));
    }

    #[test]
    fn test_create_order_body_omits_payment_method() {
        let form = CheckoutForm {
            shipping_name: "Sara".into(),
            payment_method: PaymentGateway::Saman,
            ..Default::default()
        };
        let body = CreateOrderRequest { form: &form }.body().unwrap();
        assert_eq!(body["shipping_name"], "Sara");
        assert!(body.get("payment_method").is_none());
    }

    #[test]
    fn test_auth_endpoints_skip_refresh() {
        assert!(LoginRequest::SKIP_AUTH_REFRESH);
        assert!(RefreshTokenRequest::SKIP_AUTH_REFRESH);
        assert!(!GetCartRequest::SKIP_AUTH_REFRESH);
    }
}
