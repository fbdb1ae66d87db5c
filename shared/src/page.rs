//! 列表响应的统一形状
//!
//! 后端的列表端点有时返回裸数组，有时返回 `{count, next, previous, results}`
//! 分页信封；收藏夹端点更是有多种形状。这里在反序列化时一次性完成形状识别，
//! 调用方只消费 `Page<T>` 和 `Wishlist`。

use crate::models::{Product, Wishlist};
use serde::{Deserialize, Serialize};

/// 列表端点的原始响应（两种形状之一）
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated {
        count: u64,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Bare(Vec<T>),
}

/// 归一化后的列表页
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            items: Vec::new(),
        }
    }
}

impl<T> From<ListResponse<T>> for Page<T> {
    fn from(response: ListResponse<T>) -> Self {
        match response {
            ListResponse::Paginated {
                count,
                next,
                previous,
                results,
            } => Page {
                count,
                next,
                previous,
                items: results,
            },
            ListResponse::Bare(items) => Page {
                count: items.len() as u64,
                next: None,
                previous: None,
                items,
            },
        }
    }
}

impl<T> ListResponse<T> {
    pub fn into_page(self) -> Page<T> {
        self.into()
    }

    pub fn into_items(self) -> Vec<T> {
        Page::from(self).items
    }
}

// =========================================================
// 收藏夹形状
// =========================================================

/// 收藏夹条目：可能是商品本身，也可能是带 `product_detail` 的包装
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WishlistEntry {
    Wrapped { product_detail: Product },
    Product(Product),
}

impl From<WishlistEntry> for Product {
    fn from(entry: WishlistEntry) -> Self {
        match entry {
            WishlistEntry::Wrapped { product_detail } => product_detail,
            WishlistEntry::Product(product) => product,
        }
    }
}

/// 收藏夹端点的原始响应
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WishlistResponse {
    Products { products: Vec<WishlistEntry> },
    Items { items: Vec<WishlistEntry> },
    Paginated { results: Vec<WishlistEntry> },
    Bare(Vec<WishlistEntry>),
}

impl From<WishlistResponse> for Wishlist {
    fn from(response: WishlistResponse) -> Self {
        let entries = match response {
            WishlistResponse::Products { products } => products,
            WishlistResponse::Items { items } => items,
            WishlistResponse::Paginated { results } => results,
            WishlistResponse::Bare(entries) => entries,
        };
        Wishlist {
            products: entries.into_iter().map(Product::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("Product {}", id),
            "slug": format!("product-{}", id),
            "price": "1000.00",
            "final_price": "1000.00"
        })
    }

    #[test]
    fn test_bare_array_becomes_single_page() {
        let raw = json!([{ "id": 1 }, { "id": 2 }]);
        #[derive(Debug, Deserialize, PartialEq)]
        struct Item {
            id: u64,
        }
        let page: Page<Item> = serde_json::from_value::<ListResponse<Item>>(raw)
            .unwrap()
            .into_page();
        assert_eq!(page.count, 2);
        assert!(!page.has_next());
        assert_eq!(page.items[1].id, 2);
    }

    #[test]
    fn test_envelope_keeps_links() {
        let raw = json!({
            "count": 30,
            "next": "http://localhost:8000/api/products/products/?page=2",
            "previous": null,
            "results": [product_json(7)]
        });
        let page = serde_json::from_value::<ListResponse<Product>>(raw)
            .unwrap()
            .into_page();
        assert_eq!(page.count, 30);
        assert!(page.has_next());
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].slug, "product-7");
    }

    #[test]
    fn test_wishlist_shapes_normalize_to_products() {
        let shapes = vec![
            json!({ "id": 3, "user": 1, "products": [product_json(1), product_json(2)] }),
            json!({ "items": [product_json(1), { "id": 9, "product_detail": product_json(2) }] }),
            json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [product_json(1), product_json(2)]
            }),
            json!([product_json(1), product_json(2)]),
        ];

        for raw in shapes {
            let wishlist: Wishlist = serde_json::from_value::<WishlistResponse>(raw.clone())
                .unwrap()
                .into();
            assert_eq!(wishlist.product_ids(), vec![1, 2], "shape: {}", raw);
        }
    }

    #[test]
    fn test_empty_wishlist() {
        let wishlist: Wishlist =
            serde_json::from_value::<WishlistResponse>(json!({ "products": [] }))
                .unwrap()
                .into();
        assert!(wishlist.is_empty());
        assert!(!wishlist.contains(1));
    }
}
