use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::shared::protocol::ProductQuery;
use storefront::shared::{Category, Page, Product};

use crate::context::use_app;
use crate::web::navigator::query_param;
use crate::web::router::Link;

// =========================================================
// 商品卡片
// =========================================================

/// 商品卡片：加入购物车 + 收藏切换
#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let ctx = use_app();
    let id = product.id;
    let in_wishlist = ctx.in_wishlist(id);
    let image = ctx.app().config().image_url(product.primary_image.as_deref());
    let (busy, set_busy) = signal(false);

    let add_to_cart = move |_| {
        set_busy.set(true);
        let app = ctx.app();
        spawn_local(async move {
            // 未登录时服务会提示并跳转登录页
            let _ = app.cart.add_item(id, 1).await;
            set_busy.set(false);
        });
    };

    let toggle_wishlist = move |_| {
        let app = ctx.app();
        spawn_local(async move {
            let _ = app.wishlist.toggle(id).await;
        });
    };

    let in_stock = product.is_in_stock;
    let on_sale = product.sale_price.is_some();
    let price = product.price.to_string();
    let final_price = product.final_price.to_string();

    view! {
        <div class="card bg-base-100 shadow-md">
            <figure><img src=image alt=product.name.clone() class="h-48 w-full object-cover" /></figure>
            <div class="card-body p-4">
                <Link to={AppRoute::Product(product.slug.clone())} class="card-title text-base">
                    {product.name.clone()}
                </Link>
                <p class="text-sm opacity-70">{product.category_name.clone()}</p>
                <div class="flex items-baseline gap-2">
                    <span class="font-bold">{final_price}</span>
                    <Show when=move || on_sale>
                        <span class="line-through text-sm opacity-50">{price.clone()}</span>
                    </Show>
                </div>
                <div class="card-actions justify-between">
                    <button class="btn btn-ghost btn-sm" on:click=toggle_wishlist>
                        {move || if in_wishlist.get() { "♥" } else { "♡" }}
                    </button>
                    <button
                        class="btn btn-primary btn-sm"
                        disabled=move || busy.get() || !in_stock
                        on:click=add_to_cart
                    >
                        {if in_stock { "Add to cart" } else { "Out of stock" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn product_grid(products: Vec<Product>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {products
                .into_iter()
                .map(|product| view! { <ProductCard product=product /> })
                .collect_view()}
        </div>
    }
}

fn spinner() -> impl IntoView {
    view! {
        <div class="flex justify-center p-8">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

// =========================================================
// 页面
// =========================================================

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app();
    let featured = RwSignal::new(Vec::<Product>::new());
    let on_sale = RwSignal::new(Vec::<Product>::new());
    let categories = RwSignal::new(Vec::<Category>::new());

    let app = ctx.app();
    spawn_local(async move {
        let (f, s, c) = futures::join!(
            app.catalog.featured(),
            app.catalog.on_sale(),
            app.catalog.root_categories()
        );
        match f {
            Ok(items) => featured.set(items),
            Err(e) => log::warn!("[Home] Featured products failed: {}", e),
        }
        match s {
            Ok(items) => on_sale.set(items),
            Err(e) => log::warn!("[Home] Sale products failed: {}", e),
        }
        match c {
            Ok(items) => categories.set(items),
            Err(e) => log::warn!("[Home] Categories failed: {}", e),
        }
    });

    view! {
        <div class="space-y-8">
            <section>
                <h2 class="text-2xl font-bold mb-4">"Categories"</h2>
                <div class="flex flex-wrap gap-2">
                    {move || categories.get().into_iter().map(|c| view! {
                        <Link to={AppRoute::Category(c.slug)} class="btn btn-outline btn-sm">{c.name}</Link>
                    }).collect_view()}
                </div>
            </section>
            <section>
                <h2 class="text-2xl font-bold mb-4">"Featured"</h2>
                {move || product_grid(featured.get())}
            </section>
            <section>
                <h2 class="text-2xl font-bold mb-4">"Special offers"</h2>
                {move || product_grid(on_sale.get())}
            </section>
        </div>
    }
}

/// 商品列表，`category` 为分类页的筛选条件，搜索词取自 `?search=`
#[component]
pub fn ProductsPage(#[prop(optional)] category: Option<String>) -> impl IntoView {
    let ctx = use_app();
    let search = query_param("search");
    let title = match (&search, &category) {
        (Some(term), _) => format!("Results for \"{}\"", term),
        (None, Some(slug)) => slug.clone(),
        (None, None) => "All products".to_string(),
    };

    let query = RwSignal::new(ProductQuery {
        search,
        category,
        ..Default::default()
    });
    let page = RwSignal::new(Option::<Page<Product>>::None);
    let (loading, set_loading) = signal(false);

    let load = move || {
        set_loading.set(true);
        let app = ctx.app();
        let query = query.get_untracked();
        spawn_local(async move {
            match app.catalog.products(&query).await {
                Ok(result) => page.set(Some(result)),
                Err(e) => log::warn!("[Products] Load failed: {}", e),
            }
            set_loading.set(false);
        });
    };
    load();

    let go_to = move |delta: i64| {
        query.update(|q| {
            let current = q.page.unwrap_or(1) as i64;
            q.page = Some((current + delta).max(1) as u32);
        });
        load();
    };

    let toggle_filter = move |set: fn(&mut ProductQuery)| {
        query.update(|q| {
            set(q);
            q.page = None;
        });
        load();
    };

    view! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <h1 class="text-2xl font-bold">{title}</h1>
                <div class="flex gap-2">
                    <button class="btn btn-sm" on:click=move |_| toggle_filter(|q| q.on_sale = !q.on_sale)>
                        {move || if query.with(|q| q.on_sale) { "✓ On sale" } else { "On sale" }}
                    </button>
                    <button class="btn btn-sm" on:click=move |_| toggle_filter(|q| q.in_stock = !q.in_stock)>
                        {move || if query.with(|q| q.in_stock) { "✓ In stock" } else { "In stock" }}
                    </button>
                </div>
            </div>
            <Show when=move || !loading.get() fallback=spinner>
                {move || match page.get() {
                    Some(p) if !p.is_empty() => view! {
                        <div>
                            <p class="text-sm opacity-70 mb-2">{p.count} " products"</p>
                            {product_grid(p.items.clone())}
                            <div class="join mt-4">
                                <button class="join-item btn" disabled=p.previous.is_none() on:click=move |_| go_to(-1)>"«"</button>
                                <button class="join-item btn" disabled=p.next.is_none() on:click=move |_| go_to(1)>"»"</button>
                            </div>
                        </div>
                    }.into_any(),
                    _ => view! { <p class="text-center opacity-70 p-8">"No products found"</p> }.into_any(),
                }}
            </Show>
        </div>
    }
}

#[component]
pub fn ProductDetailPage(slug: String) -> impl IntoView {
    let ctx = use_app();
    let product = RwSignal::new(Option::<Product>::None);
    let (quantity, set_quantity) = signal(1u32);

    let app = ctx.app();
    spawn_local(async move {
        match app.catalog.product(&slug).await {
            Ok(p) => product.set(Some(p)),
            Err(e) => log::warn!("[Product] Load failed: {}", e),
        }
    });

    let add = move |_| {
        let Some(id) = product.with_untracked(|p| p.as_ref().map(|p| p.id)) else {
            return;
        };
        let app = ctx.app();
        let quantity = quantity.get_untracked();
        spawn_local(async move {
            let _ = app.cart.add_item(id, quantity).await;
        });
    };

    view! {
        {move || match product.get() {
            None => spinner().into_any(),
            Some(p) => {
                let image = ctx.app().config().image_url(p.primary_image.as_deref());
                let max = p.stock_quantity.max(1);
                view! {
                    <div class="grid md:grid-cols-2 gap-8">
                        <img src=image alt=p.name.clone() class="rounded-box w-full" />
                        <div class="space-y-4">
                            <h1 class="text-3xl font-bold">{p.name.clone()}</h1>
                            <p class="text-2xl">{p.final_price.to_string()}</p>
                            <p>{p.description.clone().unwrap_or_default()}</p>
                            <p class="text-sm opacity-70">
                                {if p.is_in_stock { format!("{} in stock", p.stock_quantity) } else { "Out of stock".to_string() }}
                            </p>
                            <div class="join">
                                <button class="join-item btn" on:click=move |_| set_quantity.update(|q| *q = q.saturating_sub(1).max(1))>"-"</button>
                                <span class="join-item btn btn-disabled">{move || quantity.get()}</span>
                                <button class="join-item btn" on:click=move |_| set_quantity.update(|q| *q = (*q + 1).min(max))>"+"</button>
                            </div>
                            <button class="btn btn-primary" disabled=!p.is_in_stock on:click=add>"Add to cart"</button>
                        </div>
                    </div>
                }
                .into_any()
            }
        }}
    }
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let ctx = use_app();
    let categories = RwSignal::new(Vec::<Category>::new());

    let app = ctx.app();
    spawn_local(async move {
        match app.catalog.root_categories().await {
            Ok(items) => categories.set(items),
            Err(e) => log::warn!("[Categories] Load failed: {}", e),
        }
    });

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {move || categories.get().into_iter().map(|c| {
                let image = ctx.app().config().image_url(c.image.as_deref());
                view! {
                    <Link to={AppRoute::Category(c.slug)} class="card bg-base-100 shadow-md">
                        <figure><img src=image alt=c.name.clone() class="h-32 w-full object-cover" /></figure>
                        <div class="card-body p-4"><h2 class="card-title text-base">{c.name}</h2></div>
                    </Link>
                }
            }).collect_view()}
        </div>
    }
}

/// 收藏夹页，直接展示 Store 中的规范快照
#[component]
pub fn WishlistPage() -> impl IntoView {
    let ctx = use_app();
    let wishlist = ctx.signals.wishlist;

    let app = ctx.app();
    spawn_local(async move {
        let _ = app.wishlist.load().await;
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">"Wishlist"</h1>
            {move || {
                let products = wishlist.get().map(|w| w.products).unwrap_or_default();
                if products.is_empty() {
                    view! { <p class="opacity-70">"Your wishlist is empty"</p> }.into_any()
                } else {
                    product_grid(products).into_any()
                }
            }}
        </div>
    }
}
