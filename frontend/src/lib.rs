//! 店面前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `storefront`: 核心库，提供 Store、服务和路由守卫
//! - `web`: 核心库各接口的浏览器实现 + 路由服务
//! - `context`: 把核心库 Store 桥接为信号
//! - `components`: UI 组件层

mod context;
mod components {
    pub mod account;
    pub mod cart;
    pub mod checkout;
    pub mod header;
    pub mod login;
    pub mod orders;
    pub mod payment;
    pub mod products;
    pub mod toast;
}

pub(crate) mod web {
    pub mod http;
    pub mod navigator;
    pub mod router;
    pub mod storage;
}

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::{AppRoute, ClientConfig, Platform, Storefront};

use crate::components::account::{AddressesPage, ProfilePage};
use crate::components::cart::CartPage;
use crate::components::checkout::CheckoutPage;
use crate::components::header::Header;
use crate::components::login::{LoginPage, RegisterPage};
use crate::components::orders::{OrderDetailPage, OrdersPage};
use crate::components::payment::{PaymentFailedPage, PaymentSuccessPage};
use crate::components::products::{
    CategoriesPage, HomePage, ProductDetailPage, ProductsPage, WishlistPage,
};
use crate::components::toast::{ToastNotifier, ToastOutlet};
use crate::context::AppContext;
use crate::web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Product(slug) => view! { <ProductDetailPage slug=slug /> }.into_any(),
        AppRoute::Categories => view! { <CategoriesPage /> }.into_any(),
        AppRoute::Category(slug) => view! { <ProductsPage category=slug /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::Checkout => view! { <CheckoutPage /> }.into_any(),
        AppRoute::Orders => view! { <OrdersPage /> }.into_any(),
        AppRoute::Order(id) => view! { <OrderDetailPage id=id /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Addresses => view! { <AddressesPage /> }.into_any(),
        AppRoute::Wishlist => view! { <WishlistPage /> }.into_any(),
        AppRoute::Login { .. } => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::PaymentSuccess => view! { <PaymentSuccessPage /> }.into_any(),
        AppRoute::PaymentFailed => view! { <PaymentFailedPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Home class="btn btn-primary mt-4">"Back to the shop"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 提示队列（服务层通过 Notifier 写入）
    let toasts = RwSignal::new(Vec::new());

    // 2. 组装核心库：浏览器实现通过 Platform 注入
    let platform = Platform {
        http: Rc::new(web::http::FetchHttpClient),
        credentials: Rc::new(web::storage::CookieCredentials),
        persistence: Rc::new(web::storage::LocalStorage),
        notifier: Rc::new(ToastNotifier::new(toasts)),
        navigator: Rc::new(web::navigator::LocationNavigator),
    };
    let config = ClientConfig::from_env();
    log::info!("[App] API at {}", config.api_base_url);
    let ctx = AppContext::new(Storefront::new(config, platform));
    provide_context(ctx);

    // 3. 已登录时拉取资料、购物车和收藏夹
    let app = ctx.app();
    spawn_local(async move { app.bootstrap().await });

    // 4. 认证状态信号注入路由服务
    let is_authenticated = ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <Header />
            <main class="container mx-auto p-4">
                <RouterOutlet matcher=route_matcher />
            </main>
            <ToastOutlet toasts=toasts />
        </Router>
    }
}
