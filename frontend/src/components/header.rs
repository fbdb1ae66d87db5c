use leptos::prelude::*;
use storefront::AppRoute;
use storefront::store::Panel;

use crate::context::use_app;
use crate::web::navigator::push_and_notify;
use crate::web::router::{Link, use_router};

/// 顶部导航：面板开关、购物车与收藏夹角标、登录状态
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app();
    let is_auth = ctx.is_authenticated_signal();
    let cart_count = ctx.cart_count();
    let wishlist_count = ctx.wishlist_count();
    let user = ctx.signals.user;

    let router = use_router();

    // 切换页面时收起所有面板
    Effect::new(move |_| {
        router.current_route().track();
        ctx.app().stores.ui.close_all();
    });

    let toggle = move |panel: Panel| ctx.app().stores.ui.toggle(panel);
    let on_logout = move |_| ctx.app().auth.logout();

    view! {
        <header class="navbar bg-base-100 shadow-sm sticky top-0 z-30">
            <div class="flex-none">
                <button class="btn btn-ghost btn-square" on:click=move |_| toggle(Panel::Sidebar)>
                    "☰"
                </button>
            </div>
            <div class="flex-1">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl">"Storefront"</Link>
            </div>
            <div class="flex-none gap-1">
                <button class="btn btn-ghost" on:click=move |_| toggle(Panel::Search)>"Search"</button>
                <Show when=move || is_auth.get()>
                    <Link to=AppRoute::Wishlist class="btn btn-ghost">
                        "Wishlist"
                        <span class="badge badge-sm">{move || wishlist_count.get()}</span>
                    </Link>
                </Show>
                <button class="btn btn-ghost" on:click=move |_| toggle(Panel::Cart)>
                    "Cart"
                    <span class="badge badge-sm badge-primary">{move || cart_count.get()}</span>
                </button>
                <Show
                    when=move || is_auth.get()
                    fallback=|| view! {
                        <Link to={AppRoute::Login { redirect: None }} class="btn btn-primary btn-sm">
                            "Sign in"
                        </Link>
                    }
                >
                    <Link to=AppRoute::Profile class="btn btn-ghost">
                        {move || user.with(|u| u.as_ref().map(|u| u.display_name()).unwrap_or_default())}
                    </Link>
                    <button class="btn btn-outline btn-sm" on:click=on_logout>"Sign out"</button>
                </Show>
            </div>
        </header>
        <Sidebar />
        <SearchPanel />
        <CartDrawer />
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let ctx = use_app();
    let panels = ctx.signals.panels;
    let close = move |_| ctx.app().stores.ui.close(Panel::Sidebar);

    view! {
        <Show when=move || panels.with(|p| p.sidebar)>
            <aside class="fixed inset-y-0 left-0 w-64 bg-base-100 shadow-xl z-40 p-4">
                <button class="btn btn-sm btn-circle absolute right-2 top-2" on:click=close>"✕"</button>
                <ul class="menu mt-8">
                    <li><Link to=AppRoute::Products>"All products"</Link></li>
                    <li><Link to=AppRoute::Categories>"Categories"</Link></li>
                    <li><Link to=AppRoute::Orders>"My orders"</Link></li>
                    <li><Link to=AppRoute::Addresses>"Addresses"</Link></li>
                </ul>
            </aside>
        </Show>
    }
}

#[component]
fn SearchPanel() -> impl IntoView {
    let ctx = use_app();
    let panels = ctx.signals.panels;
    let (term, set_term) = signal(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let term = term.get_untracked();
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        ctx.app().stores.ui.close(Panel::Search);
        push_and_notify(&format!("/products?search={}", urlencoding::encode(term)));
    };

    view! {
        <Show when=move || panels.with(|p| p.search)>
            <div class="bg-base-100 shadow p-4">
                <form class="join w-full" on:submit=on_submit>
                    <input
                        type="search"
                        class="input input-bordered join-item flex-1"
                        placeholder="Search products..."
                        prop:value=term
                        on:input=move |ev| set_term.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary join-item">"Search"</button>
                </form>
            </div>
        </Show>
    }
}

/// 购物车抽屉：展示当前快照，完整操作在购物车页面
#[component]
fn CartDrawer() -> impl IntoView {
    let ctx = use_app();
    let panels = ctx.signals.panels;
    let cart = ctx.signals.cart;
    let close = move |_| ctx.app().stores.ui.close(Panel::Cart);

    view! {
        <Show when=move || panels.with(|p| p.cart)>
            <aside class="fixed inset-y-0 right-0 w-80 bg-base-100 shadow-xl z-40 p-4 flex flex-col">
                <div class="flex justify-between items-center mb-4">
                    <h2 class="text-lg font-bold">"Your cart"</h2>
                    <button class="btn btn-sm btn-circle" on:click=close>"✕"</button>
                </div>
                <ul class="flex-1 space-y-2 overflow-y-auto">
                    {move || {
                        cart.get()
                            .map(|c| c.items)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|item| view! {
                                <li class="flex justify-between">
                                    <span>{item.product_detail.name} " × " {item.quantity}</span>
                                    <span>{item.subtotal.to_string()}</span>
                                </li>
                            })
                            .collect_view()
                    }}
                </ul>
                <div class="border-t pt-2">
                    <p class="flex justify-between font-bold">
                        "Subtotal"
                        <span>{move || cart.with(|c| c.as_ref().map(|c| c.subtotal.to_string()).unwrap_or_default())}</span>
                    </p>
                    <Link to=AppRoute::Cart class="btn btn-primary w-full mt-2">"View cart"</Link>
                </div>
            </aside>
        </Show>
    }
}
