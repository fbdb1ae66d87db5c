use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::shared::CartItem;

use crate::context::use_app;
use crate::web::router::Link;

/// 购物车行：数量按钮在该条目更新期间禁用
#[component]
fn CartRow(item: CartItem) -> impl IntoView {
    let ctx = use_app();
    let updating = ctx.signals.updating;
    let item_id = item.id;
    let quantity = item.quantity;
    let max = item.product_detail.stock_quantity.max(quantity);
    let busy = move || updating.with(|ids| ids.contains(&item_id));

    let set_quantity = move |target: u32| {
        let app = ctx.app();
        spawn_local(async move {
            let _ = app.cart.update_quantity(item_id, target).await;
        });
    };
    let remove = move |_| {
        let app = ctx.app();
        spawn_local(async move {
            let _ = app.cart.remove_item(item_id).await;
        });
    };

    let image = ctx
        .app()
        .config()
        .image_url(item.product_detail.primary_image.as_deref());

    view! {
        <tr>
            <td>
                <div class="flex items-center gap-3">
                    <img src=image class="w-12 h-12 rounded object-cover" />
                    <Link to={AppRoute::Product(item.product_detail.slug.clone())}>
                        {item.product_detail.name.clone()}
                    </Link>
                </div>
            </td>
            <td>{item.unit_price.to_string()}</td>
            <td>
                <div class="join">
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || busy() || quantity <= 1
                        on:click=move |_| set_quantity(quantity - 1)
                    >
                        "-"
                    </button>
                    <span class="join-item btn btn-sm btn-disabled">{quantity}</span>
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || busy() || quantity >= max
                        on:click=move |_| set_quantity(quantity + 1)
                    >
                        "+"
                    </button>
                </div>
            </td>
            <td>{item.subtotal.to_string()}</td>
            <td>
                <button class="btn btn-ghost btn-sm" disabled=busy on:click=remove>"✕"</button>
            </td>
        </tr>
    }
}

/// 购物车页
#[component]
pub fn CartPage() -> impl IntoView {
    let ctx = use_app();
    let cart = ctx.signals.cart;
    let loading = ctx.signals.cart_loading;
    let shipping = ctx.app().config().shipping;

    let app = ctx.app();
    spawn_local(async move {
        let _ = app.cart.load().await;
    });

    let clear = move |_| {
        let app = ctx.app();
        spawn_local(async move {
            let _ = app.cart.clear().await;
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">"Shopping cart"</h1>
                <Show when=move || loading.get()>
                    <span class="loading loading-spinner loading-sm"></span>
                </Show>
            </div>
            {move || match cart.get() {
                Some(c) if !c.is_empty() => {
                    let shipping_cost = shipping.quote(&c.subtotal);
                    view! {
                        <div class="overflow-x-auto">
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Product"</th>
                                        <th>"Price"</th>
                                        <th>"Quantity"</th>
                                        <th>"Subtotal"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {c.items
                                        .into_iter()
                                        .map(|item| view! { <CartRow item=item /> })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>
                        <div class="card bg-base-100 shadow-md max-w-sm ml-auto">
                            <div class="card-body">
                                <p class="flex justify-between">
                                    "Items" <span>{c.total_items}</span>
                                </p>
                                <p class="flex justify-between">
                                    "Subtotal" <span>{c.subtotal.to_string()}</span>
                                </p>
                                <p class="flex justify-between">
                                    "Shipping"
                                    <span>
                                        {if shipping_cost == 0 { "Free".to_string() } else { shipping_cost.to_string() }}
                                    </span>
                                </p>
                                <div class="card-actions justify-between mt-2">
                                    <button class="btn btn-ghost btn-sm" on:click=clear>"Clear cart"</button>
                                    <Link to=AppRoute::Checkout class="btn btn-primary">"Checkout"</Link>
                                </div>
                            </div>
                        </div>
                    }
                    .into_any()
                }
                _ => view! {
                    <div class="text-center p-8 space-y-4">
                        <p class="opacity-70">"Your cart is empty"</p>
                        <Link to=AppRoute::Products class="btn btn-primary">"Continue shopping"</Link>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
