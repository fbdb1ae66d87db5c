use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::shared::{Order, OrderStatus};

use crate::context::use_app;
use crate::web::router::Link;

fn status_badge(status: &OrderStatus) -> impl IntoView + use<> {
    let class = match status {
        OrderStatus::Delivered => "badge badge-success",
        OrderStatus::Shipped | OrderStatus::Processing => "badge badge-info",
        OrderStatus::Cancelled | OrderStatus::Refunded => "badge badge-error",
        OrderStatus::Pending | OrderStatus::Other => "badge badge-warning",
    };
    view! { <span class=class>{status.label()}</span> }
}

fn order_date(order: &Order) -> String {
    order
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// 订单列表
#[component]
pub fn OrdersPage() -> impl IntoView {
    let ctx = use_app();
    let orders = RwSignal::new(Option::<Vec<Order>>::None);

    let app = ctx.app();
    spawn_local(async move {
        match app.orders.list().await {
            Ok(page) => orders.set(Some(page.items)),
            Err(_) => orders.set(Some(Vec::new())),
        }
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">"My orders"</h1>
            {move || match orders.get() {
                None => view! { <span class="loading loading-spinner loading-lg"></span> }.into_any(),
                Some(list) if list.is_empty() => {
                    view! { <p class="opacity-70">"You have no orders yet"</p> }.into_any()
                }
                Some(list) => view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Order"</th>
                                <th>"Date"</th>
                                <th>"Status"</th>
                                <th>"Total"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|order| view! {
                                    <tr>
                                        <td>
                                            <Link to={AppRoute::Order(order.id)} class="link">
                                                {order.order_number.clone()}
                                            </Link>
                                        </td>
                                        <td>{order_date(&order)}</td>
                                        <td>{status_badge(&order.status)}</td>
                                        <td>{order.total.to_string()}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any(),
            }}
        </div>
    }
}

/// 订单详情
#[component]
pub fn OrderDetailPage(id: u64) -> impl IntoView {
    let ctx = use_app();
    let order = RwSignal::new(Option::<Order>::None);
    let (missing, set_missing) = signal(false);

    let app = ctx.app();
    spawn_local(async move {
        match app.orders.get(id).await {
            Ok(o) => order.set(Some(o)),
            Err(e) => {
                log::warn!("[Orders] Order {} failed: {}", id, e);
                set_missing.set(true);
            }
        }
    });

    view! {
        {move || match order.get() {
            None if missing.get() => view! {
                <div class="text-center p-8 space-y-4">
                    <p>"Order not found"</p>
                    <Link to=AppRoute::Orders class="btn">"Back to orders"</Link>
                </div>
            }
            .into_any(),
            None => view! { <span class="loading loading-spinner loading-lg"></span> }.into_any(),
            Some(o) => view! {
                <div class="space-y-4">
                    <div class="flex items-center gap-4">
                        <h1 class="text-2xl font-bold">"Order " {o.order_number.clone()}</h1>
                        {status_badge(&o.status)}
                        <span class="opacity-70">{order_date(&o)}</span>
                    </div>
                    <div class="grid md:grid-cols-2 gap-4">
                        <div class="card bg-base-100 shadow-md">
                            <div class="card-body">
                                <h2 class="card-title">"Shipping"</h2>
                                <p>{o.shipping_name.clone()}</p>
                                <p>{o.shipping_address.clone()}</p>
                                <p>{format!("{} {} {}", o.shipping_city, o.shipping_state, o.shipping_postal_code)}</p>
                                <p>{o.shipping_phone.clone()}</p>
                                {o.tracking_number.clone().map(|t| view! { <p>"Tracking: " {t}</p> })}
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow-md">
                            <div class="card-body">
                                <h2 class="card-title">"Payment"</h2>
                                <p>{if o.is_paid { "Paid" } else { "Not paid" }}</p>
                                <p class="flex justify-between">"Subtotal" <span>{o.subtotal.to_string()}</span></p>
                                <p class="flex justify-between">"Shipping" <span>{o.shipping_cost.to_string()}</span></p>
                                <p class="flex justify-between">"Tax" <span>{o.tax.to_string()}</span></p>
                                <p class="flex justify-between">"Discount" <span>{o.discount.to_string()}</span></p>
                                <p class="flex justify-between font-bold">"Total" <span>{o.total.to_string()}</span></p>
                            </div>
                        </div>
                    </div>
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Product"</th>
                                <th>"Unit price"</th>
                                <th>"Quantity"</th>
                                <th>"Subtotal"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {o.items
                                .iter()
                                .map(|item| view! {
                                    <tr>
                                        <td>{item.product_name.clone()}</td>
                                        <td>{item.unit_price.to_string()}</td>
                                        <td>{item.quantity}</td>
                                        <td>{item.subtotal.to_string()}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            }
            .into_any(),
        }}
    }
}
