use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::shared::{Payment, PaymentStatus};

use crate::context::use_app;
use crate::web::navigator::query_param;
use crate::web::router::Link;

#[derive(Clone)]
enum Verification {
    Pending,
    Done(Payment),
    Failed(String),
}

/// 支付网关回跳页，按 `Authority` / `Status` 参数向后端确认支付
#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    let ctx = use_app();
    let state = RwSignal::new(Verification::Pending);

    let authority = query_param("Authority");
    let status = query_param("Status");
    let app = ctx.app();
    spawn_local(async move {
        let result = app
            .orders
            .verify_payment(authority.as_deref(), status.as_deref())
            .await;
        state.set(match result {
            Ok(payment) => Verification::Done(payment),
            Err(e) => Verification::Failed(e.user_message(&[], "Payment verification failed")),
        });
    });

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                {move || match state.get() {
                    Verification::Pending => view! {
                        <div class="space-y-2">
                            <span class="loading loading-spinner loading-lg"></span>
                            <p>"Verifying your payment..."</p>
                        </div>
                    }
                    .into_any(),
                    Verification::Done(p) if p.status == PaymentStatus::Completed => view! {
                        <div class="space-y-4">
                            <h1 class="text-3xl font-bold text-success">"Payment successful"</h1>
                            <p>"Order " {p.order_number.clone()}</p>
                            {p.ref_id.clone().map(|r| view! { <p>"Reference: " {r}</p> })}
                            <Link to={AppRoute::Order(p.order)} class="btn btn-primary">"View order"</Link>
                        </div>
                    }
                    .into_any(),
                    Verification::Done(p) => view! {
                        <div class="space-y-4">
                            <h1 class="text-3xl font-bold text-error">"Payment not completed"</h1>
                            <p>"Order " {p.order_number.clone()}</p>
                            <Link to=AppRoute::Orders class="btn">"My orders"</Link>
                        </div>
                    }
                    .into_any(),
                    Verification::Failed(message) => view! {
                        <div class="space-y-4">
                            <h1 class="text-3xl font-bold text-error">"Payment verification failed"</h1>
                            <p>{message}</p>
                            <Link to=AppRoute::Orders class="btn">"My orders"</Link>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}

/// 支付失败页，网关在 `error` 参数中给出原因
#[component]
pub fn PaymentFailedPage() -> impl IntoView {
    let reason = query_param("error")
        .unwrap_or_else(|| "The payment was cancelled or declined".to_string());
    let order_id = query_param("order_id").and_then(|id| id.parse::<u64>().ok());

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="space-y-4">
                    <h1 class="text-3xl font-bold text-error">"Payment failed"</h1>
                    <p>{reason}</p>
                    {order_id.map(|id| view! {
                        <Link to={AppRoute::Order(id)} class="btn btn-primary">"View order"</Link>
                    })}
                    <Link to=AppRoute::Cart class="btn">"Back to cart"</Link>
                </div>
            </div>
        </div>
    }
}
