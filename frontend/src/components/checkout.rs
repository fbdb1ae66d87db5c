use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::shared::{Address, CheckoutForm, PaymentGateway};

use crate::context::use_app;

const GATEWAYS: [PaymentGateway; 4] = [
    PaymentGateway::Zarinpal,
    PaymentGateway::Paypint,
    PaymentGateway::Saman,
    PaymentGateway::Mellat,
];

fn gateway_from_str(value: &str) -> PaymentGateway {
    GATEWAYS
        .into_iter()
        .find(|g| g.as_str() == value)
        .unwrap_or_default()
}

/// 用已保存的地址填充收货信息，姓名保持不变
fn apply_address(form: &mut CheckoutForm, address: &Address) {
    form.shipping_address = address.address.clone();
    form.shipping_city = address.city.clone();
    form.shipping_state = address.state.clone();
    form.shipping_postal_code = address.postal_code.clone();
    form.shipping_phone = address.phone_number.clone();
}

/// 结算页
///
/// 提交后由订单服务完成下单和支付发起，成功时浏览器整页跳转到支付网关。
#[component]
pub fn CheckoutPage() -> impl IntoView {
    let ctx = use_app();
    let cart = ctx.signals.cart;
    let shipping = ctx.app().config().shipping;

    let initial = ctx
        .signals
        .user
        .with_untracked(|u| {
            u.as_ref().map(|u| CheckoutForm {
                shipping_name: u.display_name(),
                shipping_address: u.address.clone().unwrap_or_default(),
                shipping_city: u.city.clone().unwrap_or_default(),
                shipping_postal_code: u.postal_code.clone().unwrap_or_default(),
                shipping_phone: u.phone_number.clone().unwrap_or_default(),
                ..Default::default()
            })
        })
        .unwrap_or_default();
    let form = RwSignal::new(initial);
    let addresses = RwSignal::new(Vec::<Address>::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let app = ctx.app();
    spawn_local(async move {
        let _ = app.cart.load().await;
        if let Ok(list) = app.account.addresses().await {
            if let Some(default) = list.iter().find(|a| a.is_default) {
                form.update(|f| apply_address(f, default));
            }
            addresses.set(list);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        let app = ctx.app();
        let form = form.get_untracked();
        spawn_local(async move {
            // 成功时页面已跳走，失败提示由服务展示
            let _ = app.orders.checkout(&form).await;
            set_is_submitting.set(false);
        });
    };

    let field = move |label: &'static str,
                      get: fn(&CheckoutForm) -> String,
                      set: fn(&mut CheckoutForm, String)| {
        view! {
            <div class="form-control">
                <label class="label"><span class="label-text">{label}</span></label>
                <input
                    type="text"
                    class="input input-bordered"
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                    required
                />
            </div>
        }
    };

    let summary = move || {
        cart.get().map(|c| {
            let shipping_cost = shipping.quote(&c.subtotal);
            let total = c
                .subtotal
                .whole_units()
                .map(|subtotal| (subtotal + shipping_cost).to_string())
                .unwrap_or_else(|| c.subtotal.to_string());
            view! {
                <ul class="space-y-1">
                    {c.items
                        .iter()
                        .map(|item| view! {
                            <li class="flex justify-between text-sm">
                                <span>{item.product_detail.name.clone()} " × " {item.quantity}</span>
                                <span>{item.subtotal.to_string()}</span>
                            </li>
                        })
                        .collect_view()}
                </ul>
                <div class="divider my-1"></div>
                <p class="flex justify-between">"Subtotal" <span>{c.subtotal.to_string()}</span></p>
                <p class="flex justify-between">"Shipping" <span>{shipping_cost}</span></p>
                <p class="flex justify-between font-bold">"Total" <span>{total}</span></p>
            }
        })
    };

    view! {
        <div class="grid md:grid-cols-3 gap-6">
            <form class="md:col-span-2 card bg-base-100 shadow-md" on:submit=on_submit>
                <div class="card-body">
                    <h1 class="card-title">"Shipping details"</h1>
                    <Show when=move || addresses.with(|a| !a.is_empty())>
                        <select
                            class="select select-bordered"
                            on:change=move |ev| {
                                let id = event_target_value(&ev).parse::<u64>().ok();
                                let chosen = addresses
                                    .with_untracked(|list| list.iter().find(|a| Some(a.id) == id).cloned());
                                if let Some(address) = chosen {
                                    form.update(|f| apply_address(f, &address));
                                }
                            }
                        >
                            <option value="">"Use a saved address..."</option>
                            {move || addresses.get().into_iter().map(|a| view! {
                                <option value=a.id.to_string()>{a.title}</option>
                            }).collect_view()}
                        </select>
                    </Show>
                    {field("Full name", |f| f.shipping_name.clone(), |f, v| f.shipping_name = v)}
                    {field("Address", |f| f.shipping_address.clone(), |f, v| f.shipping_address = v)}
                    <div class="grid grid-cols-2 gap-2">
                        {field("City", |f| f.shipping_city.clone(), |f, v| f.shipping_city = v)}
                        {field("State", |f| f.shipping_state.clone(), |f, v| f.shipping_state = v)}
                        {field("Postal code", |f| f.shipping_postal_code.clone(), |f, v| f.shipping_postal_code = v)}
                        {field("Phone", |f| f.shipping_phone.clone(), |f, v| f.shipping_phone = v)}
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Notes"</span></label>
                        <textarea
                            class="textarea textarea-bordered"
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.notes = Some(value).filter(|v| !v.trim().is_empty()));
                            }
                        ></textarea>
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Payment method"</span></label>
                        <select
                            class="select select-bordered"
                            on:change=move |ev| {
                                let gateway = gateway_from_str(&event_target_value(&ev));
                                form.update(|f| f.payment_method = gateway);
                            }
                        >
                            {GATEWAYS
                                .into_iter()
                                .map(|g| view! { <option value=g.as_str()>{g.as_str()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() { "Placing order..." } else { "Place order and pay" }}
                    </button>
                </div>
            </form>
            <div class="card bg-base-100 shadow-md h-fit">
                <div class="card-body">
                    <h2 class="card-title">"Order summary"</h2>
                    {summary}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_from_str() {
        assert_eq!(gateway_from_str("saman"), PaymentGateway::Saman);
        assert_eq!(gateway_from_str("mellat"), PaymentGateway::Mellat);
        assert_eq!(gateway_from_str("unknown"), PaymentGateway::Zarinpal);
    }
}
