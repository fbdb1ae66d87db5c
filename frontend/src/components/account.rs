use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::shared::{Address, AddressForm, ProfileUpdate, User};

use crate::context::use_app;

// =========================================================
// 个人资料
// =========================================================

fn profile_from(user: Option<&User>) -> ProfileUpdate {
    let Some(u) = user else {
        return ProfileUpdate::default();
    };
    ProfileUpdate {
        first_name: Some(u.first_name.clone()),
        last_name: Some(u.last_name.clone()),
        email: Some(u.email.clone()),
        phone_number: u.phone_number.clone(),
        address: u.address.clone(),
        city: u.city.clone(),
        postal_code: u.postal_code.clone(),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app();
    let user = ctx.signals.user;
    let profile = RwSignal::new(user.with_untracked(|u| profile_from(u.as_ref())));

    // 资料可能在页面打开后才加载完成
    Effect::new(move |_| {
        user.with(|u| profile.set(profile_from(u.as_ref())));
    });

    let (saving, set_saving) = signal(false);
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_saving.set(true);
        let app = ctx.app();
        let update = profile.get_untracked();
        spawn_local(async move {
            let _ = app.auth.update_profile(&update).await;
            set_saving.set(false);
        });
    };

    let field = move |label: &'static str,
                      get: fn(&ProfileUpdate) -> Option<String>,
                      set: fn(&mut ProfileUpdate, Option<String>)| {
        view! {
            <div class="form-control">
                <label class="label"><span class="label-text">{label}</span></label>
                <input
                    type="text"
                    class="input input-bordered"
                    prop:value=move || profile.with(get).unwrap_or_default()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        profile.update(|p| set(p, Some(value)));
                    }
                />
            </div>
        }
    };

    view! {
        <div class="grid md:grid-cols-2 gap-6">
            <form class="card bg-base-100 shadow-md" on:submit=on_save>
                <div class="card-body">
                    <h1 class="card-title">
                        {move || user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default())}
                    </h1>
                    {field("First name", |p| p.first_name.clone(), |p, v| p.first_name = v)}
                    {field("Last name", |p| p.last_name.clone(), |p, v| p.last_name = v)}
                    {field("Email", |p| p.email.clone(), |p, v| p.email = v)}
                    {field("Phone number", |p| p.phone_number.clone(), |p, v| p.phone_number = v)}
                    {field("Address", |p| p.address.clone(), |p, v| p.address = v)}
                    {field("City", |p| p.city.clone(), |p, v| p.city = v)}
                    {field("Postal code", |p| p.postal_code.clone(), |p, v| p.postal_code = v)}
                    <button class="btn btn-primary mt-4" disabled=move || saving.get()>"Save profile"</button>
                </div>
            </form>
            <ChangePasswordForm />
        </div>
    }
}

#[component]
fn ChangePasswordForm() -> impl IntoView {
    let ctx = use_app();
    let (old, set_old) = signal(String::new());
    let (new, set_new) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        let app = ctx.app();
        let (o, n, c) = (old.get_untracked(), new.get_untracked(), confirm.get_untracked());
        spawn_local(async move {
            match app.auth.change_password(&o, &n, &c).await {
                Ok(()) => {
                    set_old.set(String::new());
                    set_new.set(String::new());
                    set_confirm.set(String::new());
                }
                Err(e) => set_error_msg.set(Some(e.user_message(
                    &["old_password", "new_password"],
                    "Failed to change password",
                ))),
            }
        });
    };

    view! {
        <form class="card bg-base-100 shadow-md h-fit" on:submit=on_submit>
            <div class="card-body">
                <h2 class="card-title">"Change password"</h2>
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        {move || error_msg.get().unwrap_or_default()}
                    </div>
                </Show>
                <input
                    type="password"
                    class="input input-bordered"
                    placeholder="Current password"
                    prop:value=old
                    on:input=move |ev| set_old.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    class="input input-bordered"
                    placeholder="New password"
                    prop:value=new
                    on:input=move |ev| set_new.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    class="input input-bordered"
                    placeholder="Confirm new password"
                    prop:value=confirm
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                <button class="btn btn-primary mt-2">"Change password"</button>
            </div>
        </form>
    }
}

// =========================================================
// 收货地址
// =========================================================

#[component]
pub fn AddressesPage() -> impl IntoView {
    let ctx = use_app();
    let addresses = RwSignal::new(Vec::<Address>::new());
    let form = RwSignal::new(AddressForm::default());
    let editing = RwSignal::new(Option::<u64>::None);

    let reload = move || {
        let app = ctx.app();
        spawn_local(async move {
            if let Ok(list) = app.account.addresses().await {
                addresses.set(list);
            }
        });
    };
    reload();

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let app = ctx.app();
        let id = editing.get_untracked();
        let data = form.get_untracked();
        spawn_local(async move {
            if app.account.save_address(id, &data).await.is_ok() {
                form.set(AddressForm::default());
                editing.set(None);
                reload();
            }
        });
    };

    let edit = move |a: &Address| {
        editing.set(Some(a.id));
        form.set(AddressForm {
            title: a.title.clone(),
            address: a.address.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            postal_code: a.postal_code.clone(),
            phone_number: a.phone_number.clone(),
            is_default: a.is_default,
        });
    };

    let delete = move |id: u64| {
        let app = ctx.app();
        spawn_local(async move {
            if app.account.delete_address(id).await.is_ok() {
                reload();
            }
        });
    };

    let make_default = move |id: u64| {
        let app = ctx.app();
        spawn_local(async move {
            if app.account.set_default_address(id).await.is_ok() {
                reload();
            }
        });
    };

    let field = move |label: &'static str,
                      get: fn(&AddressForm) -> String,
                      set: fn(&mut AddressForm, String)| {
        view! {
            <input
                type="text"
                class="input input-bordered"
                placeholder=label
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
                required
            />
        }
    };

    view! {
        <div class="grid md:grid-cols-2 gap-6">
            <div class="space-y-2">
                <h1 class="text-2xl font-bold">"Addresses"</h1>
                {move || addresses.get().into_iter().map(|a| {
                    let id = a.id;
                    let is_default = a.is_default;
                    let current = a.clone();
                    view! {
                        <div class="card bg-base-100 shadow-sm">
                            <div class="card-body p-4">
                                <h2 class="card-title text-base">
                                    {a.title}
                                    <Show when=move || is_default>
                                        <span class="badge badge-primary">"Default"</span>
                                    </Show>
                                </h2>
                                <p>{format!("{}, {} {}", a.address, a.city, a.postal_code)}</p>
                                <p class="text-sm opacity-70">{a.phone_number}</p>
                                <div class="card-actions justify-end">
                                    <button class="btn btn-ghost btn-xs" on:click=move |_| edit(&current)>"Edit"</button>
                                    <Show when=move || !is_default>
                                        <button class="btn btn-ghost btn-xs" on:click=move |_| make_default(id)>"Set default"</button>
                                    </Show>
                                    <button class="btn btn-ghost btn-xs text-error" on:click=move |_| delete(id)>"Delete"</button>
                                </div>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
            <form class="card bg-base-100 shadow-md h-fit" on:submit=on_save>
                <div class="card-body">
                    <h2 class="card-title">
                        {move || if editing.get().is_some() { "Edit address" } else { "New address" }}
                    </h2>
                    {field("Title", |f| f.title.clone(), |f, v| f.title = v)}
                    {field("Address", |f| f.address.clone(), |f, v| f.address = v)}
                    {field("City", |f| f.city.clone(), |f, v| f.city = v)}
                    {field("State", |f| f.state.clone(), |f, v| f.state = v)}
                    {field("Postal code", |f| f.postal_code.clone(), |f, v| f.postal_code = v)}
                    {field("Phone number", |f| f.phone_number.clone(), |f, v| f.phone_number = v)}
                    <label class="label cursor-pointer justify-start gap-2">
                        <input
                            type="checkbox"
                            class="checkbox"
                            prop:checked=move || form.with(|f| f.is_default)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| f.is_default = checked);
                            }
                        />
                        <span class="label-text">"Use as default"</span>
                    </label>
                    <div class="card-actions justify-end">
                        <Show when=move || editing.get().is_some()>
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| {
                                    editing.set(None);
                                    form.set(AddressForm::default());
                                }
                            >
                                "Cancel"
                            </button>
                        </Show>
                        <button class="btn btn-primary">"Save"</button>
                    </div>
                </div>
            </form>
        </div>
    }
}
