use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::shared::RegisterForm;

use crate::context::use_app;
use crate::web::router::Link;

/// 登录页
///
/// 登录成功后由路由服务的认证监听跳转到 `redirect` 或首页。
#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if username.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let app = ctx.app();
        spawn_local(async move {
            let (user, pass) = (username.get_untracked(), password.get_untracked());
            if let Err(e) = app.auth.login(&user, &pass).await {
                set_error_msg.set(Some(e.user_message(&[], "Invalid username or password")));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Sign in"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            "No account yet? "
                            <Link to=AppRoute::Register class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

/// 注册页，成功后由服务跳转到登录页
#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app();
    let form = RwSignal::new(RegisterForm::default());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        let app = ctx.app();
        let form = form.get_untracked();
        spawn_local(async move {
            // 失败提示由服务统一展示
            let _ = app.auth.register(&form).await;
            set_is_submitting.set(false);
        });
    };

    let field = move |label: &'static str, kind: &'static str, set: fn(&mut RegisterForm, String)| {
        view! {
            <div class="form-control">
                <label class="label"><span class="label-text">{label}</span></label>
                <input
                    type=kind
                    class="input input-bordered"
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Create an account"</h1>
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {field("Username", "text", |f, v| f.username = v)}
                        {field("Email", "email", |f, v| f.email = v)}
                        {field("Phone number", "tel", |f, v| f.phone_number = v)}
                        {field("First name", "text", |f, v| f.first_name = v)}
                        {field("Last name", "text", |f, v| f.last_name = v)}
                        {field("Password", "password", |f, v| f.password = v)}
                        {field("Confirm password", "password", |f, v| f.password_confirm = v)}
                        <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                            "Register"
                        </button>
                        <p class="text-sm text-center">
                            "Already registered? "
                            <Link to={AppRoute::Login { redirect: None }} class="link link-primary">
                                "Sign in"
                            </Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
