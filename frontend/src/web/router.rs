//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 守卫规则来自核心库的 `AppRoute::guard`，这里只负责
//! "监听 -> 验证 -> 处理 -> 加载" 的导航流程。

use leptos::prelude::*;
use storefront::AppRoute;
use wasm_bindgen::prelude::*;

use super::navigator::{current_location, push_and_notify};

/// 替换 History 状态（重定向时使用，不留下历史记录）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 对目标路由执行守卫，返回最终应该展示的路由
fn resolve(target: AppRoute, is_auth: bool) -> AppRoute {
    match target.guard(is_auth) {
        Some(redirect) => {
            log::info!("[Router] {} -> {}", target, redirect);
            replace_history_state(&redirect.to_path());
            redirect
        }
        None => target,
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新，认证状态以信号形式注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial = resolve(
            AppRoute::from_path(&current_location()),
            is_authenticated.get_untracked(),
        );
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 站内导航：推入历史记录，由 popstate 监听统一守卫并加载
    pub fn navigate(&self, route: &AppRoute) {
        push_and_notify(&route.to_path());
    }

    /// 浏览器后退/前进，以及 `push_and_notify` 派发的事件
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_location());
            set_route.set(resolve(target, is_authenticated.get_untracked()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器与页面同寿命
        closure.forget();
    }

    /// 登录 / 登出后重新对当前路由执行守卫
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            if let Some(redirect) = route.guard(is_auth) {
                log::info!("[Router] Auth state changed, {} -> {}", route, redirect);
                replace_history_state(&redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// 根据当前路由渲染对应的页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接：拦截点击，交给路由服务导航
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.to_path();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&to);
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
