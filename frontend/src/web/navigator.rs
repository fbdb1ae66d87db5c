//! 核心库 `Navigator` 的浏览器实现

use storefront::{AppRoute, Navigator};
use wasm_bindgen::JsValue;

/// 当前浏览器路径（包含查询串）
pub fn current_location() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{}{}", path, search)
}

/// 读取当前地址的查询参数（支付网关回跳、搜索词）
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(name)
        .filter(|v| !v.is_empty())
}

/// 推送 History 状态后派发 `popstate`，由路由服务统一做守卫和渲染
pub fn push_and_notify(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Ok(history) = window.history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
    if let Ok(event) = web_sys::Event::new("popstate") {
        let _ = window.dispatch_event(&event);
    }
}

/// 服务层发起的跳转（登录过期、结算完成等）
#[derive(Clone, Copy, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn current(&self) -> AppRoute {
        AppRoute::from_path(&current_location())
    }

    fn redirect(&self, route: &AppRoute) {
        log::debug!("[Navigator] -> {}", route);
        push_and_notify(&route.to_path());
    }

    /// 站外地址整页跳转
    fn open_external(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(url).is_err() {
                log::warn!("[Navigator] Failed to open {}", url);
            }
        }
    }
}
