//! 浏览器持久化：LocalStorage (gloo-storage) 与 Cookie 凭据

use gloo_storage::{LocalStorage as Local, Storage};
use serde_json::Value;
use storefront::shared::{
    ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_TTL_DAYS, REFRESH_TOKEN_COOKIE, REFRESH_TOKEN_TTL_DAYS,
};
use storefront::{CredentialStore, Persistence};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// 会话快照的 LocalStorage 持久化
///
/// 值按 JSON 存取，读到无法解析的内容时视为不存在。
#[derive(Clone, Copy, Default)]
pub struct LocalStorage;

impl Persistence for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Local::get::<Value>(key).ok().map(|v| v.to_string())
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match serde_json::from_str::<Value>(value) {
            Ok(json) => Local::set(key, json).is_ok(),
            Err(e) => {
                log::warn!("[Storage] Refusing non-JSON value for {}: {}", key, e);
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        Local::delete(key);
        true
    }
}

// =========================================================
// Cookie 凭据
// =========================================================

const DAY_SECONDS: u32 = 24 * 60 * 60;
const ACCESS_MAX_AGE: u32 = ACCESS_TOKEN_TTL_DAYS * DAY_SECONDS;
const REFRESH_MAX_AGE: u32 = REFRESH_TOKEN_TTL_DAYS * DAY_SECONDS;

fn document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

fn read_cookie(name: &str) -> Option<String> {
    let cookies = document()?.cookie().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

fn write_cookie(name: &str, value: &str, max_age: u32) {
    let Some(doc) = document() else {
        return;
    };
    let cookie = format!("{}={}; path=/; max-age={}; SameSite=Lax", name, value, max_age);
    if doc.set_cookie(&cookie).is_err() {
        log::warn!("[Storage] Failed to write cookie {}", name);
    }
}

/// Bearer 令牌保存在 Cookie 中，访问令牌 7 天、刷新令牌 30 天
#[derive(Clone, Copy, Default)]
pub struct CookieCredentials;

impl CredentialStore for CookieCredentials {
    fn access_token(&self) -> Option<String> {
        read_cookie(ACCESS_TOKEN_COOKIE)
    }

    fn refresh_token(&self) -> Option<String> {
        read_cookie(REFRESH_TOKEN_COOKIE)
    }

    fn store_access(&self, access: &str) {
        write_cookie(ACCESS_TOKEN_COOKIE, access, ACCESS_MAX_AGE);
    }

    fn store_refresh(&self, refresh: &str) {
        write_cookie(REFRESH_TOKEN_COOKIE, refresh, REFRESH_MAX_AGE);
    }

    fn clear(&self) {
        write_cookie(ACCESS_TOKEN_COOKIE, "", 0);
        write_cookie(REFRESH_TOKEN_COOKIE, "", 0);
    }
}
