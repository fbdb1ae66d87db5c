//! 应用上下文
//!
//! `Storefront` 在启动时构造一次，放进 context。
//! 核心库的 Store 通过订阅桥接为 leptos 信号，组件只读信号、只调服务。

use std::collections::BTreeSet;
use std::rc::Rc;

use leptos::prelude::*;
use storefront::shared::{Cart, User, Wishlist};
use storefront::store::PanelState;
use storefront::{Storefront, Stores};

/// Store 状态的信号镜像
#[derive(Clone, Copy)]
pub struct StoreSignals {
    pub user: RwSignal<Option<User>>,
    pub cart: RwSignal<Option<Cart>>,
    pub cart_loading: RwSignal<bool>,
    pub updating: RwSignal<BTreeSet<u64>>,
    pub wishlist: RwSignal<Option<Wishlist>>,
    pub panels: RwSignal<PanelState>,
}

impl StoreSignals {
    /// 用当前值初始化信号，之后每次 Store 变化都整体写入
    fn bridge(stores: &Stores) -> Self {
        let signals = Self {
            user: RwSignal::new(stores.session.user()),
            cart: RwSignal::new(stores.cart.get()),
            cart_loading: RwSignal::new(stores.cart.is_loading()),
            updating: RwSignal::new(stores.cart.updating_items()),
            wishlist: RwSignal::new(stores.wishlist.get()),
            panels: RwSignal::new(stores.ui.state()),
        };

        let session = stores.session.clone();
        stores
            .session
            .subscribe(move || signals.user.set(session.user()));

        let cart = stores.cart.clone();
        stores.cart.subscribe(move || {
            signals.cart.set(cart.get());
            signals.cart_loading.set(cart.is_loading());
        });

        let cart = stores.cart.clone();
        stores
            .cart
            .subscribe_updating(move || signals.updating.set(cart.updating_items()));

        let wishlist = stores.wishlist.clone();
        stores
            .wishlist
            .subscribe(move || signals.wishlist.set(wishlist.get()));

        let ui = stores.ui.clone();
        stores.ui.subscribe(move || signals.panels.set(ui.state()));

        signals
    }
}

/// 通过 Context 在组件间共享
#[derive(Clone, Copy)]
pub struct AppContext {
    app: StoredValue<Rc<Storefront>, LocalStorage>,
    pub signals: StoreSignals,
}

impl AppContext {
    pub fn new(app: Storefront) -> Self {
        let signals = StoreSignals::bridge(&app.stores);
        Self {
            app: StoredValue::new_local(Rc::new(app)),
            signals,
        }
    }

    pub fn app(&self) -> Rc<Storefront> {
        self.app.get_value()
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let user = self.signals.user;
        Signal::derive(move || user.with(Option::is_some))
    }

    pub fn cart_count(&self) -> Signal<u32> {
        let cart = self.signals.cart;
        Signal::derive(move || cart.with(|c| c.as_ref().map(|c| c.total_items).unwrap_or(0)))
    }

    pub fn wishlist_count(&self) -> Signal<usize> {
        let wishlist = self.signals.wishlist;
        Signal::derive(move || wishlist.with(|w| w.as_ref().map(Wishlist::len).unwrap_or(0)))
    }

    pub fn in_wishlist(&self, product_id: u64) -> Signal<bool> {
        let wishlist = self.signals.wishlist;
        Signal::derive(move || {
            wishlist.with(|w| w.as_ref().is_some_and(|w| w.contains(product_id)))
        })
    }
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
