use std::cell::Cell;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use storefront::{Notice, NoticeLevel, Notifier};

/// 提示自动消失的时间
const TOAST_MILLIS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    notice: Notice,
}

/// 核心库 `Notifier` 的实现：写入 toast 队列，3 秒后移除
pub struct ToastNotifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: Cell<u64>,
}

impl ToastNotifier {
    pub fn new(toasts: RwSignal<Vec<Toast>>) -> Self {
        Self {
            toasts,
            next_id: Cell::new(0),
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        if notice.is_error() {
            log::warn!("[Toast] {}", notice.message);
        }
        self.toasts.update(|list| list.push(Toast { id, notice }));

        let toasts = self.toasts;
        Timeout::new(TOAST_MILLIS, move || {
            toasts.update(|list| list.retain(|t| t.id != id));
        })
        .forget();
    }
}

#[component]
pub fn ToastOutlet(toasts: RwSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toast toast-top toast-end z-50">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let class = match toast.notice.level {
                            NoticeLevel::Success => "alert alert-success shadow-lg",
                            NoticeLevel::Info => "alert alert-info shadow-lg",
                            NoticeLevel::Error => "alert alert-error shadow-lg",
                        };
                        view! {
                            <div class=class>
                                <span>{toast.notice.message}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
