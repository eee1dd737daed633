use std::sync::Arc;

use crate::dispatch::{Class, DispatchKind};
use crate::once::once;

/// Lifecycle operation intercepted for shared styling. The host framework
/// invokes it every time a view is about to be attached to a parent.
pub const WILL_ATTACH: &str = "will_attach_to_parent";

/// Token guarding the one-time installation of the interception.
pub const INIT_TOKEN: &str = "init.viewstyles";

const HOOK_PREFIX: &str = "tailor";

/// Per-instance styling surface. The applied flag and the participation
/// flag are fields of the view's own type; application code owns both.
pub trait Styleable {
    type Style: Clone;

    fn participates_in_runtime_styling(&self) -> bool;
    fn styles_applied(&self) -> bool;
    fn set_styles_applied(&mut self, applied: bool);
    fn explicit_style(&self) -> Option<Self::Style>;
    fn apply_style(&mut self, style: Self::Style);
}

/// External owner of style definitions and lookup.
pub trait SharedStyleSource<V> {
    /// Returns whether a registered shared style was found and applied.
    fn apply_shared(&self, view: &mut V) -> bool;
}

/// Installs the shared-style interception on `class` at most once per
/// process, guarded by [`INIT_TOKEN`]. Subclasses of `class` inherit the
/// interception through operation resolution.
///
/// # Panics
/// Panics if `class` has no resolvable [`WILL_ATTACH`] operation.
pub fn install<V>(class: &Class<V>, registry: Arc<dyn SharedStyleSource<V> + Send + Sync>)
where
    V: Styleable + 'static,
{
    install_with_token(INIT_TOKEN, class, registry);
}

/// Same as [`install`] with a caller-chosen token. One watched root class
/// per token; a second call with a consumed token is skipped entirely.
pub fn install_with_token<V>(token: &str, class: &Class<V>, registry: Arc<dyn SharedStyleSource<V> + Send + Sync>)
where
    V: Styleable + 'static,
{
    once(token, || install_interception(class, registry));
}

fn install_interception<V>(class: &Class<V>, registry: Arc<dyn SharedStyleSource<V> + Send + Sync>)
where
    V: Styleable + 'static,
{
    let hook_name = format!("{HOOK_PREFIX}_{WILL_ATTACH}");
    let by_name = hook_name.clone();

    class.define_instance(&hook_name, move |cls, view, new_parent| {
        // After the swap this name resolves to the true original
        // implementation. Base behavior runs unconditionally, first.
        cls.send(view, &by_name, new_parent);

        // Participation is re-checked fresh on every attach call.
        if !view.participates_in_runtime_styling() {
            return;
        }

        // The registry is consulted before the applied flag is read; a
        // later successful lookup is ignored once the flag is set.
        if !registry.apply_shared(view) || view.styles_applied() {
            return;
        }

        view.set_styles_applied(true);

        // Explicit per-instance styling is re-asserted after shared styling.
        if let Some(style) = view.explicit_style() {
            view.apply_style(style);
        }
    });

    class.swap(WILL_ATTACH, &hook_name, DispatchKind::Instance);

    log::info!("Shared style interception installed on {}", class.name());
}
