use std::fmt;
use std::fmt::Display;
use std::sync::Arc;

use dashmap::DashMap;
use lazy_static::lazy_static;

/// Instance-dispatched operation. Receives the class the receiver was
/// dispatched through, the receiver itself and the prospective parent.
/// The class handle allows an operation body to call back by name.
pub type InstanceFn<V> = Arc<dyn Fn(&Class<V>, &mut V, Option<&V>) + Send + Sync>;

/// Class-dispatched operation.
pub type ClassFn<V> = Arc<dyn Fn(&Class<V>) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchKind {
    Instance,
    Class,
}

impl Display for DispatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchKind::Instance => write!(f, "instance"),
            DispatchKind::Class => write!(f, "class"),
        }
    }
}

/// Record of one installed rewiring. Lives for the process lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interception {
    pub class: &'static str,
    pub original: String,
    pub replacement: String,
    pub kind: DispatchKind,
}

// Keyed by class object identity, not class name; two classes sharing a
// name keep separate records.
lazy_static! {
    static ref INTERCEPTIONS: DashMap<(usize, String), Interception> = DashMap::new();
}

/// Snapshot of every rewiring performed through [`Class::swap`].
#[must_use]
pub fn installed_interceptions() -> Vec<Interception> {
    INTERCEPTIONS.iter().map(|entry| entry.value().clone()).collect()
}

/// Named operation table over view type `V`, with inherited resolution
/// through an optional parent class. Operations registered here stay for
/// the lifetime of the class object.
pub struct Class<V> {
    name: &'static str,
    parent: Option<Arc<Class<V>>>,
    instance_ops: DashMap<String, InstanceFn<V>>,
    class_ops: DashMap<String, ClassFn<V>>,
}

impl<V> fmt::Debug for Class<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name))
            .field("instance_ops", &self.instance_ops.len())
            .field("class_ops", &self.class_ops.len())
            .finish()
    }
}

impl<V> Class<V> {
    #[must_use]
    pub fn root(name: &'static str) -> Arc<Self> {
        Arc::new(Class {
            name,
            parent: None,
            instance_ops: DashMap::new(),
            class_ops: DashMap::new(),
        })
    }

    #[must_use]
    pub fn subclass(name: &'static str, parent: &Arc<Self>) -> Arc<Self> {
        Arc::new(Class {
            name,
            parent: Some(Arc::clone(parent)),
            instance_ops: DashMap::new(),
            class_ops: DashMap::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// # Panics
    /// Panics if `name` is already defined directly on this class.
    pub fn define_instance<F>(&self, name: &str, f: F)
    where
        F: Fn(&Class<V>, &mut V, Option<&V>) + Send + Sync + 'static,
    {
        assert!(
            self.instance_ops.insert(name.to_string(), Arc::new(f)).is_none(),
            "Operation already defined on class {}: {name}",
            self.name
        );
    }

    /// # Panics
    /// Panics if `name` is already defined directly on this class.
    pub fn define_class<F>(&self, name: &str, f: F)
    where
        F: Fn(&Class<V>) + Send + Sync + 'static,
    {
        assert!(
            self.class_ops.insert(name.to_string(), Arc::new(f)).is_none(),
            "Operation already defined on class {}: {name}",
            self.name
        );
    }

    fn resolve_instance(&self, name: &str) -> Option<InstanceFn<V>> {
        if let Some(op) = self.instance_ops.get(name) {
            return Some(Arc::clone(&op));
        }

        self.parent.as_ref().and_then(|p| p.resolve_instance(name))
    }

    fn resolve_class(&self, name: &str) -> Option<ClassFn<V>> {
        if let Some(op) = self.class_ops.get(name) {
            return Some(Arc::clone(&op));
        }

        self.parent.as_ref().and_then(|p| p.resolve_class(name))
    }

    #[must_use]
    pub fn responds_to(&self, name: &str, kind: DispatchKind) -> bool {
        match kind {
            DispatchKind::Instance => self.resolve_instance(name).is_some(),
            DispatchKind::Class => self.resolve_class(name).is_some(),
        }
    }

    /// Invokes the instance operation `name` on `view`, resolving through
    /// the parent chain. An operation invoked on a subclass re-resolves
    /// by-name calls from the subclass, not from the defining class.
    ///
    /// # Panics
    /// Panics if `name` does not resolve on this class or any ancestor.
    pub fn send(&self, view: &mut V, name: &str, new_parent: Option<&V>) {
        let Some(op) = self.resolve_instance(name) else {
            panic!("No instance operation '{name}' on class {}", self.name);
        };

        op(self, view, new_parent);
    }

    /// # Panics
    /// Panics if `name` does not resolve on this class or any ancestor.
    pub fn send_class(&self, name: &str) {
        let Some(op) = self.resolve_class(name) else {
            panic!("No class operation '{name}' on class {}", self.name);
        };

        op(self);
    }

    /// Rewires dispatch so `original` executes the replacement's body and
    /// `replacement` executes the original implementation. An original that
    /// is only inherited gets shadowed on this class; the parent table is
    /// never touched. Not reversible, and a second swap of the same pair
    /// double-swaps. Call sites guard with [`once`](crate::once::once).
    ///
    /// # Panics
    /// Panics if either name fails to resolve. This is a fatal
    /// misconfiguration, not a recoverable condition.
    pub fn swap(&self, original: &str, replacement: &str, kind: DispatchKind) {
        match kind {
            DispatchKind::Instance => {
                let original_impl = self.resolve_instance(original).unwrap_or_else(|| {
                    panic!("Cannot swap unknown instance operation '{original}' on class {}", self.name)
                });
                let replacement_impl = self.resolve_instance(replacement).unwrap_or_else(|| {
                    panic!("Cannot swap unknown instance operation '{replacement}' on class {}", self.name)
                });

                if self.instance_ops.contains_key(original) {
                    log::debug!("{}: exchanged '{original}' and '{replacement}'", self.name);
                } else {
                    log::debug!("{}: bound inherited '{original}' through '{replacement}'", self.name);
                }

                self.instance_ops.insert(original.to_string(), replacement_impl);
                self.instance_ops.insert(replacement.to_string(), original_impl);
            }
            DispatchKind::Class => {
                let original_impl = self.resolve_class(original).unwrap_or_else(|| {
                    panic!("Cannot swap unknown class operation '{original}' on class {}", self.name)
                });
                let replacement_impl = self.resolve_class(replacement).unwrap_or_else(|| {
                    panic!("Cannot swap unknown class operation '{replacement}' on class {}", self.name)
                });

                if self.class_ops.contains_key(original) {
                    log::debug!("{}: exchanged '{original}' and '{replacement}'", self.name);
                } else {
                    log::debug!("{}: bound inherited '{original}' through '{replacement}'", self.name);
                }

                self.class_ops.insert(original.to_string(), replacement_impl);
                self.class_ops.insert(replacement.to_string(), original_impl);
            }
        }

        INTERCEPTIONS.insert(
            (self as *const Self as usize, original.to_string()),
            Interception {
                class: self.name,
                original: original.to_string(),
                replacement: replacement.to_string(),
                kind,
            },
        );
    }
}
