//! Scoped context properties attached to log events
//!
//! This module provides:
//! - `FieldValue`: value type stored under a property key
//! - `GlobalContext`: process-wide properties shared by every caller
//! - `CallContext`: properties confined to one logical call or task
//! - `ContextStore`: scope-addressed set/clear that hands back the prior value
//! - `ContextGuard`: RAII guard restoring the prior value on drop

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Property map captured into a log event
pub type Properties = HashMap<String, FieldValue>;

/// Value type for context properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Integer view, used by appenders that read numeric properties
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Lifetime domain of a context property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextScope {
    /// Visible to every caller of the owning repository
    Global,
    /// Visible only inside the logical call that set it
    ///
    /// Outside [`CallContext::scope`], [`CallContext::enter`] or
    /// [`CallContext::instrument`], the call is the whole OS thread. Async
    /// tasks that are not instrumented share that carrier with every other
    /// task polled on the same worker, so a value set before an `.await` can
    /// be seen, and cleared, by them.
    CallScoped,
}

/// Process-wide properties
///
/// Thread-safe: writes take an exclusive lock, snapshots take a shared one so
/// concurrent emitters never block each other.
///
/// # Example
///
/// ```
/// use connector_logging::core::GlobalContext;
///
/// let ctx = GlobalContext::new();
/// assert_eq!(ctx.set("service", "connector"), None);
/// assert_eq!(ctx.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GlobalContext {
    fields: Arc<RwLock<Properties>>,
}

impl GlobalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, returning the value it replaced
    pub fn set<K, V>(&self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.write().insert(key.into(), value.into())
    }

    /// Remove a property, returning the value it held
    pub fn remove(&self, key: &str) -> Option<FieldValue> {
        self.fields.write().remove(key)
    }

    pub fn get(&self, key: &str) -> Option<FieldValue> {
        self.fields.read().get(key).cloned()
    }

    /// Get a clone of all fields
    pub fn get_fields(&self) -> Properties {
        self.fields.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.read().len()
    }
}

thread_local! {
    static CURRENT_CALL: RefCell<Option<CallContext>> = const { RefCell::new(None) };
}

/// Properties belonging to one logical call
///
/// A carrier is bound to the running thread with [`CallContext::enter`]; the
/// carrier bound at emission time is the one captured into the event. A thread
/// that never entered a carrier gets its own implicit one, so plain threads
/// behave like classic thread-local storage. Futures can carry their own
/// carrier across polls with [`CallContext::instrument`], which keeps many
/// tasks on one worker thread isolated from each other.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    fields: Arc<Mutex<Properties>>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The carrier bound to the current thread
    ///
    /// With nothing entered this is a per-thread default carrier, shared by
    /// all uninstrumented tasks running on the thread.
    pub fn current() -> CallContext {
        CURRENT_CALL.with(|current| {
            current
                .borrow_mut()
                .get_or_insert_with(CallContext::new)
                .clone()
        })
    }

    /// Bind this carrier to the current thread until the guard drops
    pub fn enter(&self) -> CallContextGuard {
        let previous = CURRENT_CALL.with(|current| current.borrow_mut().replace(self.clone()));
        CallContextGuard {
            previous,
            _not_send: PhantomData,
        }
    }

    /// Run `f` inside a fresh, empty carrier
    pub fn scope<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let ctx = CallContext::new();
        let _guard = ctx.enter();
        f()
    }

    /// Bind this carrier to `future` for every poll
    pub fn instrument<F: Future>(self, future: F) -> InCallContext<F> {
        InCallContext {
            ctx: self,
            inner: Box::pin(future),
        }
    }

    pub fn set<K, V>(&self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.lock().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<FieldValue> {
        self.fields.lock().remove(key)
    }

    pub fn get(&self, key: &str) -> Option<FieldValue> {
        self.fields.lock().get(key).cloned()
    }

    pub fn get_fields(&self) -> Properties {
        self.fields.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.lock().is_empty()
    }
}

/// Restores the previously bound carrier when dropped
///
/// Not `Send`: the binding belongs to the thread that created it.
pub struct CallContextGuard {
    previous: Option<CallContext>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for CallContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_CALL.with(|current| *current.borrow_mut() = previous);
    }
}

/// Future wrapper returned by [`CallContext::instrument`]
pub struct InCallContext<F> {
    ctx: CallContext,
    inner: Pin<Box<F>>,
}

impl<F: Future> Future for InCallContext<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let _guard = this.ctx.enter();
        this.inner.as_mut().poll(cx)
    }
}

/// Scope-addressed property storage
///
/// The global scope is owned by the store (one store per repository); the
/// call scope resolves to [`CallContext::current`] on every access.
///
/// # Example
///
/// ```
/// use connector_logging::core::{ContextScope, ContextStore, FieldValue};
///
/// let store = ContextStore::new();
/// assert_eq!(store.set(ContextScope::Global, "site", "east"), None);
/// assert_eq!(
///     store.clear(ContextScope::Global, "site"),
///     Some(FieldValue::from("east"))
/// );
/// assert_eq!(store.clear(ContextScope::Global, "site"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    global: GlobalContext,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(&self) -> &GlobalContext {
        &self.global
    }

    /// Store `value` under `(scope, key)` and return what was there before
    ///
    /// For [`ContextScope::CallScoped`] the value lands in
    /// [`CallContext::current`]. From an async task that is not wrapped in
    /// [`CallContext::instrument`], that is the worker thread's default
    /// carrier, and other tasks on the same worker will see the value.
    pub fn set<K, V>(&self, scope: ContextScope, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        match scope {
            ContextScope::Global => self.global.set(key, value),
            ContextScope::CallScoped => CallContext::current().set(key, value),
        }
    }

    /// Remove `(scope, key)` and return the removed value
    pub fn clear(&self, scope: ContextScope, key: &str) -> Option<FieldValue> {
        match scope {
            ContextScope::Global => self.global.remove(key),
            ContextScope::CallScoped => CallContext::current().remove(key),
        }
    }

    pub fn get(&self, scope: ContextScope, key: &str) -> Option<FieldValue> {
        match scope {
            ContextScope::Global => self.global.get(key),
            ContextScope::CallScoped => CallContext::current().get(key),
        }
    }

    /// Properties visible right now: global, overlaid by the current call
    pub fn snapshot(&self) -> Properties {
        let mut properties = self.global.get_fields();
        properties.extend(CallContext::current().get_fields());
        properties
    }

    /// Set a property for the lifetime of the returned guard
    ///
    /// Dropping the guard puts back exactly what was stored before, so guards
    /// for the same key nest correctly.
    pub fn guard<K, V>(&self, scope: ContextScope, key: K, value: V) -> ContextGuard
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let target = match scope {
            ContextScope::Global => GuardTarget::Global(self.global.clone()),
            ContextScope::CallScoped => GuardTarget::Call(CallContext::current()),
        };
        let previous = match &target {
            GuardTarget::Global(ctx) => ctx.set(key.clone(), value),
            GuardTarget::Call(ctx) => ctx.set(key.clone(), value),
        };
        ContextGuard {
            target,
            key,
            previous,
        }
    }
}

enum GuardTarget {
    Global(GlobalContext),
    Call(CallContext),
}

/// RAII guard for a scoped property
///
/// # Example
///
/// ```
/// use connector_logging::core::{ContextScope, ContextStore};
///
/// let store = ContextStore::new();
/// {
///     let _guard = store.guard(ContextScope::CallScoped, "request_id", "abc-123");
///     assert!(store.get(ContextScope::CallScoped, "request_id").is_some());
/// }
/// assert!(store.get(ContextScope::CallScoped, "request_id").is_none());
/// ```
pub struct ContextGuard {
    target: GuardTarget,
    key: String,
    previous: Option<FieldValue>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let key = std::mem::take(&mut self.key);
        match (&self.target, self.previous.take()) {
            (GuardTarget::Global(ctx), Some(value)) => {
                ctx.set(key, value);
            }
            (GuardTarget::Global(ctx), None) => {
                ctx.remove(&key);
            }
            (GuardTarget::Call(ctx), Some(value)) => {
                ctx.set(key, value);
            }
            (GuardTarget::Call(ctx), None) => {
                ctx.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_returns_previous_value() {
        let store = ContextStore::new();
        for scope in [ContextScope::Global, ContextScope::CallScoped] {
            assert_eq!(store.set(scope, "key", 1), None);
            assert_eq!(store.set(scope, "key", 2), Some(FieldValue::Int(1)));
            assert_eq!(store.clear(scope, "key"), Some(FieldValue::Int(2)));
            assert_eq!(store.clear(scope, "key"), None);
        }
    }

    #[test]
    fn test_clear_never_set_key() {
        let store = ContextStore::new();
        assert_eq!(store.clear(ContextScope::Global, "missing"), None);
        assert_eq!(store.clear(ContextScope::CallScoped, "missing"), None);
    }

    #[test]
    fn test_snapshot_call_scope_wins() {
        CallContext::scope(|| {
            let store = ContextStore::new();
            store.set(ContextScope::Global, "origin", "global");
            store.set(ContextScope::Global, "service", "connector");
            store.set(ContextScope::CallScoped, "origin", "call");

            let snapshot = store.snapshot();
            assert_eq!(snapshot.len(), 2);
            assert_eq!(snapshot.get("origin"), Some(&FieldValue::from("call")));
            assert_eq!(snapshot.get("service"), Some(&FieldValue::from("connector")));
        });
    }

    #[test]
    fn test_guards_nest_and_restore() {
        CallContext::scope(|| {
            let store = ContextStore::new();
            store.set(ContextScope::CallScoped, "EventID", 1);
            {
                let _outer = store.guard(ContextScope::CallScoped, "EventID", 2);
                {
                    let _inner = store.guard(ContextScope::CallScoped, "EventID", 3);
                    assert_eq!(
                        store.get(ContextScope::CallScoped, "EventID"),
                        Some(FieldValue::Int(3))
                    );
                }
                assert_eq!(
                    store.get(ContextScope::CallScoped, "EventID"),
                    Some(FieldValue::Int(2))
                );
            }
            assert_eq!(
                store.get(ContextScope::CallScoped, "EventID"),
                Some(FieldValue::Int(1))
            );
        });
    }

    #[test]
    fn test_enter_restores_previous_carrier() {
        let outer = CallContext::new();
        let _outer_guard = outer.enter();
        outer.set("layer", "outer");
        {
            let inner = CallContext::new();
            let _inner_guard = inner.enter();
            assert_eq!(CallContext::current().get("layer"), None);
        }
        assert_eq!(
            CallContext::current().get("layer"),
            Some(FieldValue::from("outer"))
        );
    }

    #[test]
    fn test_stores_have_independent_global_scope() {
        let a = ContextStore::new();
        let b = ContextStore::new();
        a.set(ContextScope::Global, "key", "a");
        assert!(b.get(ContextScope::Global, "key").is_none());
    }
}
