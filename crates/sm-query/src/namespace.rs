//! The `Sm` namespace
//!
//! Owns the document, the configuration and the queue of ready callbacks.
//! Cloning an `Sm` shares the same namespace; every collection keeps one so
//! it can re-enter construction.

use std::cell::{OnceCell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use sm_dom::{Document, ReadyState};
use sm_html::HtmlParser;

use crate::global::Binding;
use crate::iter::{self, Iterable, Key};
use crate::kind;
use crate::util;
use crate::{Collection, Config, Function, Kind, Result, Value};

struct Inner {
    document: RefCell<Document>,
    config: Config,
    pending_ready: RefCell<Vec<Function>>,
    /// What the global symbol was bound to before the first install
    previous_binding: OnceCell<Option<Binding>>,
}

/// Query namespace bound to one document
#[derive(Clone)]
pub struct Sm {
    inner: Rc<Inner>,
}

impl Sm {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, Config::default())
    }

    pub fn with_config(document: Document, config: Config) -> Self {
        Self {
            inner: Rc::new(Inner {
                document: RefCell::new(document),
                config,
                pending_ready: RefCell::new(Vec::new()),
                previous_binding: OnceCell::new(),
            }),
        }
    }

    /// Parse a full HTML document and bind a namespace to it
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self::new(HtmlParser::new().parse(html)?))
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Borrow the document. Must not be held across calls that mutate it.
    pub fn document(&self) -> Ref<'_, Document> {
        self.inner.document.borrow()
    }

    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.inner.document.borrow_mut()
    }

    /// Whether both handles are the same namespace
    pub fn ptr_eq(&self, other: &Sm) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Build a collection from any input
    pub fn query(&self, input: impl Into<Value>) -> Result<Collection> {
        self.construct(input.into(), None)
    }

    /// Build a collection from a selector evaluated inside `scope`
    pub fn query_in(&self, input: impl Into<Value>, scope: impl Into<Value>) -> Result<Collection> {
        self.construct(input.into(), Some(scope.into()))
    }

    // ------------------------------------------------------------------
    // Ready callbacks
    // ------------------------------------------------------------------

    /// Run `callback` once the document is ready: now if parsing is over,
    /// otherwise at the ready transition.
    pub fn ready(&self, callback: Function) {
        let state = self.document().ready_state();
        if state.is_ready() {
            tracing::debug!("Document already {}, running ready callback", state.as_str());
            callback.call(self);
        } else {
            tracing::debug!("Document still loading, queueing ready callback");
            self.inner.pending_ready.borrow_mut().push(callback);
        }
    }

    /// Number of callbacks waiting for the ready transition
    pub fn pending_ready(&self) -> usize {
        self.inner.pending_ready.borrow().len()
    }

    /// Advance the document's loading state. Leaving `Loading` drains the
    /// ready queue exactly once.
    pub fn set_ready_state(&self, state: ReadyState) {
        let previous = self.document_mut().set_ready_state(state);
        if previous.is_ready() || !state.is_ready() {
            return;
        }

        let callbacks = std::mem::take(&mut *self.inner.pending_ready.borrow_mut());
        tracing::debug!("Ready transition, firing {} callbacks", callbacks.len());
        for callback in callbacks {
            callback.call(self);
        }
    }

    // ------------------------------------------------------------------
    // Global symbol bookkeeping (see `global`)
    // ------------------------------------------------------------------

    /// Record the previous global binding; only the first call counts
    pub(crate) fn save_previous_binding(&self, binding: Option<Binding>) {
        // Later installs must not overwrite what the first one saw
        let _ = self.inner.previous_binding.set(binding);
    }

    pub(crate) fn previous_binding(&self) -> Option<&Binding> {
        self.inner.previous_binding.get().and_then(Option::as_ref)
    }

    // ------------------------------------------------------------------
    // Static helpers
    // ------------------------------------------------------------------

    pub fn kind_of(value: &Value) -> Kind {
        kind::kind_of(value)
    }

    pub fn is_array(value: &Value) -> bool {
        kind::is_array(value)
    }

    pub fn is_function(value: &Value) -> bool {
        kind::is_function(value)
    }

    pub fn is_object(value: &Value) -> bool {
        kind::is_object(value)
    }

    pub fn is_plain_object(value: &Value) -> bool {
        kind::is_plain_object(value)
    }

    pub fn is_window(value: &Value) -> bool {
        kind::is_window(value)
    }

    pub fn is_document(value: &Value) -> bool {
        kind::is_document(value)
    }

    pub fn is_collection(value: &Value) -> bool {
        kind::is_collection(value)
    }

    pub fn is_empty_object(value: &Value) -> bool {
        kind::is_empty_object(value)
    }

    pub fn each<I: Iterable + ?Sized>(collection: &I, f: impl FnMut(Key, I::Item, &I)) {
        iter::each(collection, f)
    }

    pub fn map<I: Iterable + ?Sized, U>(collection: &I, f: impl FnMut(I::Item, Key, &I) -> Option<U>) -> Vec<U> {
        iter::map(collection, f)
    }

    pub fn extend<'a>(target: &'a mut Value, sources: &[Value], deep: bool) -> &'a mut Value {
        util::extend(target, sources, deep)
    }

    pub fn trim(s: &str) -> &str {
        util::trim(s)
    }

    pub fn camel_case(s: &str) -> String {
        sm_css::camel_case(s)
    }

    pub fn camel_connector(s: &str) -> String {
        sm_css::camel_connector(s)
    }

    pub fn parse(json: &str) -> Result<Value> {
        util::parse(json)
    }
}

impl fmt::Debug for Sm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm")
            .field("config", &self.inner.config)
            .field("pending_ready", &self.inner.pending_ready.borrow().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_ready_queued_until_transition() {
        let sm = Sm::new(Document::new("about:blank"));
        let fired = Rc::new(Cell::new(0));

        let counter = fired.clone();
        sm.ready(Function::new(move |_| counter.set(counter.get() + 1)));
        assert_eq!(fired.get(), 0);
        assert_eq!(sm.pending_ready(), 1);

        sm.set_ready_state(ReadyState::Interactive);
        assert_eq!(fired.get(), 1);
        assert_eq!(sm.pending_ready(), 0);

        // Later transitions do not re-fire
        sm.set_ready_state(ReadyState::Complete);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_ready_runs_immediately_when_ready() {
        let sm = Sm::from_html("<p>x</p>").unwrap();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        sm.ready(Function::new(move |_| flag.set(true)));
        assert!(fired.get());
    }

    #[test]
    fn test_callback_may_query_document() {
        let sm = Sm::new(Document::new("about:blank"));
        let seen = Rc::new(Cell::new(0));
        let out = seen.clone();
        sm.ready(Function::new(move |sm| {
            out.set(sm.query("body").map(|c| c.len()).unwrap_or(0));
        }));
        sm.set_ready_state(ReadyState::Complete);
        assert_eq!(seen.get(), 1);
    }
}
