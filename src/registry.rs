//! Content-type registration for deletion interceptors.
//!
//! Hosts look up the content type of a document when it is opened and ask
//! the registry for a [`Binding`]: a fresh interceptor plus the indentation
//! service (if any) that goes with that kind of text. Every call to
//! [`InterceptorRegistry::create`] yields independent instances.

use crate::document::IndentService;
use crate::indent::BraceIndenter;
use crate::interceptor::{DeletionInterceptor, InterceptorOptions};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// MIME type of a document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentType(Cow<'static, str>);

impl ContentType {
    /// Structured source text.
    pub const JAVA: Self = Self(Cow::Borrowed("text/x-java"));
    /// Plain text.
    pub const PLAIN: Self = Self(Cow::Borrowed("text/plain"));

    #[must_use]
    pub fn new(mime: impl Into<String>) -> Self {
        Self(Cow::Owned(mime.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentType {
    fn from(mime: &str) -> Self {
        Self::new(mime)
    }
}

/// An interceptor and its indentation service, created for one document.
pub struct Binding {
    pub interceptor: DeletionInterceptor,
    pub indent: Option<Box<dyn IndentService>>,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("interceptor", &self.interceptor)
            .field("indent", &self.indent.is_some())
            .finish()
    }
}

/// Creates the per-document collaborators for a content type.
pub trait InterceptorFactory: Send + Sync {
    fn create_interceptor(&self, content_type: &ContentType) -> DeletionInterceptor;

    fn create_indent_service(&self, _content_type: &ContentType) -> Option<Box<dyn IndentService>> {
        None
    }
}

/// Factory for brace-delimited source text.
#[derive(Clone, Debug, Default)]
pub struct StructuredTextFactory {
    pub options: InterceptorOptions,
    pub indenter: BraceIndenter,
}

impl InterceptorFactory for StructuredTextFactory {
    fn create_interceptor(&self, _content_type: &ContentType) -> DeletionInterceptor {
        DeletionInterceptor::with_options(self.options)
    }

    fn create_indent_service(&self, _content_type: &ContentType) -> Option<Box<dyn IndentService>> {
        Some(Box::new(self.indenter.clone()))
    }
}

/// Factory for plain text; no indentation service.
#[derive(Clone, Debug, Default)]
pub struct PlainTextFactory {
    pub options: InterceptorOptions,
}

impl InterceptorFactory for PlainTextFactory {
    fn create_interceptor(&self, _content_type: &ContentType) -> DeletionInterceptor {
        DeletionInterceptor::with_options(self.options)
    }
}

/// Registry of interceptor factories keyed by content type.
#[derive(Clone, Default)]
pub struct InterceptorRegistry {
    factories: HashMap<ContentType, Arc<dyn InterceptorFactory>>,
}

impl InterceptorRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with structured text (`text/x-java`) and plain text
    /// (`text/plain`) bound.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ContentType::JAVA, StructuredTextFactory::default());
        registry.register(ContentType::PLAIN, PlainTextFactory::default());
        registry
    }

    /// Bind a factory, returning the one it replaces.
    pub fn register<F>(
        &mut self,
        content_type: ContentType,
        factory: F,
    ) -> Option<Arc<dyn InterceptorFactory>>
    where
        F: InterceptorFactory + 'static,
    {
        self.factories.insert(content_type, Arc::new(factory))
    }

    pub fn unregister(&mut self, content_type: &ContentType) -> Option<Arc<dyn InterceptorFactory>> {
        self.factories.remove(content_type)
    }

    #[must_use]
    pub fn contains(&self, content_type: &ContentType) -> bool {
        self.factories.contains_key(content_type)
    }

    /// Fresh collaborators for a document of `content_type`, or `None` if
    /// nothing is registered for it.
    #[must_use]
    pub fn create(&self, content_type: &ContentType) -> Option<Binding> {
        let factory = self.factories.get(content_type)?;
        Some(Binding {
            interceptor: factory.create_interceptor(content_type),
            indent: factory.create_indent_service(content_type),
        })
    }

    /// Registered content types, sorted.
    #[must_use]
    pub fn content_types(&self) -> Vec<&ContentType> {
        let mut types: Vec<_> = self.factories.keys().collect();
        types.sort();
        types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for InterceptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorRegistry")
            .field("content_types", &self.content_types())
            .finish()
    }
}
