//! Type-erased stub values
//!
//! Strategies hand back [`Value`]s: shared, immutable handles to whatever Rust
//! value they produced. A value may also be null, which only the null-value
//! strategy produces.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A produced stub value
#[derive(Clone)]
pub struct Value {
    inner: Option<Arc<dyn Any + Send + Sync>>,
    type_name: &'static str,
}

impl Value {
    /// Wrap a Rust value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Some(Arc::new(value)),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wrap an already shared Rust value without copying it
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: Some(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The null value
    pub fn null() -> Self {
        Self {
            inner: None,
            type_name: "null",
        }
    }

    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Name of the Rust type held by this value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check whether the held value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_ref().is_some_and(|inner| inner.is::<T>())
    }

    /// Borrow the held value as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref()?.downcast_ref::<T>()
    }

    /// Get a shared handle to the held value as a `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.inner.clone()?.downcast::<T>().ok()
    }

    /// Reference identity: both values point at the same allocation (or are both null)
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Value(null)");
        }
        if let Some(s) = self.downcast_ref::<String>() {
            return write!(f, "Value({:?})", s);
        }
        write!(f, "Value(<{}>)", self.type_name)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::new(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::new(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let value = Value::new(42i32);
        assert!(value.is::<i32>());
        assert_eq!(value.downcast_ref::<i32>(), Some(&42));
        assert!(value.downcast_ref::<i64>().is_none());
        assert_eq!(value.type_name(), "i32");
    }

    #[test]
    fn test_null() {
        let value = Value::null();
        assert!(value.is_null());
        assert!(!value.is::<i32>());
        assert!(value.ptr_eq(&Value::null()));
    }

    #[test]
    fn test_identity() {
        let a = Value::from("x");
        let b = a.clone();
        let c = Value::from("x");
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
