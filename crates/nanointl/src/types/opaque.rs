//! Type-erased payloads shared between plugins and the serializer.
//!
//! Plugin parsers produce parameters of a type only the matching serializer
//! understands, and callers hand rich-text callbacks arbitrary objects to
//! embed in output. Both travel through the engine as [`Opaque`] trait
//! objects which can still be compared, debug-printed and downcast.

use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// A comparable, debuggable value whose concrete type is erased.
///
/// Implemented for every `'static` type that is `Debug + PartialEq + Send + Sync`.
pub trait Opaque: Any + Debug + Send + Sync {
    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Equality across erased values: equal only when both have the same
    /// concrete type and compare equal.
    fn eq_opaque(&self, other: &dyn Opaque) -> bool;
}

impl<T: Any + Debug + PartialEq + Send + Sync> Opaque for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_opaque(&self, other: &dyn Opaque) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Parameters produced by a plugin parser for one external node.
///
/// # Example
///
/// ```
/// use nanointl::types::PluginParams;
///
/// #[derive(Debug, PartialEq)]
/// struct Precision(u8);
///
/// let params = PluginParams::new(Precision(2));
/// assert_eq!(params.downcast_ref::<Precision>(), Some(&Precision(2)));
/// assert_eq!(params, PluginParams::new(Precision(2)));
/// ```
#[derive(Clone)]
pub struct PluginParams(Arc<dyn Opaque>);

impl PluginParams {
    pub fn new<T: Opaque>(params: T) -> Self {
        Self(Arc::new(params))
    }

    /// Borrow the parameters as `T`, if that is their concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl PartialEq for PluginParams {
    fn eq(&self, other: &Self) -> bool {
        (*self.0).eq_opaque(&*other.0)
    }
}

impl Debug for PluginParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}
