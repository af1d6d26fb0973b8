use std::any::Any;

/// A trait that facilitates deriving `PartialEq` and `Eq` for `dyn` trait objects.
/// Since `DynObject` has a blanket implementation, all method names are prefixed with `dyn_object_`
/// to avoid conflicts with similar methods defined by other traits.
pub trait DynObject: Any {
    fn dyn_object_as_any(&self) -> &dyn Any;
    fn dyn_object_eq(&self, other: &dyn Any) -> bool;
    fn dyn_object_type_name(&self) -> &'static str;
}

impl<T: Eq + 'static> DynObject for T {
    fn dyn_object_as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_object_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<Self>() == Some(self)
    }

    fn dyn_object_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Two trait objects are equal when they hold the same concrete type with equal values.
#[macro_export]
macro_rules! impl_dyn_object_traits {
    ($t:ident) => {
        impl PartialEq<dyn $t> for dyn $t {
            fn eq(&self, other: &dyn $t) -> bool {
                $crate::object::DynObject::dyn_object_eq(
                    self,
                    $crate::object::DynObject::dyn_object_as_any(other),
                )
            }
        }

        impl Eq for dyn $t {}
    };
}
