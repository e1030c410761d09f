/// Implements [`Slots`](crate::kinds::Slots) for a node struct.
///
/// Each entry names a field holding children: `opt` for an
/// `Option<NodeId>` slot, `many` for a `Vec<NodeId>` slot. Entries must be
/// listed in grammar order because traversal follows it.
macro_rules! node {
    ($ty:ident { $($mode:ident $field:ident),* $(,)? }) => {
        impl $crate::kinds::Slots for $ty {
            fn name(&self) -> &'static str {
                stringify!($ty)
            }

            #[allow(unused_variables)]
            fn for_each_child(&self, f: &mut dyn FnMut($crate::arena::NodeId)) {
                $( slot!(@each $mode self.$field, f); )*
            }

            #[allow(unused_variables)]
            fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut $crate::arena::NodeId)) {
                $( slot!(@each_mut $mode self.$field, f); )*
            }

            #[allow(unused_variables)]
            fn remove_child(&mut self, child: $crate::arena::NodeId) -> bool {
                $(
                    if slot!(@remove $mode self.$field, child) {
                        return true;
                    }
                )*
                false
            }
        }
    };
}

macro_rules! slot {
    (@each opt $e:expr, $f:ident) => {
        if let Some(id) = $e {
            $f(id);
        }
    };
    (@each many $e:expr, $f:ident) => {
        for id in $e.iter() {
            $f(*id);
        }
    };
    (@each_mut opt $e:expr, $f:ident) => {
        if let Some(id) = $e.as_mut() {
            $f(id);
        }
    };
    (@each_mut many $e:expr, $f:ident) => {
        for id in $e.iter_mut() {
            $f(id);
        }
    };
    (@remove opt $e:expr, $child:ident) => {{
        if $e == Some($child) {
            $e = None;
            true
        } else {
            false
        }
    }};
    (@remove many $e:expr, $child:ident) => {{
        match $e.iter().position(|id| *id == $child) {
            Some(pos) => {
                $e.remove(pos);
                true
            }
            None => false,
        }
    }};
}

/// Declares a dialect family enum whose variants wrap the struct of the
/// same name, and wires it into [`NodeKind`](crate::kinds::NodeKind).
macro_rules! family {
    ($(#[$meta:meta])* $name:ident => $outer:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $($variant($variant),)*
        }

        impl $crate::kinds::Slots for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(x) => $crate::kinds::Slots::name(x),)*
                }
            }

            fn for_each_child(&self, f: &mut dyn FnMut($crate::arena::NodeId)) {
                match self {
                    $(Self::$variant(x) => $crate::kinds::Slots::for_each_child(x, f),)*
                }
            }

            fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut $crate::arena::NodeId)) {
                match self {
                    $(Self::$variant(x) => $crate::kinds::Slots::for_each_child_mut(x, f),)*
                }
            }

            fn remove_child(&mut self, child: $crate::arena::NodeId) -> bool {
                match self {
                    $(Self::$variant(x) => $crate::kinds::Slots::remove_child(x, child),)*
                }
            }
        }

        $(
            impl From<$variant> for $name {
                fn from(x: $variant) -> Self {
                    Self::$variant(x)
                }
            }

            impl From<$variant> for $crate::kinds::NodeKind {
                fn from(x: $variant) -> Self {
                    $crate::kinds::NodeKind::$outer($name::$variant(x))
                }
            }
        )*

        impl From<$name> for $crate::kinds::NodeKind {
            fn from(x: $name) -> Self {
                $crate::kinds::NodeKind::$outer(x)
            }
        }
    };
}

/// Declares [`NodeKind`](crate::kinds::NodeKind): one variant per common
/// grammar struct plus one per dialect family.
macro_rules! node_kind {
    (
        common { $($variant:ident),* $(,)? }
        families { $($fam:ident($fty:ident)),* $(,)? }
    ) => {
        /// Every node kind the renderer understands.
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub enum NodeKind {
            $($variant($variant),)*
            $($fam($fty),)*
        }

        impl $crate::kinds::Slots for NodeKind {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(x) => $crate::kinds::Slots::name(x),)*
                    $(Self::$fam(x) => $crate::kinds::Slots::name(x),)*
                }
            }

            fn for_each_child(&self, f: &mut dyn FnMut($crate::arena::NodeId)) {
                match self {
                    $(Self::$variant(x) => $crate::kinds::Slots::for_each_child(x, f),)*
                    $(Self::$fam(x) => $crate::kinds::Slots::for_each_child(x, f),)*
                }
            }

            fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut $crate::arena::NodeId)) {
                match self {
                    $(Self::$variant(x) => $crate::kinds::Slots::for_each_child_mut(x, f),)*
                    $(Self::$fam(x) => $crate::kinds::Slots::for_each_child_mut(x, f),)*
                }
            }

            fn remove_child(&mut self, child: $crate::arena::NodeId) -> bool {
                match self {
                    $(Self::$variant(x) => $crate::kinds::Slots::remove_child(x, child),)*
                    $(Self::$fam(x) => $crate::kinds::Slots::remove_child(x, child),)*
                }
            }
        }

        $(
            impl From<$variant> for NodeKind {
                fn from(x: $variant) -> Self {
                    Self::$variant(x)
                }
            }
        )*
    };
}
