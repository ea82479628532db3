//! Macros for ergonomic state and trigger declaration.

/// Generate a state enum together with its `State` implementation.
///
/// # Example
///
/// ```
/// use statecraft::core::State;
/// use statecraft::state_enum;
///
/// state_enum! {
///     pub enum PlayerState {
///         Idle,
///         Walking,
///         Jumping,
///     }
/// }
///
/// assert_eq!(PlayerState::Walking.name(), "Walking");
/// assert_eq!(PlayerState::variants().len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $crate::__closed_enum! {
            $crate::core::State;
            $(#[$meta])*
            $vis enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant
                ),*
            }
        }
    };
}

/// Generate a trigger enum together with its `Trigger` implementation.
///
/// # Example
///
/// ```
/// use statecraft::core::Trigger;
/// use statecraft::trigger_enum;
///
/// trigger_enum! {
///     pub enum PlayerInput {
///         Move,
///         Jump,
///         Land,
///     }
/// }
///
/// assert_eq!(PlayerInput::Land.name(), "Land");
/// ```
#[macro_export]
macro_rules! trigger_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $crate::__closed_enum! {
            $crate::core::Trigger;
            $(#[$meta])*
            $vis enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant
                ),*
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __closed_enum {
    (
        $trait:path;
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $trait for $name {
            fn name(&self) -> &str {
                match *self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn variants() -> &'static [Self] {
                const VARIANTS: &[$name] = &[$($name::$variant),*];
                VARIANTS
            }
        }
    };
}
