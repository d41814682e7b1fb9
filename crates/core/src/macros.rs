//! Helper macros for closed string-labelled enumerations.

/// Generates a closed enumeration whose variants carry a canonical
/// SCREAMING_SNAKE_CASE label used for serde, `Display`, and `FromStr`.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the canonical label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let label = s.trim().to_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == label)
                    .ok_or_else(|| format!("Unknown {}: {s}", stringify!($name)))
            }
        }
    };
}
