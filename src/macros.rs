/// Builds a [`KvDocument`](crate::KvDocument) from a literal tree.
///
/// Sections are written as braced blocks, leaves as string literals. Keys may
/// repeat, exactly as in the text format.
///
/// # Examples
///
/// ```rust
/// use kvtree::kv;
///
/// let doc = kv!({
///     "Root": {
///         "name": "hero",
///         "item": "sword",
///         "item": "shield",
///         "stats": { "hp": "100" }
///     }
/// });
///
/// let root = doc.root().get("Root").unwrap();
/// assert_eq!(root.get_all("item").unwrap().count(), 2);
/// assert_eq!(root.get("stats").unwrap().get("hp").unwrap().get_int(0), 100);
/// ```
#[macro_export]
macro_rules! kv {
    // Handle empty document
    ({}) => {
        $crate::KvDocument::default()
    };

    // Handle non-empty document
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut doc = $crate::KvDocument::default();
        let root = doc.root_id();
        $(
            $crate::kv!(@entry doc, root, $key, $value);
        )*
        doc
    }};

    // Section
    (@entry $doc:ident, $parent:expr, $key:literal, { $($inner_key:literal : $inner_value:tt),* $(,)? }) => {{
        let section = $doc.add_section($parent, $key);
        $(
            $crate::kv!(@entry $doc, section, $inner_key, $inner_value);
        )*
    }};

    // Leaf
    (@entry $doc:ident, $parent:expr, $key:literal, $value:expr) => {{
        $doc.add_leaf($parent, $key, $value);
    }};
}

/// Declares an enum that can be stored in node values.
///
/// The generated [`KvScalar`](crate::KvScalar) implementation writes the
/// variant name and parses it back case-insensitively.
///
/// # Examples
///
/// ```rust
/// use kvtree::{kv, kv_enum};
///
/// kv_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum Class {
///         Warrior,
///         Mage,
///     }
/// }
///
/// let mut doc = kv!({ "class": "MAGE" });
/// let class = doc.root().get("class").unwrap();
/// assert_eq!(class.get_or(Class::Warrior), Class::Mage);
///
/// let id = class.id();
/// doc.set_as(id, Class::Warrior);
/// assert_eq!(doc.node(id).value(), Some("Warrior"));
/// ```
#[macro_export]
macro_rules! kv_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::KvScalar for $name {
            fn parse_kv(text: &str) -> ::core::option::Option<Self> {
                let text = text.trim();
                $(
                    if text.eq_ignore_ascii_case(::core::stringify!($variant)) {
                        return ::core::option::Option::Some($name::$variant);
                    }
                )*
                ::core::option::Option::None
            }

            fn format_kv(&self) -> ::std::string::String {
                match self {
                    $(
                        $name::$variant => ::std::string::String::from(::core::stringify!($variant)),
                    )*
                }
            }
        }
    };
}
