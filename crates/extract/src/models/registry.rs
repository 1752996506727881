//! Closed lookup tables mapping symbolic type names to site ids and display
//! names.

/// One immutable row of a registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<T: 'static> {
    pub kind: T,
    /// Symbolic name, e.g. `travel_bug_dog_tag`.
    pub symbol: &'static str,
    /// Numeric id used by the site (image paths, query strings).
    pub id: u32,
    /// Display name as rendered on the site.
    pub name: &'static str,
}

/// A fixed, process-wide table of types.
///
/// Lookups return a value only when exactly one row matches. Ids are unique
/// by construction; display names are assumed unique but not enforced, so an
/// ambiguous display name yields no match rather than an arbitrary one.
pub trait Registry: Copy + Eq + 'static {
    const ENTRIES: &'static [Entry<Self>];

    /// The table row for this value.
    fn entry(self) -> &'static Entry<Self>;

    fn for_id(id: u32) -> Option<Self> {
        unique(Self::ENTRIES.iter().filter(|entry| entry.id == id))
    }

    fn for_name(name: &str) -> Option<Self> {
        unique(Self::ENTRIES.iter().filter(|entry| entry.name == name))
    }

    fn for_symbol(symbol: &str) -> Option<Self> {
        unique(Self::ENTRIES.iter().filter(|entry| entry.symbol == symbol))
    }

    fn id(self) -> u32 {
        self.entry().id
    }

    fn name(self) -> &'static str {
        self.entry().name
    }

    fn symbol(self) -> &'static str {
        self.entry().symbol
    }

    /// Compares against a bare symbolic name.
    fn is(self, symbol: &str) -> bool {
        self.symbol() == symbol
    }
}

fn unique<'a, T: Copy + 'static>(mut matches: impl Iterator<Item = &'a Entry<T>>) -> Option<T> {
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Some(entry.kind),
        _ => None,
    }
}

/// Declares a registry enum and its table in one place. Variants and rows
/// share declaration order, which [`Registry::entry`] relies on.
macro_rules! registry {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = ($symbol:literal, $id:literal, $display:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
        }
        impl $crate::models::Registry for $name {
            const ENTRIES: &'static [$crate::models::Entry<Self>] = &[
                $($crate::models::Entry { kind: Self::$variant, symbol: $symbol, id: $id, name: $display },)+
            ];

            fn entry(self) -> &'static $crate::models::Entry<Self> {
                &Self::ENTRIES[self as usize]
            }
        }
        impl ::std::str::FromStr for $name {
            type Err = $crate::error::Error;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::models::Registry>::for_symbol(s).ok_or_else(|| {
                    ::exn::Exn::from($crate::error::ErrorKind::InvalidArgument(format!(
                        "unknown {} `{}`",
                        stringify!($name),
                        s
                    )))
                })
            }
        }
        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $crate::models::Registry>::name(*self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CacheType, LogType, TrackableType};
    use rstest::rstest;
    use std::collections::HashSet;

    fn assert_bijection<T: Registry + std::fmt::Debug>() {
        for entry in T::ENTRIES {
            assert_eq!(T::for_id(entry.id), Some(entry.kind));
            assert_eq!(T::for_name(entry.name), Some(entry.kind));
            assert_eq!(T::for_symbol(entry.symbol), Some(entry.kind));
            assert!(entry.kind.is(entry.symbol));
            assert_eq!(entry.kind.entry(), entry);
        }
    }

    fn assert_unique_ids<T: Registry>() {
        let ids: HashSet<u32> = T::ENTRIES.iter().map(|entry| entry.id).collect();
        assert_eq!(ids.len(), T::ENTRIES.len());
        let symbols: HashSet<&str> = T::ENTRIES.iter().map(|entry| entry.symbol).collect();
        assert_eq!(symbols.len(), T::ENTRIES.len());
    }

    #[test]
    fn test_bijection() {
        assert_bijection::<TrackableType>();
        assert_bijection::<CacheType>();
        assert_bijection::<LogType>();
    }

    #[test]
    fn test_unique_ids() {
        assert_unique_ids::<TrackableType>();
        assert_unique_ids::<CacheType>();
        assert_unique_ids::<LogType>();
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(99_999)]
    fn test_unknown_id(#[case] id: u32) {
        assert_eq!(TrackableType::for_id(id), None);
        assert_eq!(CacheType::for_id(id), None);
        assert_eq!(LogType::for_id(id), None);
    }

    #[rstest]
    #[case("")]
    #[case("Travel Bug")]
    #[case("travel bug dog tag")]
    fn test_unknown_name(#[case] name: &str) {
        assert_eq!(TrackableType::for_name(name), None);
    }

    #[test]
    fn test_dog_tag() {
        let kind = TrackableType::for_name("Travel Bug Dog Tag").unwrap();
        assert_eq!(kind, TrackableType::TravelBugDogTag);
        assert_eq!(kind.id(), 21);
        assert_eq!(kind.symbol(), "travel_bug_dog_tag");
        assert!(kind.is("travel_bug_dog_tag"));
        assert!(!kind.is("geocoin"));
    }

    #[rstest]
    #[case("multi", CacheType::Multi)]
    #[case("earthcache", CacheType::Earthcache)]
    fn test_from_str(#[case] symbol: &str, #[case] expected: CacheType) {
        assert_eq!(symbol.parse::<CacheType>().unwrap(), expected);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "nope".parse::<LogType>().unwrap_err();
        assert!(matches!(&*err, crate::error::ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(LogType::DidNotFind.to_string(), "Didn't find it");
        assert_eq!(CacheType::Mystery.to_string(), "Unknown Cache");
    }
}
