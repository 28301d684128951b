//! Type references and classification.
//!
//! A [`TypeRef`] is a normalized C# type spelling. Classification works on
//! the spelling alone: the migrator never loads assemblies, so "is this
//! enumerable?" is answered from a fixed list of well-known collection types.

use std::fmt;

/// Collection types (non-generic base names) that implement `IEnumerable`.
const ENUMERABLE_TYPES: &[&str] = &[
    "IEnumerable",
    "ICollection",
    "IList",
    "IReadOnlyCollection",
    "IReadOnlyList",
    "IReadOnlyDictionary",
    "IReadOnlySet",
    "List",
    "HashSet",
    "ISet",
    "SortedSet",
    "Dictionary",
    "IDictionary",
    "SortedDictionary",
    "SortedList",
    "ReadOnlyCollection",
    "ObservableCollection",
    "Collection",
    "Queue",
    "Stack",
    "LinkedList",
    "ArrayList",
    "ImmutableArray",
    "ImmutableList",
    "ImmutableHashSet",
    "ImmutableDictionary",
    "ImmutableSortedSet",
    "ImmutableQueue",
    "ImmutableStack",
    "ConcurrentBag",
    "ConcurrentQueue",
    "ConcurrentStack",
    "ConcurrentDictionary",
    "BlockingCollection",
    "IOrderedEnumerable",
    "IGrouping",
    "ILookup",
    "Span",
    "ReadOnlySpan",
    "Memory",
    "ReadOnlyMemory",
];

const FLOATING_TYPES: &[&str] = &["float", "double", "decimal", "Single", "Double", "Decimal"];

const DELEGATE_TYPES: &[&str] = &["Func", "Action", "Predicate", "Expression", "Delegate"];

const COMPARER_TYPES: &[&str] = &[
    "IComparer",
    "IEqualityComparer",
    "Comparer",
    "EqualityComparer",
    "StringComparer",
];

/// A normalized C# type spelling: `int`, `List<string>`, `byte[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: String,
}

impl TypeRef {
    /// Create a type reference, dropping a `global::` prefix.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        let name = name.strip_prefix("global::").unwrap_or(name);
        Self {
            name: name.to_string(),
        }
    }

    /// Full spelling.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unqualified name without type arguments or nullable marker:
    /// `System.Collections.Generic.List<int>?` → `List`.
    pub fn base_name(&self) -> &str {
        let name = self.name.trim_end_matches('?');
        let name = match name.find('<') {
            Some(open) => &name[..open],
            None => name,
        };
        name.rsplit('.').next().unwrap_or(name)
    }

    /// True for `T[]`, `T[,]` and the untyped `[]` of array creations and
    /// collection expressions.
    pub fn is_array(&self) -> bool {
        self.name.trim_end_matches('?').ends_with(']')
    }

    /// Top-level type arguments: `Dictionary<string, List<int>>` →
    /// `[string, List<int>]`.
    pub fn type_args(&self) -> Vec<TypeRef> {
        let name = self.name.trim_end_matches('?');
        let (Some(open), Some(close)) = (name.find('<'), name.rfind('>')) else {
            return Vec::new();
        };
        if close <= open {
            return Vec::new();
        }

        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut start = open + 1;
        for (offset, ch) in name[open + 1..close].char_indices() {
            let index = open + 1 + offset;
            match ch {
                '<' | '(' => depth += 1,
                '>' | ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    args.push(TypeRef::new(&name[start..index]));
                    start = index + 1;
                }
                _ => {}
            }
        }
        args.push(TypeRef::new(&name[start..close]));
        args.retain(|arg| !arg.name.is_empty());
        args
    }

    /// Element type of an array or single-argument generic collection.
    pub fn element_type(&self) -> Option<TypeRef> {
        if self.is_array() {
            let name = self.name.trim_end_matches('?');
            let open = name.rfind('[')?;
            let element = &name[..open];
            return (!element.is_empty()).then(|| TypeRef::new(element));
        }
        if !self.is_enumerable() {
            return None;
        }
        let args = self.type_args();
        match args.len() {
            1 => args.into_iter().next(),
            _ => None,
        }
    }

    /// `string` or `System.String`.
    pub fn is_string(&self) -> bool {
        !self.is_array() && matches!(self.base_name(), "string" | "String")
    }

    /// Arrays and well-known collection types. Strings are not enumerable here
    /// even though `string` implements `IEnumerable<char>`.
    pub fn is_enumerable(&self) -> bool {
        if self.is_array() {
            return true;
        }
        !self.is_string() && ENUMERABLE_TYPES.contains(&self.base_name())
    }

    /// `float`, `double`, `decimal`.
    pub fn is_floating(&self) -> bool {
        !self.is_array() && FLOATING_TYPES.contains(&self.base_name())
    }

    /// Delegate and expression-tree types: `Func<T, bool>`, `Action`,
    /// `Predicate<T>`, `Expression<Func<T, bool>>`.
    pub fn is_delegate(&self) -> bool {
        !self.is_array() && DELEGATE_TYPES.contains(&self.base_name())
    }

    /// Delegate types that return `bool` or are `Predicate<T>`.
    pub fn is_predicate(&self) -> bool {
        match self.base_name() {
            "Predicate" => true,
            "Func" => self
                .type_args()
                .last()
                .is_some_and(|ret| matches!(ret.base_name(), "bool" | "Boolean")),
            "Expression" => self
                .type_args()
                .first()
                .is_some_and(TypeRef::is_predicate),
            _ => false,
        }
    }

    /// Ordering and equality comparers.
    pub fn is_comparer(&self) -> bool {
        !self.is_array() && COMPARER_TYPES.contains(&self.base_name())
    }

    /// `TimeSpan`.
    pub fn is_time_span(&self) -> bool {
        !self.is_array() && self.base_name() == "TimeSpan"
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::new(name)
    }
}
