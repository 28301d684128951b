//! Well-known member and method result types.
//!
//! Covers the BCL members that show up as assertion subjects often enough to
//! matter for overload and branch decisions: exception properties, collection
//! counts, LINQ materializers, and the static members of a few value types.

use crate::types::TypeRef;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Instance properties typed independently of their receiver.
static INSTANCE_MEMBERS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Exceptions
    m.insert("InnerExceptions", "ReadOnlyCollection<Exception>");
    m.insert("InnerException", "Exception");
    m.insert("Message", "string");
    m.insert("ParamName", "string");
    m.insert("StackTrace", "string");
    m.insert("HResult", "int");

    // Collections and strings
    m.insert("Count", "int");
    m.insert("Length", "int");
    m.insert("LongLength", "long");
    m.insert("Keys", "IEnumerable<object>");
    m.insert("Values", "IEnumerable<object>");

    // Dates
    m.insert("Ticks", "long");
    m.insert("TotalMilliseconds", "double");
    m.insert("TotalSeconds", "double");
    m.insert("TotalMinutes", "double");
    m.insert("TotalHours", "double");
    m.insert("TotalDays", "double");

    m
});

/// Static members, keyed by `Type.Member`.
static STATIC_MEMBERS: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    for member in ["Now", "UtcNow", "Today", "MinValue", "MaxValue", "UnixEpoch"] {
        m.insert(format!("DateTime.{member}"), "DateTime");
    }
    for member in ["Now", "UtcNow", "MinValue", "MaxValue", "UnixEpoch"] {
        m.insert(format!("DateTimeOffset.{member}"), "DateTimeOffset");
    }
    for member in ["Zero", "MinValue", "MaxValue"] {
        m.insert(format!("TimeSpan.{member}"), "TimeSpan");
    }
    for member in [
        "Ordinal",
        "OrdinalIgnoreCase",
        "InvariantCulture",
        "InvariantCultureIgnoreCase",
        "CurrentCulture",
        "CurrentCultureIgnoreCase",
    ] {
        m.insert(format!("StringComparer.{member}"), "StringComparer");
    }

    m.insert("string.Empty".to_string(), "string");
    m.insert("String.Empty".to_string(), "string");
    m.insert("Environment.NewLine".to_string(), "string");
    m.insert("Guid.Empty".to_string(), "Guid");
    m.insert("Task.CompletedTask".to_string(), "Task");
    m.insert("int.MaxValue".to_string(), "int");
    m.insert("int.MinValue".to_string(), "int");
    m.insert("double.NaN".to_string(), "double");
    m.insert("double.Epsilon".to_string(), "double");

    m
});

/// Type of `target.member` when it does not depend on the declaration of
/// `target`. `target_path` is the dotted spelling of the receiver when it is
/// a plain name chain.
pub(crate) fn member_type(target_path: Option<&str>, member: &str) -> Option<TypeRef> {
    if let Some(path) = target_path {
        let key = format!("{}.{}", path.rsplit('.').next().unwrap_or(path), member);
        if let Some(ty) = STATIC_MEMBERS.get(&key) {
            return Some(TypeRef::new(ty));
        }
        // `Comparer<T>.Default`, `EqualityComparer<T>.Default`
        if member == "Default" {
            let receiver = TypeRef::new(path);
            match receiver.base_name() {
                "Comparer" => return Some(TypeRef::new(format!("IComparer{}", generic_suffix(path)))),
                "EqualityComparer" => {
                    return Some(TypeRef::new(format!("IEqualityComparer{}", generic_suffix(path))))
                }
                _ => {}
            }
        }
    }
    INSTANCE_MEMBERS.get(member).map(TypeRef::new)
}

fn generic_suffix(path: &str) -> &str {
    path.find('<').map_or("", |open| &path[open..])
}

/// Result type of `receiver.method(...)`.
///
/// `receiver` is the receiver's type when known; element-preserving LINQ
/// operators keep its element type.
pub(crate) fn method_result_type(
    target_path: Option<&str>,
    method: &str,
    receiver: Option<&TypeRef>,
) -> Option<TypeRef> {
    if let Some(path) = target_path {
        if let Some(ty) = static_method_type(path.rsplit('.').next().unwrap_or(path), method) {
            return Some(ty);
        }
    }

    let element = receiver
        .and_then(TypeRef::element_type)
        .map(|ty| ty.name().to_string())
        .unwrap_or_else(|| "object".to_string());

    let ty = match method {
        "ToString" | "Trim" | "TrimStart" | "TrimEnd" | "ToUpper" | "ToLower" | "ToUpperInvariant"
        | "ToLowerInvariant" | "Substring" | "Replace" | "PadLeft" | "PadRight" => "string".to_string(),
        "ToList" => format!("List<{element}>"),
        "ToArray" => format!("{element}[]"),
        "ToHashSet" => format!("HashSet<{element}>"),
        "ToDictionary" | "ToLookup" | "GroupBy" => "IEnumerable<object>".to_string(),
        "Where" | "OrderBy" | "OrderByDescending" | "ThenBy" | "ThenByDescending" | "Skip"
        | "Take" | "SkipWhile" | "TakeWhile" | "Distinct" | "Reverse" | "Concat" | "Union"
        | "Intersect" | "Except" | "AsEnumerable" => format!("IEnumerable<{element}>"),
        "Select" | "SelectMany" | "Cast" | "OfType" | "Zip" => "IEnumerable<object>".to_string(),
        "Count" | "GetHashCode" | "IndexOf" | "CompareTo" => "int".to_string(),
        "LongCount" => "long".to_string(),
        "Any" | "All" | "Contains" | "Equals" | "StartsWith" | "EndsWith" | "SequenceEqual" => {
            "bool".to_string()
        }
        "Split" => "string[]".to_string(),
        "GetType" => "Type".to_string(),
        "First" | "FirstOrDefault" | "Last" | "LastOrDefault" | "Single" | "SingleOrDefault"
        | "ElementAt" => return receiver.and_then(TypeRef::element_type),
        _ => return None,
    };
    Some(TypeRef::new(ty))
}

fn static_method_type(ty: &str, method: &str) -> Option<TypeRef> {
    let result = match (ty, method) {
        ("Enumerable", "Range") => "IEnumerable<int>",
        ("Enumerable", "Repeat" | "Empty") => "IEnumerable<object>",
        ("string" | "String", "Format" | "Join" | "Concat") => "string",
        ("string" | "String", "IsNullOrEmpty" | "IsNullOrWhiteSpace" | "Equals") => "bool",
        ("TimeSpan", m) if m.starts_with("From") => "TimeSpan",
        ("DateTime", "Parse" | "ParseExact" | "SpecifyKind") => "DateTime",
        ("Guid", "NewGuid" | "Parse") => "Guid",
        ("Array", "Empty") => "object[]",
        ("Math", "Abs" | "Round" | "Floor" | "Ceiling" | "Sqrt" | "Pow") => "double",
        _ => return None,
    };
    Some(TypeRef::new(result))
}
