//! String transformation utilities for code generation
//!
//! Every target's naming policy is composed from these pure functions, so
//! the same schema identifier always yields the same emitted identifier.

/// Converts a string to snake_case format.
///
/// This function handles various input formats including camelCase, PascalCase,
/// kebab-case, and space-separated strings, converting them all to snake_case.
///
/// # Examples
/// ```
/// use rpcgen::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("getItems"), "get_items");
/// assert_eq!(to_snake_case("GetItems"), "get_items");
/// assert_eq!(to_snake_case("get-items"), "get_items");
/// assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            // Underscore only at a lower-to-upper boundary
            if i > 0 && prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if ch == '-' || ch == '_' || ch == ' ' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to UpperCamelCase (PascalCase).
///
/// The input is normalized through snake_case first, then each word is
/// capitalized.
///
/// # Examples
/// ```
/// use rpcgen::generation::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("add_item_input"), "AddItemInput");
/// assert_eq!(to_proper_case("http_response"), "HttpResponse");
/// ```
pub fn to_proper_case(s: &str) -> String {
    to_snake_case(s).split('_').map(capitalize).collect()
}

/// Converts a string to lowerCamelCase.
///
/// # Examples
/// ```
/// use rpcgen::generation::utils::to_camel_case;
///
/// assert_eq!(to_camel_case("get_items"), "getItems");
/// assert_eq!(to_camel_case("created_at"), "createdAt");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_proper_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Words Go spells in a single case (from the Go code review conventions)
const GO_INITIALISMS: &[&str] = &[
    "acl", "api", "ascii", "cpu", "css", "dns", "eof", "guid", "html", "http", "https", "id",
    "ip", "json", "lhs", "qps", "ram", "rhs", "rpc", "sla", "smtp", "sql", "ssh", "tcp", "tls",
    "ttl", "udp", "ui", "uid", "uuid", "uri", "url", "utf8", "vm", "xml", "xmpp", "xsrf", "xss",
];

/// Converts a string to an exported Go identifier, upper-casing initialisms.
///
/// # Examples
/// ```
/// use rpcgen::generation::utils::to_go_name;
///
/// assert_eq!(to_go_name("user_id"), "UserID");
/// assert_eq!(to_go_name("get_items"), "GetItems");
/// ```
pub fn to_go_name(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .map(|word| {
            if GO_INITIALISMS.contains(&word) {
                word.to_uppercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

/// Converts a string to an unexported Go identifier.
///
/// A leading initialism is lower-cased as a whole (`id_list` → `idList`,
/// `user_id` → `userID`).
pub fn to_go_lower_name(s: &str) -> String {
    let snake = to_snake_case(s);
    let mut words = snake.split('_').filter(|w| !w.is_empty());
    let Some(first) = words.next() else {
        return String::new();
    };
    let rest: String = words
        .map(|word| {
            if GO_INITIALISMS.contains(&word) {
                word.to_uppercase()
            } else {
                capitalize(word)
            }
        })
        .collect();
    format!("{first}{rest}")
}

/// Escapes an identifier that collides with a reserved word.
///
/// `wrap` receives the colliding identifier and returns its escaped form.
pub fn escape_reserved(name: String, reserved: &[&str], wrap: impl Fn(&str) -> String) -> String {
    if reserved.contains(&name.as_str()) {
        wrap(&name)
    } else {
        name
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
