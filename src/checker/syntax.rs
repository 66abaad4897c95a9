/// Normalizes raw input for classification: surrounding whitespace is
/// trimmed and the address lowercased. All downstream checks and cache keys
/// operate on the normalized form.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validates an email address against the format bar used by the checker:
///
/// - exactly one `@`, separating a non-empty local part and domain
/// - total length at most 254 bytes (RFC 5321), local part at most 64
/// - domain carries at least two labels; labels are alphanumeric with
///   interior hyphens (a single trailing root dot is tolerated)
///
/// This is deliberately narrower than full RFC 5322: quoted local parts and
/// domain literals fail here, matching what the classification pipeline is
/// willing to look up.
///
/// # Examples
/// ```
/// use disposable_email_checker::checker::syntax::is_valid_email;
///
/// assert!(is_valid_email("user.name+tag@example.com"));
/// assert!(!is_valid_email("no-at-sign"));
/// assert!(!is_valid_email("two@at@signs.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 {
        return false;
    }

    let (local, domain) = match split_once_at(email) {
        Some(parts) => parts,
        None => return false,
    };

    if local.is_empty() || local.len() > 64 {
        return false;
    }
    if !is_valid_local_part(local) {
        return false;
    }

    is_valid_domain(strip_root_dot(domain))
}

/// Extracts the domain part of a valid address: lowercase input expected,
/// trailing root dot stripped. Returns `None` when the address fails
/// [`is_valid_email`].
pub fn domain_of(email: &str) -> Option<&str> {
    if !is_valid_email(email) {
        return None;
    }
    split_once_at(email).map(|(_, domain)| strip_root_dot(domain))
}

/// Splits on `@` only when the separator occurs exactly once.
fn split_once_at(email: &str) -> Option<(&str, &str)> {
    let mut parts = email.splitn(3, '@');
    let local = parts.next()?;
    let domain = parts.next()?;
    if parts.next().is_some() {
        return None; // More than one @
    }
    Some((local, domain))
}

fn strip_root_dot(domain: &str) -> &str {
    domain.strip_suffix('.').unwrap_or(domain)
}

/// Dot-atom local part: atoms of printable characters separated by single
/// dots, no leading/trailing/consecutive dots.
fn is_valid_local_part(local: &str) -> bool {
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local.chars().all(|c| {
        c.is_alphanumeric()
            || matches!(
                c,
                '.' | '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '/' | '='
                    | '?' | '^' | '_' | '`' | '{' | '|' | '}' | '~'
            )
    })
}

/// Domain names must have at least two non-empty labels. Labels accept
/// alphanumerics (including internationalized characters) and interior
/// hyphens.
fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}
