/// Upper-case the first character, leave the rest untouched.
///
/// Unlike a PascalCase conversion this never normalizes the tail, so
/// `heroImage` stays `HeroImage` and `URL` stays `URL`.
///
/// # Examples
/// ```
/// use groqgen_core::utils::upper_first;
/// assert_eq!(upper_first("post"), "Post");
/// assert_eq!(upper_first("blogPost"), "BlogPost");
/// assert_eq!(upper_first(""), "");
/// ```
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join two names into a camelCase alias: `base` + `suffix` with its first
/// character upper-cased.
///
/// # Examples
/// ```
/// use groqgen_core::utils::camel_join;
/// assert_eq!(camel_join("hero", "alt"), "heroAlt");
/// ```
pub fn camel_join(base: &str, suffix: &str) -> String {
    let mut out = String::with_capacity(base.len() + suffix.len());
    out.push_str(base);
    out.push_str(&upper_first(suffix));
    out
}
