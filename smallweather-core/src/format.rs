/// Capitalize the first character and lowercase the rest, e.g. "lONDON" -> "London".
///
/// Meant for a single word or a user-typed city name; it does not title-case
/// each word.
pub fn format_city_name(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
