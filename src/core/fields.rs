use indexmap::IndexMap;

use crate::error::GatewayError;

/// Ordered set of gateway request fields.
///
/// Keys are case-sensitive and flat. Merging keeps the position of keys that
/// already exist and appends new ones, so the form body lists defaults first,
/// then caller-only fields in the order they were given.
///
/// # Examples
///
/// ```
/// use authorizenet::core::fields::FieldSet;
///
/// let fields = FieldSet::from_pairs([("x_amount", ""), ("x_type", "AUTH_CAPTURE")])
///     .merged([("x_amount", "75.00"), ("x_invoice_num", "INV-1")]);
///
/// assert_eq!(fields.get("x_amount"), "75.00");
/// assert_eq!(fields.get("x_missing"), "");
/// assert_eq!(
///     fields.keys().collect::<Vec<_>>(),
///     vec!["x_amount", "x_type", "x_invoice_num"]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: IndexMap<String, String>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut fields = Self::new();
        fields.extend(pairs);
        fields
    }

    /// Returns `self` with `overrides` applied; overrides win on collision.
    pub fn merged<K, V, I>(mut self, overrides: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.extend(overrides);
        self
    }

    pub fn extend<K, V, I>(&mut self, pairs: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.entries.insert(key.into(), value.into());
        }
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.entries.insert(key.into(), value.into());
    }

    /// Value of `key`, or `""` when the field is not set.
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// `true` when the field is present with a non-empty value.
    pub fn is_filled(&self, key: &str) -> bool {
        !self.get(key).is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the fields as an `application/x-www-form-urlencoded` body.
    pub fn to_form_body(&self) -> Result<String, GatewayError> {
        let pairs: Vec<(&str, &str)> = self.iter().collect();
        serde_urlencoded::to_string(pairs)
            .map_err(|e| GatewayError::Serialization(format!("Failed to encode form body: {}", e)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_and_keep_default_position() {
        let fields =
            FieldSet::from_pairs([("a", "1"), ("b", "2")]).merged([("c", "3"), ("a", "9")]);

        let pairs: Vec<(&str, &str)> = fields.iter().collect();
        assert_eq!(pairs, vec![("a", "9"), ("b", "2"), ("c", "3")]);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let fields = FieldSet::from_pairs([("x_amount", "1")]).merged([("X_AMOUNT", "2")]);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("x_amount"), "1");
        assert_eq!(fields.get("X_AMOUNT"), "2");
    }

    #[test]
    fn is_filled_distinguishes_empty_values() {
        let fields = FieldSet::from_pairs([("x_card_num", ""), ("x_amount", "10")]);

        assert!(fields.contains("x_card_num"));
        assert!(!fields.is_filled("x_card_num"));
        assert!(fields.is_filled("x_amount"));
        assert!(!fields.is_filled("x_unknown"));
    }

    #[test]
    fn form_body_is_url_encoded() {
        let fields = FieldSet::from_pairs([
            ("x_login", "api login"),
            ("x_description", "Tea & cakes"),
            ("x_delim_char", "|"),
        ]);

        let body = fields.to_form_body().unwrap();

        assert_eq!(body, "x_login=api+login&x_description=Tea+%26+cakes&x_delim_char=%7C");
    }

    #[test]
    fn empty_field_set_encodes_to_empty_body() {
        assert_eq!(FieldSet::new().to_form_body().unwrap(), "");
    }
}
