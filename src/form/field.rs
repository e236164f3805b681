//! Declarative field descriptors

use std::collections::HashSet;

use super::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    TextInput,
    PasswordInput,
    NumberInput,
    Select,
}

impl FieldKind {
    /// Text-like kinds share one control type and differ only in rendering
    pub fn is_text_like(self) -> bool {
        !matches!(self, FieldKind::Select)
    }
}

/// One entry of a field model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub name: String,
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
}

impl FieldDescriptor {
    fn input(kind: FieldKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            placeholder: None,
            options: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::input(FieldKind::TextInput, name)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::input(FieldKind::PasswordInput, name)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::input(FieldKind::NumberInput, name)
    }

    pub fn select<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: FieldKind::Select,
            name: name.into(),
            placeholder: None,
            options: Some(options.into_iter().map(Into::into).collect()),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Options of a select, `None` when absent or empty
    pub fn select_options(&self) -> Option<&[String]> {
        match &self.options {
            Some(options) if !options.is_empty() => Some(options),
            _ => None,
        }
    }

    /// Label shown next to the control: placeholder, or the field name
    pub fn label(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(&self.name)
    }
}

/// Check a field model for duplicate names and selects without options.
///
/// Materializing does not require this; an empty select is skipped there.
/// Callers building models from dynamic data can use it to catch mistakes.
pub fn validate_model(fields: &[FieldDescriptor]) -> Result<(), FormError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(FormError::DuplicateName(field.name.clone()));
        }
        if field.kind == FieldKind::Select && field.select_options().is_none() {
            return Err(FormError::EmptySelect(field.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_name() {
        let field = FieldDescriptor::text("image");
        assert_eq!(field.label(), "image");
        let field = field.with_placeholder("Image");
        assert_eq!(field.label(), "Image");
    }

    #[test]
    fn test_empty_select_has_no_options() {
        let field = FieldDescriptor::select("namespace", Vec::<String>::new());
        assert!(field.select_options().is_none());
    }

    #[test]
    fn test_validate_model() {
        let ok = vec![
            FieldDescriptor::text("user"),
            FieldDescriptor::password("pass"),
            FieldDescriptor::select("ns", ["default"]),
        ];
        assert!(validate_model(&ok).is_ok());

        let dup = vec![FieldDescriptor::text("user"), FieldDescriptor::number("user")];
        assert!(matches!(validate_model(&dup), Err(FormError::DuplicateName(n)) if n == "user"));

        let empty = vec![FieldDescriptor::select("ns", Vec::<String>::new())];
        assert!(matches!(validate_model(&empty), Err(FormError::EmptySelect(n)) if n == "ns"));
    }
}
