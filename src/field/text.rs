//! The text input field.
//!
//! Renders a Bootstrap input group and, when configured, the Inputmask
//! script that goes with it.

use std::fmt;
use std::sync::Arc;

use super::{escape_html, Attributes};
use crate::lang::{self, Catalog, Translator};
use crate::{encode_with_options, JsOptions, JsValue};

const DEFAULT_PREPEND: &str = r#"<i class="ti-pencil"></i>"#;

/// A single-line text input.
///
/// Setters chain on `&mut self`; nothing is rendered until [`TextField::render`].
///
/// # Examples
///
/// ```rust
/// use admin_text_field::TextField;
///
/// let mut field = TextField::new("user.email", "Email");
/// field.input_type("email").validation_error("Please enter an email address");
///
/// let html = field.render();
/// assert!(html.contains(r#"type="email""#));
/// assert!(html.contains(r#"id="user_email""#));
/// assert!(html.contains(r#"name="user[email]""#));
/// assert!(html.contains(r#"data-error="Please enter an email address""#));
/// ```
#[derive(Clone)]
pub struct TextField {
    column: String,
    label: String,
    id: String,
    value: Option<String>,
    default: Option<String>,
    old: Option<String>,
    placeholder: Option<String>,
    attributes: Attributes,
    prepend: Option<String>,
    append: Option<String>,
    script: Option<String>,
    translator: Arc<dyn Translator>,
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("column", &self.column)
            .field("label", &self.label)
            .field("id", &self.id)
            .field("value", &self.value)
            .field("attributes", &self.attributes)
            .field("script", &self.script)
            .finish_non_exhaustive()
    }
}

/// `user.name` becomes `user_name`, `tags[0]` becomes `tags_0`.
fn format_id(column: &str) -> String {
    column
        .replace(['.', '[', ']'], "_")
        .trim_end_matches('_')
        .to_string()
}

impl TextField {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        let column = column.into();
        TextField {
            id: format_id(&column),
            column,
            label: label.into(),
            value: None,
            default: None,
            old: None,
            placeholder: None,
            attributes: Attributes::new(),
            prepend: None,
            append: None,
            script: None,
            translator: Arc::new(Catalog::english()),
        }
    }

    pub fn with_translator(&mut self, translator: Arc<dyn Translator>) -> &mut Self {
        self.translator = translator;
        self
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The generated script, if any helper produced one.
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// The form `name`: `a.b.c` becomes `a[b][c]`.
    #[must_use]
    pub fn element_name(&self) -> String {
        let mut parts = self.column.split('.');
        let mut name = parts.next().unwrap_or_default().to_string();
        for part in parts {
            name.push('[');
            name.push_str(part);
            name.push(']');
        }
        name
    }

    #[must_use]
    pub fn element_class(&self) -> String {
        format!("field_{}", self.id)
    }

    #[must_use]
    pub fn element_class_selector(&self) -> String {
        format!(".{}", self.element_class())
    }

    pub fn value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    pub fn default_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Input from a previous failed submission; wins over the stored value.
    pub fn old_input(&mut self, value: Option<String>) -> &mut Self {
        self.old = value;
        self
    }

    #[must_use]
    pub fn current_value(&self) -> &str {
        self.old
            .as_deref()
            .or(self.value.as_deref())
            .or(self.default.as_deref())
            .unwrap_or("")
    }

    pub fn placeholder(&mut self, placeholder: impl Into<String>) -> &mut Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn placeholder_text(&self) -> String {
        match &self.placeholder {
            Some(p) => p.clone(),
            None => format!("{} {}", self.translator.trans(lang::INPUT), self.label),
        }
    }

    pub fn attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.set(name, value);
        self
    }

    pub fn default_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.attributes.set_default(name, value);
        self
    }

    /// HTML shown before the input. Not escaped.
    pub fn prepend(&mut self, html: impl Into<String>) -> &mut Self {
        self.prepend = Some(html.into());
        self
    }

    /// HTML shown after the input. Not escaped; replaces any earlier append.
    pub fn append(&mut self, html: impl Into<String>) -> &mut Self {
        self.append = Some(html.into());
        self
    }

    pub fn input_type(&mut self, input_type: &str) -> &mut Self {
        self.attribute("type", input_type)
    }

    /// Requires this input to match another field's value on the client.
    ///
    /// Without a selector, the other field is addressed by its element id.
    /// `:attribute` in the message is replaced by `field`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::TextField;
    ///
    /// let mut field = TextField::new("password_confirmation", "Confirm");
    /// field.confirm("password", None, None);
    ///
    /// assert_eq!(field.attributes().get("data-match"), Some("#password"));
    /// assert_eq!(
    ///     field.attributes().get("data-match-error"),
    ///     Some("The password does not match.")
    /// );
    /// ```
    pub fn confirm(&mut self, field: &str, error: Option<&str>, selector: Option<&str>) -> &mut Self {
        let selector = match selector {
            Some(s) => s.to_string(),
            None => format!("#{}", format_id(field)),
        };
        let message = match error {
            Some(e) => e.to_string(),
            None => self.translator.trans(lang::VALIDATION_MATCH),
        };

        self.attribute("data-match", selector);
        self.attribute("data-match-error", message.replace(":attribute", field))
    }

    /// Message shown when client-side validation fails.
    pub fn validation_error(&mut self, error: &str) -> &mut Self {
        self.attribute("data-error", error)
    }

    /// Applies an Inputmask configuration to this input.
    ///
    /// Slashes in data are escaped so no string can close the `<script>` tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::{jsopts, TextField};
    ///
    /// let mut field = TextField::new("date", "Date");
    /// field.inputmask(&jsopts!({ "mask": "99/99/9999" }));
    ///
    /// assert_eq!(
    ///     field.script(),
    ///     Some(r#"$('.field_date').inputmask({"mask":"99\/99\/9999"});"#)
    /// );
    /// ```
    pub fn inputmask(&mut self, options: &JsValue) -> &mut Self {
        self.inputmask_with(options, &JsOptions::new().with_escaped_slashes(true))
    }

    pub fn inputmask_with(&mut self, options: &JsValue, encoding: &JsOptions) -> &mut Self {
        let encoded = encode_with_options(options, encoding);
        let script = format!(
            "$('{}').inputmask({});",
            self.element_class_selector(),
            encoded
        );
        tracing::debug!(column = %self.column, len = script.len(), "generated inputmask script");
        self.script = Some(script);
        self
    }

    /// Adds HTML5 autocompletion entries as a `<datalist>` after the input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::TextField;
    ///
    /// let mut field = TextField::new("city", "City");
    /// field.datalist([("ams", "Amsterdam"), ("ber", "Berlin")]);
    ///
    /// let html = field.render();
    /// assert!(html.contains(r#"list="list-city""#));
    /// assert!(html.contains(
    ///     r#"<datalist id="list-city"><option value="ams">Amsterdam</option><option value="ber">Berlin</option></datalist>"#
    /// ));
    /// ```
    pub fn datalist<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let list_id = format!("list-{}", self.id);
        self.default_attribute("list", list_id.as_str());

        let mut datalist = format!(r#"<datalist id="{}">"#, escape_html(&list_id));
        for (value, text) in entries {
            datalist.push_str(&format!(
                r#"<option value="{}">{}</option>"#,
                escape_html(value.as_ref()),
                escape_html(text.as_ref())
            ));
        }
        datalist.push_str("</datalist>");

        self.append(datalist)
    }

    /// Renders the input group, followed by the script when one is set.
    #[must_use]
    pub fn render(&self) -> String {
        let mut attrs = self.attributes.clone();
        attrs
            .set_default("type", "text")
            .set_default("id", self.id.as_str())
            .set_default("name", self.element_name())
            .set_default("value", self.current_value())
            .set_default("class", format!("form-control {}", self.element_class()))
            .set_default("placeholder", self.placeholder_text());

        let prepend = self.prepend.as_deref().unwrap_or(DEFAULT_PREPEND);

        let mut html = String::with_capacity(256);
        html.push_str(r#"<div class="input-group">"#);
        html.push_str(&format!(
            r#"<span class="input-group-prepend"><span class="input-group-text bg-white">{}</span></span>"#,
            prepend
        ));
        html.push_str(&format!("<input {} />", attrs.render()));
        if let Some(append) = &self.append {
            html.push_str(&format!(r#"<span class="input-group-append">{}</span>"#, append));
        }
        html.push_str("</div>");

        if let Some(script) = &self.script {
            html.push_str(&format!("<script>{}</script>", script));
        }

        tracing::trace!(column = %self.column, "rendered text field");
        html
    }
}
