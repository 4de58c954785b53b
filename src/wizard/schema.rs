//! Declarative form schemas and the numeric coercion policy.
//!
//! Every wizard field is declared once with its kind. Numeric kinds carry
//! the value used when the input is blank, unparsable, or zero, so the
//! coercion rules live here instead of at each submit site.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// What a numeric field becomes when the input does not yield a usable number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Zero,
    Null,
}

impl Fallback {
    fn value(self) -> Value {
        match self {
            Fallback::Zero => Value::from(0),
            Fallback::Null => Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// `YYYY-MM-DD`; blank becomes `null`.
    Date,
    Integer(Fallback),
    Float(Fallback),
    /// Multi-select list of strings.
    MultiSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub step: u8,
    pub required: bool,
    /// Suggested choices, shown for select and multi-select fields.
    pub options: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind, step: u8) -> Self {
        Self {
            name,
            label,
            kind,
            step,
            required: false,
            options: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }
}

pub fn find(fields: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    fields.iter().find(|spec| spec.name == name)
}

/// Leading-integer parse: optional whitespace and sign, then digits,
/// ignoring anything after them. `" 42px"` is 42, `"3.9"` is 3.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Leading-decimal parse: optional whitespace and sign, digits with an
/// optional fraction and exponent, ignoring anything after them.
/// Non-finite results are rejected.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts raw form input to the JSON value sent for a field of `kind`.
///
/// Never fails. Zero collapses into the fallback just like a blank entry.
pub fn coerce(kind: FieldKind, raw: &str) -> Value {
    match kind {
        FieldKind::Text => Value::String(raw.to_string()),
        FieldKind::Date => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::String(trimmed.to_string())
            }
        }
        FieldKind::Integer(fallback) => match parse_int_prefix(raw) {
            Some(n) if n != 0 => Value::from(n),
            _ => fallback.value(),
        },
        FieldKind::Float(fallback) => match parse_float_prefix(raw).and_then(Number::from_f64) {
            Some(n) if n.as_f64() != Some(0.0) => Value::Number(n),
            _ => fallback.value(),
        },
        FieldKind::MultiSelect => Value::Array(
            split_selection(raw)
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
    }
}

/// Comma-separated selection, trimmed, blanks dropped.
pub fn split_selection(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw values for one schema, as typed by the user.
#[derive(Debug, Clone)]
pub struct FormSection {
    fields: &'static [FieldSpec],
    values: BTreeMap<&'static str, String>,
    selections: BTreeMap<&'static str, Vec<String>>,
}

impl FormSection {
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        Self {
            fields,
            values: BTreeMap::new(),
            selections: BTreeMap::new(),
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        find(self.fields, name)
    }

    /// Sets a field from raw text. Multi-select fields take a
    /// comma-separated list. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let Some(spec) = self.spec(name) else {
            return false;
        };
        if spec.kind == FieldKind::MultiSelect {
            self.selections.insert(spec.name, split_selection(value));
        } else {
            self.values.insert(spec.name, value.to_string());
        }
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn selection(&self, name: &str) -> &[String] {
        self.selections.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Adds or removes one option of a multi-select field.
    /// Returns `false` for unknown or non-multi-select names.
    pub fn toggle(&mut self, name: &str, option: &str, checked: bool) -> bool {
        let Some(spec) = self.spec(name).filter(|s| s.kind == FieldKind::MultiSelect) else {
            return false;
        };
        let selected = self.selections.entry(spec.name).or_default();
        if checked {
            selected.push(option.to_string());
        } else {
            selected.retain(|item| item != option);
        }
        true
    }

    /// Required fields left blank, in schema order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| match spec.kind {
                FieldKind::MultiSelect => self.selection(spec.name).is_empty(),
                _ => self.get(spec.name).map_or(true, |v| v.trim().is_empty()),
            })
            .map(|spec| spec.name)
            .collect()
    }

    /// Coerced JSON object with every schema field present.
    pub fn to_json(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|spec| {
                let value = match spec.kind {
                    FieldKind::MultiSelect => Value::Array(
                        self.selection(spec.name)
                            .iter()
                            .cloned()
                            .map(Value::String)
                            .collect(),
                    ),
                    kind => coerce(kind, self.get(spec.name).unwrap_or("")),
                };
                (spec.name.to_string(), value)
            })
            .collect()
    }
}
