//! Field content types and collection schemes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{is_blank, ItemsError, Result};

/// Content type the service assigns to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    GeneralAuto,
    GeneralString,
    GeneralText,
    GeneralNumber,
    GeneralInteger,
    GeneralBoolean,
    GeneralDate,
    GeneralUrl,
    GeneralEmail,
    GeneralId,
    GeneralIgnore,
    ProductName,
    ProductDescription,
    ProductCategory,
    ProductManufacturer,
    ProductPrice,
    ProductEan,
    ProductSku,
    ProductColor,
    ProductSize,
    ProductImage,
}

impl ContentType {
    /// Tag used when a field has no declared type
    pub const GENERAL_AUTO: ContentType = ContentType::GeneralAuto;

    const ALL: [ContentType; 21] = [
        ContentType::GeneralAuto,
        ContentType::GeneralString,
        ContentType::GeneralText,
        ContentType::GeneralNumber,
        ContentType::GeneralInteger,
        ContentType::GeneralBoolean,
        ContentType::GeneralDate,
        ContentType::GeneralUrl,
        ContentType::GeneralEmail,
        ContentType::GeneralId,
        ContentType::GeneralIgnore,
        ContentType::ProductName,
        ContentType::ProductDescription,
        ContentType::ProductCategory,
        ContentType::ProductManufacturer,
        ContentType::ProductPrice,
        ContentType::ProductEan,
        ContentType::ProductSku,
        ContentType::ProductColor,
        ContentType::ProductSize,
        ContentType::ProductImage,
    ];

    /// Every known content type
    pub fn all() -> &'static [ContentType] {
        &Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::GeneralAuto => "general_auto",
            ContentType::GeneralString => "general_string",
            ContentType::GeneralText => "general_text",
            ContentType::GeneralNumber => "general_number",
            ContentType::GeneralInteger => "general_integer",
            ContentType::GeneralBoolean => "general_boolean",
            ContentType::GeneralDate => "general_date",
            ContentType::GeneralUrl => "general_url",
            ContentType::GeneralEmail => "general_email",
            ContentType::GeneralId => "general_id",
            ContentType::GeneralIgnore => "general_ignore",
            ContentType::ProductName => "product_name",
            ContentType::ProductDescription => "product_description",
            ContentType::ProductCategory => "product_category",
            ContentType::ProductManufacturer => "product_manufacturer",
            ContentType::ProductPrice => "product_price",
            ContentType::ProductEan => "product_ean",
            ContentType::ProductSku => "product_sku",
            ContentType::ProductColor => "product_color",
            ContentType::ProductSize => "product_size",
            ContentType::ProductImage => "product_image",
        }
    }

    /// Look up a tag. A blank tag (`""` or `"0"`) resolves to
    /// [`ContentType::GENERAL_AUTO`].
    pub fn parse(tag: &str) -> Result<Self> {
        if is_blank(tag) {
            return Ok(Self::GENERAL_AUTO);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| ItemsError::UnknownType(tag.to_string()))
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated field-to-type mapping of a collection
///
/// A `Scheme` is never empty and only holds known content types, so holding
/// one is proof that validation passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Scheme(BTreeMap<String, ContentType>);

impl Scheme {
    /// Validate raw `(field, type tag)` pairs
    ///
    /// Empty tags become `general_auto`. The first unknown tag rejects the
    /// whole scheme.
    pub fn validate<I, K, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut scheme = BTreeMap::new();
        for (field, tag) in fields {
            scheme.insert(field.into(), ContentType::parse(tag.as_ref())?);
        }
        if scheme.is_empty() {
            return Err(ItemsError::EmptyScheme);
        }
        Ok(Scheme(scheme))
    }

    /// Validate a scheme given as a JSON object
    ///
    /// A falsy type (`null`, `false`, `0`, `""`, `"0"`) counts as missing and
    /// becomes `general_auto`. Any other non-string type is unknown. A falsy
    /// or empty scheme is `EmptyScheme`; any other non-object is rejected
    /// as `InvalidScheme`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other if is_falsy(other) => return Err(ItemsError::EmptyScheme),
            Value::Array(list) if list.is_empty() => return Err(ItemsError::EmptyScheme),
            other => return Err(ItemsError::InvalidScheme(other.to_string())),
        };
        let mut fields = Vec::with_capacity(map.len());
        for (field, tag) in map {
            let tag = match tag {
                Value::String(s) => s.clone(),
                other if is_falsy(other) => String::new(),
                other => return Err(ItemsError::UnknownType(other.to_string())),
            };
            fields.push((field.clone(), tag));
        }
        Scheme::validate(fields)
    }

    pub fn get(&self, field: &str) -> Option<ContentType> {
        self.0.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated scheme
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ContentType)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => is_blank(s),
        _ => false,
    }
}

impl<'de> Deserialize<'de> for Scheme {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Scheme::from_value(&value).map_err(serde::de::Error::custom)
    }
}
