use anyhow::Context;
use reqwest::blocking::multipart;

use crate::{
    assets::library::{AssetFile, SlotKind},
    foundation::error::DrapeResult,
    mapping::quad::Quad,
    request::options::RenderOptions,
};

/// One multipart field of a mockup request.
#[derive(Clone, Debug)]
pub enum FormField {
    /// Binary upload.
    File {
        /// Field name.
        name: &'static str,
        /// Uploaded asset.
        file: AssetFile,
    },
    /// Plain text value.
    Text {
        /// Field name.
        name: &'static str,
        /// Encoded value.
        value: String,
    },
}

impl FormField {
    /// Field name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::File { name, .. } | Self::Text { name, .. } => *name,
        }
    }
}

/// Everything one submission sends: both assets, the native-space quad, and clamped options.
#[derive(Clone, Debug)]
pub struct MockupRequest {
    base: AssetFile,
    design: AssetFile,
    quad: Quad,
    options: RenderOptions,
}

impl MockupRequest {
    /// Assemble a request. `options` are clamped here, whatever the caller set.
    pub fn new(base: AssetFile, design: AssetFile, quad: Quad, options: RenderOptions) -> Self {
        Self {
            base,
            design,
            quad,
            options: options.clamped(),
        }
    }

    /// Base asset.
    pub fn base(&self) -> &AssetFile {
        &self.base
    }

    /// Design asset.
    pub fn design(&self) -> &AssetFile {
        &self.design
    }

    /// Native-space quad.
    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    /// Clamped options.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Fields in wire order.
    pub fn fields(&self) -> Vec<FormField> {
        let mut out = vec![
            FormField::File {
                name: SlotKind::Base.form_field(),
                file: self.base.clone(),
            },
            FormField::File {
                name: SlotKind::Design.form_field(),
                file: self.design.clone(),
            },
            FormField::Text {
                name: "points",
                value: self.quad.to_points_field(),
            },
        ];
        out.extend(
            self.options
                .form_fields()
                .into_iter()
                .map(|(name, value)| FormField::Text { name, value }),
        );
        out
    }

    /// Value of text field `name`, if present.
    pub fn text_field(&self, name: &str) -> Option<String> {
        self.fields().into_iter().find_map(|f| match f {
            FormField::Text { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }

    /// Build the multipart body.
    pub fn to_multipart(&self) -> DrapeResult<multipart::Form> {
        let mut form = multipart::Form::new();
        for field in self.fields() {
            form = match field {
                FormField::File { name, file } => {
                    let part = multipart::Part::bytes(file.bytes().to_vec())
                        .file_name(file.name().to_string())
                        .mime_str(file.mime())
                        .with_context(|| format!("set mime for '{name}'"))?;
                    form.part(name, part)
                }
                FormField::Text { name, value } => form.text(name, value),
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/form.rs"]
mod tests;
