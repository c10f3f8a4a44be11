//! Vega-Lite JSON writer.
//!
//! Each layer of the stack becomes a Vega-Lite layer with inline data:
//!
//! - mark type + mark properties → `mark`
//! - encodings → `encoding` channels (`field`, `type`, optional scheme)
//! - positional axes lose their titles, and the top-level axis config drops
//!   ticks, grid, domain and labels

use serde_json::{Map, Value, json};

use crate::chart::{FieldDef, Layer, LayerStack};

/// Vega-Lite JSON writer.
#[derive(Debug, Clone)]
pub struct VegaLiteWriter {
    schema: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VegaLiteWriter {
    pub fn new() -> Self {
        Self {
            schema: "https://vega.github.io/schema/vega-lite/v5.json".to_string(),
            width: None,
            height: None,
        }
    }

    /// Fix the chart's width and height in pixels.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Convert a layer stack to a Vega-Lite document.
    pub fn write(&self, stack: &LayerStack) -> Value {
        let mut spec = Map::new();
        spec.insert("$schema".to_string(), json!(self.schema));
        if let Some(width) = self.width {
            spec.insert("width".to_string(), json!(width));
        }
        if let Some(height) = self.height {
            spec.insert("height".to_string(), json!(height));
        }
        spec.insert(
            "layer".to_string(),
            Value::Array(stack.iter().map(layer_to_json).collect()),
        );
        spec.insert(
            "config".to_string(),
            json!({
                "axis": {
                    "ticks": false,
                    "grid": false,
                    "domain": false,
                    "labels": false,
                },
                "view": {"stroke": null},
            }),
        );
        Value::Object(spec)
    }

    /// Write the document as a JSON string.
    pub fn write_string(&self, stack: &LayerStack, pretty: bool) -> String {
        let spec = self.write(stack);
        if pretty {
            format!("{spec:#}")
        } else {
            spec.to_string()
        }
    }
}

fn layer_to_json(layer: &Layer) -> Value {
    let mut mark = Map::new();
    mark.insert("type".to_string(), json!(layer.mark().as_str()));
    for (name, value) in layer.properties() {
        mark.insert(name.clone(), value.clone());
    }

    let mut encoding: Map<String, Value> = layer
        .encoding()
        .iter()
        .map(|(channel, def)| (channel.clone(), field_to_json(def)))
        .collect();
    if !layer.tooltip().is_empty() {
        encoding.insert(
            "tooltip".to_string(),
            Value::Array(layer.tooltip().iter().map(field_to_json).collect()),
        );
    }

    json!({
        "data": {"values": layer.table().values()},
        "mark": mark,
        "encoding": encoding,
    })
}

fn field_to_json(def: &FieldDef) -> Value {
    let mut out = Map::new();
    out.insert("field".to_string(), json!(def.field));
    out.insert("type".to_string(), json!(def.field_type.as_str()));
    if def.hide_axis {
        out.insert("axis".to_string(), json!({"title": ""}));
    }
    if let Some(scheme) = &def.scheme {
        out.insert("scale".to_string(), json!({"scheme": scheme}));
    }
    Value::Object(out)
}
