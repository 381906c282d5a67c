//! Object groups: spawn points, portals, blockers, triggers.

use std::collections::HashMap;

use crate::error::MapError;

/// A typed value from a TMX property bag.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    fn parse(kind: Option<&str>, value: &str) -> Result<Self, MapError> {
        let invalid = || MapError::InvalidAttribute {
            element: "property",
            attribute: "value",
            value: value.to_owned(),
        };
        Ok(match kind {
            Some("bool") => PropertyValue::Bool(value == "true"),
            Some("int") => PropertyValue::Int(value.parse().map_err(|_| invalid())?),
            Some("float") => PropertyValue::Float(value.parse().map_err(|_| invalid())?),
            // TMX omits the type attribute for strings.
            _ => PropertyValue::String(value.to_owned()),
        })
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }
}

/// One placed object: a type tag, a pixel rectangle, and an open property
/// bag.
#[derive(Clone, Debug, PartialEq)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    /// The object's `type`/`class` tag, e.g. `"portal"` or `"blocker"`.
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub properties: HashMap<String, PropertyValue>,
}

impl MapObject {
    /// Grid cells this object's rectangle overlaps.
    pub fn covered_cells(&self, cell_width: u32, cell_height: u32) -> Vec<(i32, i32)> {
        let cw = cell_width.max(1) as f32;
        let ch = cell_height.max(1) as f32;
        let x0 = (self.x / cw).floor() as i32;
        let y0 = (self.y / ch).floor() as i32;
        // Degenerate (point) objects still cover their own cell.
        let x1 = ((self.x + self.width.max(1.0) - 1.0) / cw).floor() as i32;
        let y1 = ((self.y + self.height.max(1.0) - 1.0) / ch).floor() as i32;

        let mut cells = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                cells.push((x, y));
            }
        }
        cells
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

/// Unordered collection of placed objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectGroup {
    pub name: String,
    pub objects: Vec<MapObject>,
}

impl ObjectGroup {
    /// Objects carrying the given type tag.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a MapObject> {
        self.objects.iter().filter(move |object| object.kind == kind)
    }
}

/// Parses a `<properties>` child element into a property bag.
pub(crate) fn parse_properties(
    node: roxmltree::Node<'_, '_>,
) -> Result<HashMap<String, PropertyValue>, MapError> {
    let mut properties = HashMap::new();
    let Some(container) = node
        .children()
        .find(|child| child.has_tag_name("properties"))
    else {
        return Ok(properties);
    };
    for property in container
        .children()
        .filter(|child| child.has_tag_name("property"))
    {
        let name = property
            .attribute("name")
            .ok_or(MapError::MissingAttribute {
                element: "property",
                attribute: "name",
            })?;
        let value = property.attribute("value").unwrap_or_default();
        properties.insert(
            name.to_owned(),
            PropertyValue::parse(property.attribute("type"), value)?,
        );
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(x: f32, y: f32, width: f32, height: f32) -> MapObject {
        MapObject {
            id: 1,
            name: String::new(),
            kind: "blocker".into(),
            x,
            y,
            width,
            height,
            properties: HashMap::new(),
        }
    }

    #[test]
    fn covered_cells_spans_the_rectangle() {
        let cells = object(32.0, 32.0, 64.0, 32.0).covered_cells(32, 32);
        assert_eq!(cells, vec![(1, 1), (2, 1)]);
    }

    #[test]
    fn point_objects_cover_their_own_cell() {
        let cells = object(40.0, 70.0, 0.0, 0.0).covered_cells(32, 32);
        assert_eq!(cells, vec![(1, 2)]);
    }
}
