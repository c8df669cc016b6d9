//! Hotspot interchange formats.
//!
//! Two formats are supported:
//!
//! - **Options**: JSON array of zones, each an array of `[x, y]` pairs. This
//!   is what the editor imports and exports. Zones with fewer than three
//!   points load open, everything else loads closed.
//! - **Documents**: KDL, carrying the canvas size, zone ids and explicit
//!   closed flags alongside the points.
//!
//! # Document Format
//!
//! ```kdl
//! hotspots version="0.1" width=800.0 height=600.0 {
//!   zone "0b3e7d9c-5a51-4a8e-9f0e-0c8f7f0a1b2c" closed=#true {
//!     point 10.0 10.0
//!     point 110.0 10.0
//!     point 110.0 110.0
//!   }
//! }
//! ```

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use std::path::Path;
use zone::{CanvasSize, Point, Zone, ZoneId, ZoneOption};

pub const FORMAT_VERSION: &str = "0.1";

/// Error type for interchange operations.
#[derive(Debug)]
pub enum InterchangeError {
    Parse(String),
    InvalidStructure(String),
    MissingField(String),
    InvalidValue(String),
    Io(String),
}

impl std::fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::InvalidStructure(msg) => write!(f, "Invalid structure: {}", msg),
            Self::MissingField(msg) => write!(f, "Missing field: {}", msg),
            Self::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for InterchangeError {}

// === Options (JSON) ===

/// Parse a JSON option array.
pub fn parse_options(input: &str) -> Result<Vec<ZoneOption>, InterchangeError> {
    let zones: Vec<ZoneOption> =
        serde_json::from_str(input).map_err(|e| InterchangeError::Parse(e.to_string()))?;
    for (i, zone) in zones.iter().enumerate() {
        if let Some([x, y]) = zone.iter().find(|[x, y]| !x.is_finite() || !y.is_finite()) {
            return Err(InterchangeError::InvalidValue(format!(
                "zone {} has non-finite point ({}, {})",
                i, x, y
            )));
        }
    }
    Ok(zones)
}

/// Serialize zones as a pretty-printed JSON option array.
pub fn options_to_json(zones: &[ZoneOption]) -> String {
    // Plain nested arrays of floats always serialize.
    serde_json::to_string_pretty(zones).unwrap_or_else(|_| "[]".to_string())
}

// === Documents (KDL) ===

/// A hotspot document that can be serialized to/from KDL.
#[derive(Debug, Clone)]
pub struct Document {
    pub version: String,
    pub size: CanvasSize,
    pub zones: Vec<Zone>,
}

impl Document {
    pub fn new(size: CanvasSize, zones: Vec<Zone>) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            size,
            zones,
        }
    }

    /// Build a document from exported options.
    pub fn from_options(size: CanvasSize, options: &[ZoneOption]) -> Self {
        Self::new(size, options.iter().map(|o| Zone::from_option(o)).collect())
    }

    /// Zones as exported options, in order.
    pub fn to_options(&self) -> Vec<ZoneOption> {
        self.zones.iter().map(Zone::to_option).collect()
    }

    /// Serialize the document to a KDL string.
    pub fn to_kdl(&self) -> String {
        let mut doc = KdlDocument::new();

        let mut root = KdlNode::new("hotspots");
        root.push(KdlEntry::new_prop("version", self.version.clone()));
        root.push(KdlEntry::new_prop("width", self.size.width() as f64));
        root.push(KdlEntry::new_prop("height", self.size.height() as f64));

        let children = root.children_mut().get_or_insert_with(KdlDocument::new);
        for zone in &self.zones {
            children.nodes_mut().push(zone_to_kdl(zone));
        }

        doc.nodes_mut().push(root);
        doc.autoformat();
        doc.to_string()
    }

    /// Parse a document from a KDL string.
    pub fn from_kdl(input: &str) -> Result<Self, InterchangeError> {
        let doc: KdlDocument = input
            .parse()
            .map_err(|e| InterchangeError::Parse(format!("{}", e)))?;

        let root = doc
            .get("hotspots")
            .ok_or_else(|| InterchangeError::InvalidStructure("Missing 'hotspots' node".into()))?;

        let version = root
            .get("version")
            .and_then(|v| v.as_string())
            .map(|s| s.to_string())
            .unwrap_or_else(|| FORMAT_VERSION.to_string());
        if version != FORMAT_VERSION {
            log::warn!("reading document version {}, expected {}", version, FORMAT_VERSION);
        }

        let width = get_f32_prop(root, "width")
            .ok_or_else(|| InterchangeError::MissingField("width".into()))?;
        let height = get_f32_prop(root, "height")
            .ok_or_else(|| InterchangeError::MissingField("height".into()))?;

        let mut zones = Vec::new();
        if let Some(children) = root.children() {
            for node in children.nodes() {
                match node.name().value() {
                    "zone" => zones.push(parse_zone(node)?),
                    other => {
                        return Err(InterchangeError::InvalidStructure(format!(
                            "Unexpected node: {}",
                            other
                        )))
                    }
                }
            }
        }

        Ok(Self {
            version,
            size: CanvasSize::new(width, height),
            zones,
        })
    }
}

fn zone_to_kdl(zone: &Zone) -> KdlNode {
    let mut node = KdlNode::new("zone");

    // Full UUID for round-trip fidelity
    node.push(KdlEntry::new(zone.id.to_uuid_string()));
    node.push(KdlEntry::new_prop("closed", zone.closed));

    let children = node.children_mut().get_or_insert_with(KdlDocument::new);
    for point in &zone.points {
        let mut point_node = KdlNode::new("point");
        point_node.push(KdlEntry::new(point.x() as f64));
        point_node.push(KdlEntry::new(point.y() as f64));
        children.nodes_mut().push(point_node);
    }

    if zone.points.is_empty() {
        *node.children_mut() = None;
    }

    node
}

fn parse_zone(node: &KdlNode) -> Result<Zone, InterchangeError> {
    let id = node
        .entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .and_then(ZoneId::parse)
        .unwrap_or_else(ZoneId::new);

    let closed = node
        .get("closed")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);

    let mut points = Vec::new();
    if let Some(children) = node.children() {
        for child in children.nodes() {
            if child.name().value() != "point" {
                return Err(InterchangeError::InvalidStructure(format!(
                    "Unexpected node in zone: {}",
                    child.name().value()
                )));
            }
            let coords: Vec<f32> = child
                .entries()
                .iter()
                .filter(|e| e.name().is_none())
                .map(|e| {
                    value_as_f32(e.value()).ok_or_else(|| {
                        InterchangeError::InvalidValue(format!("point coordinate {:?}", e.value()))
                    })
                })
                .collect::<Result<_, _>>()?;
            match coords.as_slice() {
                [x, y] => points.push(Point::new(*x, *y)),
                _ => {
                    return Err(InterchangeError::InvalidStructure(format!(
                        "point needs 2 coordinates, got {}",
                        coords.len()
                    )))
                }
            }
        }
    }

    let mut zone = Zone::new(points, closed);
    zone.id = id;
    Ok(zone)
}

fn value_as_f32(value: &KdlValue) -> Option<f32> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
        .map(|v| v as f32)
        .filter(|v| v.is_finite())
}

fn get_f32_prop(node: &KdlNode, name: &str) -> Option<f32> {
    node.get(name).and_then(value_as_f32)
}

// === Files ===

/// On-disk format, picked by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Options,
    Document,
}

impl Format {
    /// `.kdl` is a document, anything else is treated as JSON options.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("kdl") => Format::Document,
            _ => Format::Options,
        }
    }
}

/// Load a file in either format. Options files have no size, so `size` is
/// used for them.
pub fn load(path: impl AsRef<Path>, size: CanvasSize) -> Result<Document, InterchangeError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| InterchangeError::Io(format!("{}: {}", path.display(), e)))?;
    match Format::from_path(path) {
        Format::Document => Document::from_kdl(&contents),
        Format::Options => Ok(Document::from_options(size, &parse_options(&contents)?)),
    }
}

/// Save a document in the format its path implies.
pub fn save(path: impl AsRef<Path>, document: &Document) -> Result<(), InterchangeError> {
    let path = path.as_ref();
    let contents = match Format::from_path(path) {
        Format::Document => document.to_kdl(),
        Format::Options => options_to_json(&document.to_options()),
    };
    std::fs::write(path, contents)
        .map_err(|e| InterchangeError::Io(format!("{}: {}", path.display(), e)))
}
