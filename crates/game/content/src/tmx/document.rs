//! TMX parsing into a layered document.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use base64::Engine as _;

use super::gid::{GidRegistry, TransformFlags, decode_cell};
use super::objects::{MapObject, ObjectGroup, parse_properties};
use crate::error::MapError;
use crate::rects::{Rect, merge_cells};

/// One tileset reference: a run of raw gids starting at `first_gid` backed
/// by a source image.
#[derive(Clone, Debug, PartialEq)]
pub struct Tileset {
    pub first_gid: u32,
    pub name: String,
    pub image_source: String,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Absent for external or count-less tilesets; the run is then bounded
    /// only by the next tileset's `first_gid`.
    pub tile_count: Option<u32>,
    pub columns: Option<u32>,
    /// Per-tile property bags keyed by local id (e.g. a `blocker` flag).
    pub tile_properties: HashMap<u32, HashMap<String, super::PropertyValue>>,
}

/// Where an allocated gid draws from: a tileset-local tile plus transform
/// flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRef {
    /// Index into [`TileMapDocument::tilesets`].
    pub tileset: usize,
    pub local_id: u32,
    pub flags: TransformFlags,
}

/// One tile layer: a 2D grid of allocated gids (0 = empty).
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    pub name: String,
    pub visible: bool,
    /// Compositing position, bottom first.
    pub z: usize,
    pub width: u32,
    pub height: u32,
    cells: Vec<u32>,
}

impl TileLayer {
    /// Allocated gid at a cell, with a coordinate-naming diagnostic when the
    /// cell is outside the layer.
    pub fn gid_at(&self, x: u32, y: u32) -> Result<u32, MapError> {
        if x >= self.width || y >= self.height {
            return Err(MapError::OutOfBounds {
                layer: self.name.clone(),
                x,
                y,
            });
        }
        Ok(self.cells[(y * self.width + x) as usize])
    }

    /// Cells holding a non-empty gid.
    pub fn occupied_cells(&self) -> BTreeSet<(i32, i32)> {
        let mut cells = BTreeSet::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[(y * self.width + x) as usize] != 0 {
                    cells.insert((x as i32, y as i32));
                }
            }
        }
        cells
    }
}

/// A parsed tile map: tilesets, layers, object groups, and the GID registry
/// that deduplicates (raw id, transform) pairs.
#[derive(Clone, Debug)]
pub struct TileMapDocument {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    tilesets: Vec<Tileset>,
    layers: Vec<TileLayer>,
    object_groups: Vec<ObjectGroup>,
    registry: GidRegistry,
    /// Parallel to the registry: `sources[gid - 1]` is the tile an allocated
    /// gid draws from.
    sources: Vec<TileRef>,
}

impl TileMapDocument {
    /// Loads and parses a TMX file.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let document = Self::parse(&text, name)?;
        tracing::debug!(
            map = %document.name,
            layers = document.layers.len(),
            gids = document.registry.len(),
            "loaded tile map"
        );
        Ok(document)
    }

    /// Parses TMX text. `name` labels diagnostics and save locations.
    pub fn parse(xml: &str, name: impl Into<String>) -> Result<Self, MapError> {
        let tree = roxmltree::Document::parse(xml)?;
        let map = tree.root_element();

        let mut document = Self {
            name: name.into(),
            width: attr_u32(map, "map", "width")?,
            height: attr_u32(map, "map", "height")?,
            tile_width: attr_u32(map, "map", "tilewidth")?,
            tile_height: attr_u32(map, "map", "tileheight")?,
            tilesets: Vec::new(),
            layers: Vec::new(),
            object_groups: Vec::new(),
            registry: GidRegistry::new(),
            sources: Vec::new(),
        };

        for node in map.children().filter(|node| node.is_element()) {
            match node.tag_name().name() {
                "tileset" => document.parse_tileset(node)?,
                "layer" => document.parse_layer(node)?,
                "objectgroup" => document.parse_object_group(node)?,
                _ => {}
            }
        }
        Ok(document)
    }

    // ===== queries =====

    pub fn tilesets(&self) -> &[Tileset] {
        &self.tilesets
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// Layers that should be drawn, bottom first.
    pub fn visible_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter().filter(|layer| layer.visible)
    }

    pub fn layer(&self, name: &str) -> Result<&TileLayer, MapError> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .ok_or_else(|| MapError::UnknownLayer(name.to_owned()))
    }

    pub fn object_groups(&self) -> &[ObjectGroup] {
        &self.object_groups
    }

    pub fn object_group(&self, name: &str) -> Option<&ObjectGroup> {
        self.object_groups.iter().find(|group| group.name == name)
    }

    pub fn registry(&self) -> &GidRegistry {
        &self.registry
    }

    /// Resolves an allocated gid to its tileset tile and transform.
    pub fn tile_source(&self, gid: u32) -> Result<TileRef, MapError> {
        self.sources
            .get((gid as usize).wrapping_sub(1))
            .copied()
            .ok_or(MapError::UnknownAllocatedGid(gid))
    }

    /// Grid cells blocked by objects (`blocker` type tag, or any object in a
    /// group named `blockers`).
    pub fn collision_cells(&self) -> BTreeSet<(i32, i32)> {
        let mut cells = BTreeSet::new();
        for group in &self.object_groups {
            for object in &group.objects {
                if object.kind == "blocker" || group.name == "blockers" {
                    cells.extend(object.covered_cells(self.tile_width, self.tile_height));
                }
            }
        }
        cells
    }

    /// Collision cells merged into covering pixel rectangles.
    pub fn collision_rects(&self) -> Vec<Rect> {
        merge_cells(&self.collision_cells(), self.tile_width, self.tile_height)
    }

    // ===== parsing =====

    fn parse_tileset(&mut self, node: roxmltree::Node<'_, '_>) -> Result<(), MapError> {
        let first_gid = attr_u32(node, "tileset", "firstgid")?;

        // External tilesets keep their run of gids but contribute no
        // embedded metadata.
        if let Some(source) = node.attribute("source") {
            self.tilesets.push(Tileset {
                first_gid,
                name: source.trim_end_matches(".tsx").to_owned(),
                image_source: source.to_owned(),
                tile_width: self.tile_width,
                tile_height: self.tile_height,
                tile_count: None,
                columns: None,
                tile_properties: HashMap::new(),
            });
            return Ok(());
        }

        let image_source = node
            .children()
            .find(|child| child.has_tag_name("image"))
            .and_then(|image| image.attribute("source"))
            .unwrap_or_default()
            .to_owned();

        let mut tile_properties = HashMap::new();
        for tile in node.children().filter(|child| child.has_tag_name("tile")) {
            let id = attr_u32(tile, "tile", "id")?;
            let properties = parse_properties(tile)?;
            if !properties.is_empty() {
                tile_properties.insert(id, properties);
            }
        }

        self.tilesets.push(Tileset {
            first_gid,
            name: node.attribute("name").unwrap_or_default().to_owned(),
            image_source,
            tile_width: attr_u32_or(node, "tilewidth", self.tile_width)?,
            tile_height: attr_u32_or(node, "tileheight", self.tile_height)?,
            tile_count: attr_u32_opt(node, "tilecount")?,
            columns: attr_u32_opt(node, "columns")?,
            tile_properties,
        });
        Ok(())
    }

    /// Tileset index owning a raw gid, honoring `tilecount` bounds.
    fn tileset_for(&self, raw_gid: u32) -> Option<usize> {
        let mut owner = None;
        for (index, tileset) in self.tilesets.iter().enumerate() {
            if tileset.first_gid <= raw_gid {
                owner = Some(index);
            }
        }
        let index = owner?;
        let tileset = &self.tilesets[index];
        match tileset.tile_count {
            Some(count) if raw_gid >= tileset.first_gid + count => None,
            _ => Some(index),
        }
    }

    fn parse_layer(&mut self, node: roxmltree::Node<'_, '_>) -> Result<(), MapError> {
        let name = node.attribute("name").unwrap_or_default().to_owned();
        let width = attr_u32_or(node, "width", self.width)?;
        let height = attr_u32_or(node, "height", self.height)?;
        let visible = node.attribute("visible") != Some("0");

        let data = node
            .children()
            .find(|child| child.has_tag_name("data"))
            .ok_or(MapError::MissingAttribute {
                element: "layer",
                attribute: "data",
            })?;
        let raw_cells = decode_layer_data(data, &name)?;

        let expected = (width * height) as usize;
        if raw_cells.len() != expected {
            return Err(MapError::LayerSize {
                layer: name,
                expected,
                actual: raw_cells.len(),
            });
        }

        // Register every non-empty cell, failing fast on gids no tileset
        // covers; this is an authoring bug, not a runtime condition.
        let mut cells = Vec::with_capacity(raw_cells.len());
        for (index, raw) in raw_cells.into_iter().enumerate() {
            let (raw_gid, flags) = decode_cell(raw);
            if raw_gid == 0 {
                cells.push(0);
                continue;
            }
            let x = index as u32 % width;
            let y = index as u32 / width;
            let tileset = self
                .tileset_for(raw_gid)
                .ok_or_else(|| MapError::UnknownGid {
                    layer: name.clone(),
                    x,
                    y,
                    raw_gid,
                })?;
            let gid = self.registry.register(raw_gid, flags);
            if gid as usize > self.sources.len() {
                self.sources.push(TileRef {
                    tileset,
                    local_id: raw_gid - self.tilesets[tileset].first_gid,
                    flags,
                });
            }
            cells.push(gid);
        }

        self.layers.push(TileLayer {
            name,
            visible,
            z: self.layers.len(),
            width,
            height,
            cells,
        });
        Ok(())
    }

    fn parse_object_group(&mut self, node: roxmltree::Node<'_, '_>) -> Result<(), MapError> {
        let mut group = ObjectGroup {
            name: node.attribute("name").unwrap_or_default().to_owned(),
            objects: Vec::new(),
        };
        for object in node
            .children()
            .filter(|child| child.has_tag_name("object"))
        {
            group.objects.push(MapObject {
                id: attr_u32_or(object, "id", 0)?,
                name: object.attribute("name").unwrap_or_default().to_owned(),
                kind: object
                    .attribute("type")
                    .or_else(|| object.attribute("class"))
                    .unwrap_or_default()
                    .to_owned(),
                x: attr_f32_or(object, "x", 0.0)?,
                y: attr_f32_or(object, "y", 0.0)?,
                width: attr_f32_or(object, "width", 0.0)?,
                height: attr_f32_or(object, "height", 0.0)?,
                properties: parse_properties(object)?,
            });
        }
        self.object_groups.push(group);
        Ok(())
    }
}

/// Decodes a `<data>` element into raw cell values.
fn decode_layer_data(
    data: roxmltree::Node<'_, '_>,
    layer: &str,
) -> Result<Vec<u32>, MapError> {
    match data.attribute("encoding") {
        // Plain XML: one <tile gid="..."/> child per cell.
        None => data
            .children()
            .filter(|child| child.has_tag_name("tile"))
            .map(|tile| match tile.attribute("gid") {
                None => Ok(0),
                Some(gid) => gid.parse().map_err(|_| MapError::InvalidAttribute {
                    element: "tile",
                    attribute: "gid",
                    value: gid.to_owned(),
                }),
            })
            .collect(),
        Some("csv") => data
            .text()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse().map_err(|_| MapError::InvalidAttribute {
                    element: "data",
                    attribute: "csv",
                    value: token.to_owned(),
                })
            })
            .collect(),
        Some("base64") => {
            let text = data.text().unwrap_or_default().trim();
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(text)
                .map_err(|source| MapError::Base64 {
                    layer: layer.to_owned(),
                    source,
                })?;
            let bytes = match data.attribute("compression") {
                None => bytes,
                Some("zlib") => {
                    let mut inflated = Vec::new();
                    flate2::read::ZlibDecoder::new(bytes.as_slice())
                        .read_to_end(&mut inflated)
                        .map_err(|source| MapError::Zlib {
                            layer: layer.to_owned(),
                            source,
                        })?;
                    inflated
                }
                Some(other) => {
                    return Err(MapError::UnsupportedEncoding {
                        layer: layer.to_owned(),
                        encoding: format!("base64+{other}"),
                    });
                }
            };
            Ok(bytes
                .chunks_exact(4)
                .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                .collect())
        }
        Some(other) => Err(MapError::UnsupportedEncoding {
            layer: layer.to_owned(),
            encoding: other.to_owned(),
        }),
    }
}

fn attr_u32(
    node: roxmltree::Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<u32, MapError> {
    let value = node.attribute(attribute).ok_or(MapError::MissingAttribute {
        element,
        attribute,
    })?;
    value.parse().map_err(|_| MapError::InvalidAttribute {
        element,
        attribute,
        value: value.to_owned(),
    })
}

fn attr_u32_or(
    node: roxmltree::Node<'_, '_>,
    attribute: &'static str,
    default: u32,
) -> Result<u32, MapError> {
    match node.attribute(attribute) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| MapError::InvalidAttribute {
            element: "node",
            attribute,
            value: value.to_owned(),
        }),
    }
}

fn attr_u32_opt(
    node: roxmltree::Node<'_, '_>,
    attribute: &'static str,
) -> Result<Option<u32>, MapError> {
    node.attribute(attribute)
        .map(|value| {
            value.parse().map_err(|_| MapError::InvalidAttribute {
                element: "tileset",
                attribute,
                value: value.to_owned(),
            })
        })
        .transpose()
}

fn attr_f32_or(
    node: roxmltree::Node<'_, '_>,
    attribute: &'static str,
    default: f32,
) -> Result<f32, MapError> {
    match node.attribute(attribute) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| MapError::InvalidAttribute {
            element: "object",
            attribute,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<map version="1.0" orientation="orthogonal" width="3" height="2" tilewidth="32" tileheight="32">
  <tileset firstgid="1" name="terrain" tilewidth="32" tileheight="32" tilecount="8" columns="4">
    <image source="terrain.png" width="128" height="64"/>
    <tile id="3">
      <properties>
        <property name="blocker" type="bool" value="true"/>
      </properties>
    </tile>
  </tileset>
  <layer name="ground" width="3" height="2">
    <data encoding="csv">
      1,1,2,
      2,0,2147483649
    </data>
  </layer>
  <objectgroup name="blockers">
    <object id="7" x="0" y="0" width="64" height="32"/>
    <object id="8" x="64" y="32" width="32" height="32"/>
  </objectgroup>
  <objectgroup name="spawns">
    <object id="9" name="start" type="player" x="32" y="32">
      <properties>
        <property name="tier" type="int" value="2"/>
      </properties>
    </object>
  </objectgroup>
</map>
"#;

    #[test]
    fn parses_dimensions_layers_and_groups() {
        let doc = TileMapDocument::parse(SAMPLE, "sample").expect("parse");
        assert_eq!((doc.width, doc.height), (3, 2));
        assert_eq!(doc.layers().len(), 1);
        assert_eq!(doc.visible_layers().count(), 1);
        assert_eq!(doc.object_groups().len(), 2);
        assert!(doc.layer("missing").is_err());
    }

    #[test]
    fn layer_occupied_cells_feed_the_rect_merger() {
        let doc = TileMapDocument::parse(SAMPLE, "sample").expect("parse");
        let layer = doc.layer("ground").expect("ground layer");
        // Five of six cells hold a tile; only (1, 1) is empty.
        let occupied = layer.occupied_cells();
        assert_eq!(occupied.len(), 5);
        assert!(!occupied.contains(&(1, 1)));

        let rects = merge_cells(&occupied, doc.tile_width, doc.tile_height);
        let covered: u32 = rects.iter().map(|r| (r.width / 32) * (r.height / 32)).sum();
        assert_eq!(covered, 5);
    }

    #[test]
    fn identical_cells_share_an_allocated_gid() {
        let doc = TileMapDocument::parse(SAMPLE, "sample").expect("parse");
        let layer = doc.layer("ground").expect("ground layer");
        // Two raw-1 cells collapse onto one allocation, three distinct
        // (raw, flags) pairs in total.
        assert_eq!(layer.gid_at(0, 0).unwrap(), layer.gid_at(1, 0).unwrap());
        assert_eq!(doc.registry().len(), 3);
        assert_eq!(layer.gid_at(1, 1).unwrap(), 0);
    }

    #[test]
    fn flipped_cells_allocate_their_own_gid() {
        let doc = TileMapDocument::parse(SAMPLE, "sample").expect("parse");
        let layer = doc.layer("ground").expect("ground layer");
        // Cell (2,1) is raw gid 1 with the horizontal-flip bit set.
        let flipped = layer.gid_at(2, 1).unwrap();
        assert_ne!(flipped, layer.gid_at(0, 0).unwrap());
        let source = doc.tile_source(flipped).expect("source");
        assert_eq!(source.local_id, 0);
        assert_eq!(source.flags, TransformFlags::HORIZONTAL);
    }

    #[test]
    fn unknown_raw_gid_aborts_the_load_with_coordinates() {
        let bad = SAMPLE.replace("2147483649", "999");
        let err = TileMapDocument::parse(&bad, "sample").unwrap_err();
        match err {
            MapError::UnknownGid { layer, x, y, raw_gid } => {
                assert_eq!(layer, "ground");
                assert_eq!((x, y), (2, 1));
                assert_eq!(raw_gid, 999);
            }
            other => panic!("expected UnknownGid, got {other}"),
        }
    }

    #[test]
    fn out_of_bounds_lookup_names_the_cell() {
        let doc = TileMapDocument::parse(SAMPLE, "sample").expect("parse");
        let layer = doc.layer("ground").expect("ground layer");
        assert!(matches!(
            layer.gid_at(3, 0),
            Err(MapError::OutOfBounds { x: 3, y: 0, .. })
        ));
    }

    #[test]
    fn collision_rects_cover_blockers() {
        let doc = TileMapDocument::parse(SAMPLE, "sample").expect("parse");
        let cells = doc.collision_cells();
        assert_eq!(cells, BTreeSet::from([(0, 0), (1, 0), (2, 1)]));
        let rects = doc.collision_rects();
        let covered: u32 = rects.iter().map(|r| (r.width / 32) * (r.height / 32)).sum();
        assert_eq!(covered, 3);
    }

    #[test]
    fn base64_and_zlib_payloads_decode() {
        use base64::Engine as _;
        use flate2::{Compression, write::ZlibEncoder};
        use std::io::Write as _;

        let cells: [u32; 4] = [1, 2, 0, 1];
        let bytes: Vec<u8> = cells.iter().flat_map(|c| c.to_le_bytes()).collect();

        let plain = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bytes).expect("deflate");
        let deflated = base64::engine::general_purpose::STANDARD
            .encode(encoder.finish().expect("finish"));

        for (encoding, payload) in [
            (r#"encoding="base64""#, plain),
            (r#"encoding="base64" compression="zlib""#, deflated),
        ] {
            let xml = format!(
                r#"<map width="2" height="2" tilewidth="32" tileheight="32">
                     <tileset firstgid="1" name="t" tilecount="4">
                       <image source="t.png"/>
                     </tileset>
                     <layer name="ground" width="2" height="2">
                       <data {encoding}>{payload}</data>
                     </layer>
                   </map>"#
            );
            let doc = TileMapDocument::parse(&xml, "packed").expect("parse");
            let layer = doc.layer("ground").expect("layer");
            assert_eq!(layer.gid_at(0, 0).unwrap(), layer.gid_at(1, 1).unwrap());
            assert_eq!(layer.gid_at(0, 1).unwrap(), 0);
        }
    }

    #[test]
    fn load_reads_from_disk_and_names_the_map() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("village.tmx");
        std::fs::write(&path, SAMPLE).expect("write map");

        let doc = TileMapDocument::load(&path).expect("load");
        assert_eq!(doc.name, "village");
        assert!(matches!(
            TileMapDocument::load(&dir.path().join("missing.tmx")),
            Err(MapError::Io { .. })
        ));
    }

    #[test]
    fn property_bags_carry_typed_values() {
        let doc = TileMapDocument::parse(SAMPLE, "sample").expect("parse");
        let spawns = doc.object_group("spawns").expect("spawns group");
        let start = spawns.of_kind("player").next().expect("player spawn");
        assert_eq!(start.property("tier").and_then(|p| p.as_int()), Some(2));

        let terrain = &doc.tilesets()[0];
        let blocker = terrain.tile_properties[&3]["blocker"].as_bool();
        assert_eq!(blocker, Some(true));
    }
}
