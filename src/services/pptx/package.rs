//! In-memory view of a `.pptx` (OPC) package.
//!
//! Part names are zip entry names without a leading slash, e.g.
//! `ppt/slideLayouts/slideLayout1.xml`.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use sha2::{Digest, Sha256};
use zip::ZipArchive;

use super::error::PackageError;

pub const RT_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const RT_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub const RT_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

const DEFAULT_PRESENTATION_PART: &str = "ppt/presentation.xml";

/// A relationship from one part to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    /// Resolved part name, or the raw target for external relationships.
    pub target: String,
    pub external: bool,
}

/// All parts of a package, in archive order.
#[derive(Debug, Clone)]
pub struct PptxPackage {
    parts: Vec<(String, Vec<u8>)>,
    digest: String,
}

impl PptxPackage {
    pub fn open(path: &Path) -> Result<Self, PackageError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, PackageError> {
        let digest = format!("{:x}", Sha256::digest(&bytes));
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().trim_start_matches('/').to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            parts.push((name, data));
        }

        Ok(Self { parts, digest })
    }

    /// SHA-256 of the package bytes, identifying the template a layout came from.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.iter().find(|(part, _)| part == name).map(|(_, data)| data.as_slice())
    }

    pub fn require_part(&self, name: &str) -> Result<&[u8], PackageError> {
        self.part(name).ok_or_else(|| PackageError::MissingPart(name.to_string()))
    }

    pub fn require_part_str(&self, name: &str) -> Result<&str, PackageError> {
        std::str::from_utf8(self.require_part(name)?).map_err(|e| PackageError::xml(name, e))
    }

    pub fn parts(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.parts.iter().map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    /// The presentation part, located through the package relationships.
    pub fn main_document_part(&self) -> Result<String, PackageError> {
        let main = self
            .relationships("")?
            .into_iter()
            .find(|rel| rel.rel_type == RT_OFFICE_DOCUMENT && !rel.external)
            .map(|rel| rel.target)
            .unwrap_or_else(|| DEFAULT_PRESENTATION_PART.to_string());
        Ok(main)
    }

    /// Relationships of `source_part` (`""` for the package itself); empty when it has none.
    pub fn relationships(&self, source_part: &str) -> Result<Vec<Relationship>, PackageError> {
        let rels_part = rels_part_name(source_part);
        match self.part(&rels_part) {
            Some(xml) => parse_relationships(source_part, &rels_part, xml),
            None => Ok(Vec::new()),
        }
    }
}

/// `ppt/presentation.xml` -> `ppt/_rels/presentation.xml.rels`; `""` -> `_rels/.rels`.
pub fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

fn part_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a relationship target relative to the part that owns the relationship.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> =
        part_dir(source_part).split('/').filter(|segment| !segment.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Target of `to_part` as written in a relationship owned by `from_part`.
pub fn relative_target(from_part: &str, to_part: &str) -> String {
    let from: Vec<&str> = part_dir(from_part).split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = to_part.split('/').collect();

    let common =
        from.iter().zip(to.iter()).take_while(|(a, b)| a == b).count().min(to.len() - 1);

    let mut segments: Vec<&str> = vec![".."; from.len() - common];
    segments.extend(&to[common..]);
    segments.join("/")
}

fn parse_relationships(
    source_part: &str,
    rels_part: &str,
    xml: &[u8],
) -> Result<Vec<Relationship>, PackageError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut relationships = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() != b"Relationship" {
                    continue;
                }
                let (Some(id), Some(rel_type), Some(target)) =
                    (attribute(&e, b"Id"), attribute(&e, b"Type"), attribute(&e, b"Target"))
                else {
                    return Err(PackageError::xml(rels_part, "relationship is missing attributes"));
                };
                let external = attribute(&e, b"TargetMode").as_deref() == Some("External");
                let target = if external { target } else { resolve_target(source_part, &target) };
                relationships.push(Relationship { id, rel_type, target, external });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PackageError::xml(rels_part, e)),
            _ => {}
        }
    }

    Ok(relationships)
}

/// Unprefixed attribute value, unescaped.
pub(crate) fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

/// Value of a namespaced `id` attribute such as `r:id`.
pub(crate) fn relationship_id_attribute(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id")
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

/// Relationship ids referenced by `element` entries (e.g. `sldMasterId`) in document order.
pub(crate) fn referenced_relationship_ids(
    part_name: &str,
    xml: &[u8],
    element: &[u8],
) -> Result<Vec<String>, PackageError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut ids = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == element
                    && let Some(id) = relationship_id_attribute(&e)
                {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PackageError::xml(part_name, e)),
            _ => {}
        }
    }
    Ok(ids)
}
