//! Reading slide layouts out of a template package.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::PackageError;
use super::package::{PptxPackage, Relationship, attribute, referenced_relationship_ids};
use crate::domain::{AppError, LayoutCatalog, LayoutHandle, Placeholder, PlaceholderKind};

/// Load the layout catalog of the template at `path`.
///
/// A template that opens but declares no layouts yields an empty catalog;
/// callers decide whether that is fatal.
pub fn load_layout_catalog(path: &Path) -> Result<LayoutCatalog, AppError> {
    let package = PptxPackage::open(path).map_err(|e| template_error(path, e))?;
    catalog_from_package(&package).map_err(|e| template_error(path, e))
}

pub(crate) fn template_error(path: &Path, err: PackageError) -> AppError {
    AppError::TemplateLoad { path: path.display().to_string(), reason: err.to_string() }
}

pub fn catalog_from_package(package: &PptxPackage) -> Result<LayoutCatalog, PackageError> {
    let mut catalog = LayoutCatalog::new();
    for (index, part_name) in layout_parts(package)?.into_iter().enumerate() {
        let parsed = parse_layout_part(&part_name, package.require_part(&part_name)?)?;
        catalog.insert(LayoutHandle {
            position: index + 1,
            declared_name: parsed.name,
            part_name,
            placeholders: parsed.placeholders,
            template_digest: package.digest().to_string(),
        });
    }
    Ok(catalog)
}

/// Layout part names in template order: masters as listed by the
/// presentation, layouts as listed by each master.
pub fn layout_parts(package: &PptxPackage) -> Result<Vec<String>, PackageError> {
    let presentation = package.main_document_part()?;
    let master_ids = referenced_relationship_ids(
        &presentation,
        package.require_part(&presentation)?,
        b"sldMasterId",
    )?;
    let presentation_rels = package.relationships(&presentation)?;

    let mut layouts = Vec::new();
    for master_id in master_ids {
        let master = relationship_target(&presentation, &presentation_rels, &master_id)?;
        let layout_ids =
            referenced_relationship_ids(&master, package.require_part(&master)?, b"sldLayoutId")?;
        let master_rels = package.relationships(&master)?;
        for layout_id in layout_ids {
            layouts.push(relationship_target(&master, &master_rels, &layout_id)?);
        }
    }
    Ok(layouts)
}

fn relationship_target(
    part: &str,
    rels: &[Relationship],
    id: &str,
) -> Result<String, PackageError> {
    rels.iter()
        .find(|rel| rel.id == id && !rel.external)
        .map(|rel| rel.target.clone())
        .ok_or_else(|| PackageError::xml(part, format!("relationship '{}' is not defined", id)))
}

#[derive(Debug, Default)]
struct ParsedLayout {
    name: String,
    placeholders: Vec<Placeholder>,
}

#[derive(Debug, Default)]
struct ShapeScan {
    id: Option<u32>,
    name: Option<String>,
    placeholder: Option<(PlaceholderKind, Option<u32>)>,
}

fn parse_layout_part(part_name: &str, xml: &[u8]) -> Result<ParsedLayout, PackageError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut layout = ParsedLayout::default();
    let mut shape: Option<ShapeScan> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"cSld" => {
                    layout.name = attribute(&e, b"name").unwrap_or_default();
                }
                b"sp" => shape = Some(ShapeScan::default()),
                b"cNvPr" => {
                    if let Some(scan) = shape.as_mut()
                        && scan.id.is_none()
                    {
                        scan.id = attribute(&e, b"id").and_then(|v| v.parse().ok());
                        scan.name = attribute(&e, b"name");
                    }
                }
                b"ph" => {
                    if let Some(scan) = shape.as_mut() {
                        let kind = PlaceholderKind::from_ooxml(attribute(&e, b"type").as_deref());
                        let idx = attribute(&e, b"idx").and_then(|v| v.parse().ok());
                        scan.placeholder = Some((kind, idx));
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"sp"
                    && let Some(scan) = shape.take()
                    && let Some((kind, idx)) = scan.placeholder
                {
                    layout.placeholders.push(Placeholder {
                        id: scan.id.unwrap_or_default(),
                        name: scan.name.unwrap_or_default(),
                        kind,
                        idx,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PackageError::xml(part_name, e)),
            _ => {}
        }
    }

    Ok(layout)
}
