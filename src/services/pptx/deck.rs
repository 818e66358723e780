//! A presentation being assembled from a template.
//!
//! Slides are kept as drafts and only serialized on save. Everything the
//! template already contains, including existing slides, is written back
//! unchanged apart from the slide list and content types.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::error::PackageError;
use super::layouts::{catalog_from_package, template_error};
use super::package::{
    CT_SLIDE, NS_RELATIONSHIPS, PptxPackage, RT_SLIDE, attribute, relative_target, rels_part_name,
};
use super::slide_xml::{render_slide, render_slide_rels};
use crate::domain::{AppError, LayoutCatalog, LayoutHandle, Placeholder};

/// Smallest slide id PowerPoint accepts.
const MIN_SLIDE_ID: u32 = 256;

/// A paragraph of plain text with an optional size in hundredths of a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub font_size: Option<u32>,
}

/// A new slide: the layout's placeholders and any text written into them.
#[derive(Debug, Clone)]
pub struct SlideDraft {
    layout: LayoutHandle,
    placeholders: Vec<Placeholder>,
    texts: Vec<Vec<Paragraph>>,
}

impl SlideDraft {
    /// Copy the layout's placeholders, leaving out date, footer and slide number.
    pub fn from_layout(layout: &LayoutHandle) -> Self {
        let placeholders: Vec<Placeholder> = layout
            .placeholders
            .iter()
            .filter(|placeholder| !placeholder.kind.is_inherited_only())
            .cloned()
            .collect();
        let texts = vec![Vec::new(); placeholders.len()];
        Self { layout: layout.clone(), placeholders, texts }
    }

    pub fn layout(&self) -> &LayoutHandle {
        &self.layout
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Replace the text of placeholder `index`, one paragraph per line.
    ///
    /// Vertical tabs also start a new paragraph. Other characters XML cannot
    /// carry are written as `_xHHHH_`.
    ///
    /// Returns `false` when the slide has no such placeholder.
    pub fn set_text(&mut self, index: usize, text: &str, font_size: Option<u32>) -> bool {
        let Some(slot) = self.texts.get_mut(index) else {
            return false;
        };
        *slot = text
            .split(['\n', '\u{b}'])
            .map(|line| Paragraph { text: xml_safe_text(line.trim_end_matches('\r')), font_size })
            .collect();
        true
    }

    /// Text of placeholder `index`, paragraphs joined by newlines.
    pub fn text(&self, index: usize) -> Option<String> {
        self.texts.get(index).map(|paragraphs| {
            paragraphs.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join("\n")
        })
    }

    pub(crate) fn shapes(&self) -> impl Iterator<Item = (&Placeholder, &[Paragraph])> {
        self.placeholders.iter().zip(self.texts.iter().map(Vec::as_slice))
    }
}

fn xml_safe_text(line: &str) -> String {
    let mut safe = String::with_capacity(line.len());
    for c in line.chars() {
        if is_xml_char(c) && c != '\r' {
            safe.push(c);
        } else {
            safe.push_str(&format!("_x{:04X}_", c as u32));
        }
    }
    safe
}

/// Characters allowed in XML 1.0 text.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// An open template plus the slides added to it.
#[derive(Debug)]
pub struct Deck {
    package: PptxPackage,
    catalog: LayoutCatalog,
    slides: Vec<SlideDraft>,
}

impl Deck {
    pub fn open(template: &Path) -> Result<Self, AppError> {
        let package = PptxPackage::open(template).map_err(|e| template_error(template, e))?;
        Self::from_package(package).map_err(|e| template_error(template, e))
    }

    pub fn from_package(package: PptxPackage) -> Result<Self, PackageError> {
        let catalog = catalog_from_package(&package)?;
        Ok(Self { package, catalog, slides: Vec::new() })
    }

    /// Layouts of the template this deck was opened from.
    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Layout used when a requested layout cannot be applied: the second
    /// layout when there are several, otherwise the only one.
    pub fn default_layout(&self) -> Option<&LayoutHandle> {
        let mut layouts = self.catalog.iter().map(|(_, handle)| handle);
        let first = layouts.next();
        layouts.next().or(first)
    }

    /// Append a slide built from `layout`, returning its index among the new slides.
    pub fn add_slide(&mut self, layout: &LayoutHandle) -> Result<usize, AppError> {
        let belongs = layout.template_digest == self.package.digest()
            && self.catalog.iter().any(|(_, own)| own.part_name == layout.part_name);
        if !belongs {
            return Err(AppError::ForeignLayout(layout.declared_name.clone()));
        }

        self.slides.push(SlideDraft::from_layout(layout));
        Ok(self.slides.len() - 1)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut SlideDraft> {
        self.slides.get_mut(index)
    }

    pub fn slides(&self) -> &[SlideDraft] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Write the presentation to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let write_error = |reason: String| AppError::PresentationWrite {
            path: path.display().to_string(),
            reason,
        };

        let bytes = self.to_bytes().map_err(|e| write_error(e.to_string()))?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        fs::write(path, bytes).map_err(|e| write_error(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PackageError> {
        let presentation_part = self.package.main_document_part()?;
        let presentation_xml = self.package.require_part_str(&presentation_part)?;
        let presentation_rels_part = rels_part_name(&presentation_part);
        let existing_rels = self.package.relationships(&presentation_part)?;

        let slide_dir = match presentation_part.rsplit_once('/') {
            Some((dir, _)) => format!("{}/slides", dir),
            None => "slides".to_string(),
        };

        let mut next_rel = existing_rels
            .iter()
            .filter_map(|rel| rel.id.strip_prefix("rId").and_then(|n| n.parse::<u32>().ok()))
            .max()
            .unwrap_or(0)
            + 1;
        let mut next_slide_id = next_slide_id(&presentation_part, presentation_xml.as_bytes())?;
        let mut next_part = self
            .package
            .parts()
            .filter_map(|(name, _)| slide_part_number(name, &slide_dir))
            .max()
            .unwrap_or(0)
            + 1;

        let mut planned = Vec::with_capacity(self.slides.len());
        for slide in &self.slides {
            let part_name = format!("{}/slide{}.xml", slide_dir, next_part);
            planned.push(PlannedSlide {
                rels_xml: render_slide_rels(&relative_target(&part_name, &slide.layout.part_name)),
                xml: render_slide(slide),
                rel_id: format!("rId{}", next_rel),
                slide_id: next_slide_id,
                part_name,
            });
            next_rel += 1;
            next_slide_id += 1;
            next_part += 1;
        }

        let presentation_xml = insert_slide_ids(&presentation_part, presentation_xml, &planned)?;
        let presentation_rels = insert_slide_relationships(
            self.package.part(&presentation_rels_part),
            &presentation_part,
            &presentation_rels_part,
            &planned,
        )?;
        let content_types =
            insert_content_types(self.package.require_part_str(CONTENT_TYPES)?, &planned)?;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut wrote_rels = false;
        for (name, data) in self.package.parts() {
            writer.start_file(name, options)?;
            if name == presentation_part {
                writer.write_all(presentation_xml.as_bytes())?;
            } else if name == presentation_rels_part {
                writer.write_all(presentation_rels.as_bytes())?;
                wrote_rels = true;
            } else if name == CONTENT_TYPES {
                writer.write_all(content_types.as_bytes())?;
            } else {
                writer.write_all(data)?;
            }
        }
        if !wrote_rels {
            writer.start_file(presentation_rels_part.as_str(), options)?;
            writer.write_all(presentation_rels.as_bytes())?;
        }

        for slide in &planned {
            writer.start_file(slide.part_name.as_str(), options)?;
            writer.write_all(slide.xml.as_bytes())?;
            writer.start_file(rels_part_name(&slide.part_name), options)?;
            writer.write_all(slide.rels_xml.as_bytes())?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

const CONTENT_TYPES: &str = "[Content_Types].xml";

#[derive(Debug)]
struct PlannedSlide {
    part_name: String,
    rel_id: String,
    slide_id: u32,
    xml: String,
    rels_xml: String,
}

fn slide_part_number(name: &str, slide_dir: &str) -> Option<u32> {
    name.strip_prefix(slide_dir)?
        .strip_prefix("/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

fn next_slide_id(part_name: &str, xml: &[u8]) -> Result<u32, PackageError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut max_id = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"sldId"
                    && let Some(id) = attribute(&e, b"id").and_then(|v| v.parse::<u32>().ok())
                {
                    max_id = max_id.max(Some(id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PackageError::xml(part_name, e)),
            _ => {}
        }
    }
    Ok(max_id.map(|id| id + 1).unwrap_or(MIN_SLIDE_ID).max(MIN_SLIDE_ID))
}

/// Prefix (with colon) used for presentationml elements, e.g. `p:`.
fn element_prefix(xml: &str, local_name: &str) -> Option<String> {
    let at = xml.find(local_name)?;
    let open = xml[..at].rfind('<')?;
    let prefix = &xml[open + 1..at];
    if prefix.is_empty() || prefix.ends_with(':') { Some(prefix.to_string()) } else { None }
}

/// Prefix bound to `namespace`, without colon.
fn namespace_prefix(xml: &str, namespace: &str) -> Option<String> {
    let needle = format!("=\"{}\"", namespace);
    let at = xml.find(&needle)?;
    let declaration = xml[..at].rfind("xmlns:")?;
    Some(xml[declaration + "xmlns:".len()..at].to_string())
}

fn insert_slide_ids(
    part_name: &str,
    xml: &str,
    slides: &[PlannedSlide],
) -> Result<String, PackageError> {
    if slides.is_empty() {
        return Ok(xml.to_string());
    }

    let p = element_prefix(xml, "presentation").unwrap_or_default();
    let r = namespace_prefix(xml, NS_RELATIONSHIPS).unwrap_or_else(|| "r".to_string());
    let entries: String = slides
        .iter()
        .map(|s| format!(r#"<{p}sldId id="{}" {r}:id="{}"/>"#, s.slide_id, s.rel_id))
        .collect();

    let close = format!("</{p}sldIdLst>");
    if let Some(at) = xml.find(&close) {
        return Ok(format!("{}{}{}", &xml[..at], entries, &xml[at..]));
    }

    let list = format!("<{p}sldIdLst>{entries}</{p}sldIdLst>");
    let empty = format!("<{p}sldIdLst/>");
    if xml.contains(&empty) {
        return Ok(xml.replacen(&empty, &list, 1));
    }

    // The slide list follows the master lists.
    let anchor = ["sldMasterIdLst", "notesMasterIdLst", "handoutMasterIdLst"]
        .iter()
        .filter_map(|name| {
            let end_tag = format!("</{p}{name}>");
            xml.find(&end_tag).map(|at| at + end_tag.len())
        })
        .max()
        .ok_or_else(|| PackageError::xml(part_name, "no slide master list to anchor slides"))?;

    Ok(format!("{}{}{}", &xml[..anchor], list, &xml[anchor..]))
}

fn insert_slide_relationships(
    existing: Option<&[u8]>,
    presentation_part: &str,
    rels_part: &str,
    slides: &[PlannedSlide],
) -> Result<String, PackageError> {
    let entries: String = slides
        .iter()
        .map(|s| {
            format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                s.rel_id,
                RT_SLIDE,
                relative_target(presentation_part, &s.part_name)
            )
        })
        .collect();

    let Some(existing) = existing else {
        return Ok(format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            entries
        ));
    };

    let xml = std::str::from_utf8(existing).map_err(|e| PackageError::xml(rels_part, e))?;
    insert_before_close(rels_part, xml, "</Relationships>", &entries)
}

fn insert_content_types(xml: &str, slides: &[PlannedSlide]) -> Result<String, PackageError> {
    let entries: String = slides
        .iter()
        .map(|s| format!(r#"<Override PartName="/{}" ContentType="{}"/>"#, s.part_name, CT_SLIDE))
        .collect();
    insert_before_close(CONTENT_TYPES, xml, "</Types>", &entries)
}

fn insert_before_close(
    part_name: &str,
    xml: &str,
    close: &str,
    entries: &str,
) -> Result<String, PackageError> {
    let at = xml
        .rfind(close)
        .ok_or_else(|| PackageError::xml(part_name, format!("missing {}", close)))?;
    Ok(format!("{}{}{}", &xml[..at], entries, &xml[at..]))
}
