//! Serialization of new slide parts.

use std::fmt::Write;

use quick_xml::escape::escape;

use super::deck::{Paragraph, SlideDraft};
use super::package::RT_SLIDE_LAYOUT;
use crate::domain::Placeholder;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// Shape id of the slide's group shape; placeholders are numbered after it.
const GROUP_SHAPE_ID: u32 = 1;

pub fn render_slide(slide: &SlideDraft) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, "<p:sld {}><p:cSld><p:spTree>", NAMESPACES);
    let _ = write!(
        xml,
        r#"<p:nvGrpSpPr><p:cNvPr id="{}" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
        GROUP_SHAPE_ID
    );
    xml.push_str(
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    );

    for (offset, (placeholder, paragraphs)) in slide.shapes().enumerate() {
        let shape_id = GROUP_SHAPE_ID + 1 + offset as u32;
        render_placeholder(&mut xml, shape_id, placeholder, paragraphs);
    }

    xml.push_str("</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    xml
}

fn render_placeholder(
    xml: &mut String,
    shape_id: u32,
    placeholder: &Placeholder,
    paragraphs: &[Paragraph],
) {
    let _ = write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph"#,
        shape_id,
        escape(placeholder.name.as_str())
    );
    if let Some(kind) = placeholder.kind.ooxml_type() {
        let _ = write!(xml, r#" type="{}""#, kind);
    }
    if let Some(idx) = placeholder.idx {
        let _ = write!(xml, r#" idx="{}""#, idx);
    }
    xml.push_str("/></p:nvPr></p:nvSpPr><p:spPr/>");

    if !paragraphs.is_empty() || placeholder.kind.has_text_frame() {
        xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
        if paragraphs.is_empty() {
            xml.push_str("<a:p/>");
        }
        for paragraph in paragraphs {
            render_paragraph(xml, paragraph);
        }
        xml.push_str("</p:txBody>");
    }

    xml.push_str("</p:sp>");
}

fn render_paragraph(xml: &mut String, paragraph: &Paragraph) {
    let size = paragraph.font_size.map(|sz| format!(r#" sz="{}""#, sz)).unwrap_or_default();
    if paragraph.text.is_empty() {
        let _ = write!(xml, r#"<a:p><a:endParaRPr lang="en-US"{}/></a:p>"#, size);
        return;
    }
    let _ = write!(
        xml,
        r#"<a:p><a:r><a:rPr lang="en-US"{} dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
        size,
        escape(paragraph.text.as_str())
    );
}

/// Relationships of a new slide: its layout only.
pub fn render_slide_rels(layout_target: &str) -> String {
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}" Target="{}"/></Relationships>"#,
        XML_DECLARATION,
        RT_SLIDE_LAYOUT,
        escape(layout_target)
    )
}
