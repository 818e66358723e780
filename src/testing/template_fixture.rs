use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::services::pptx::PptxPackage;

/// `(shape name, ph type, ph idx)`
pub type PlaceholderSpec<'a> = (&'a str, Option<&'a str>, Option<u32>);

/// Builds minimal `.pptx` templates: one master and the given layouts.
///
/// Layout names are inserted into the XML as-is.
#[derive(Debug, Clone, Default)]
pub struct TemplateFixture {
    layouts: Vec<(String, Vec<(String, Option<String>, Option<u32>)>)>,
    existing_slide: bool,
}

impl TemplateFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(mut self, name: &str, placeholders: &[PlaceholderSpec<'_>]) -> Self {
        let placeholders = placeholders
            .iter()
            .map(|(shape, kind, idx)| (shape.to_string(), kind.map(str::to_string), *idx))
            .collect();
        self.layouts.push((name.to_string(), placeholders));
        self
    }

    /// Include one slide using the first layout.
    pub fn existing_slide(mut self) -> Self {
        self.existing_slide = true;
        self
    }

    pub fn package(&self) -> PptxPackage {
        PptxPackage::from_bytes(self.bytes()).unwrap()
    }

    /// Write `template.pptx` into `dir`.
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join("template.pptx");
        std::fs::write(&path, self.bytes()).unwrap();
        path
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut parts: Vec<(String, String)> = vec![
            ("[Content_Types].xml".to_string(), self.content_types()),
            ("_rels/.rels".to_string(), ROOT_RELS.to_string()),
            ("ppt/presentation.xml".to_string(), self.presentation()),
            ("ppt/_rels/presentation.xml.rels".to_string(), self.presentation_rels()),
            ("ppt/theme/theme1.xml".to_string(), THEME.to_string()),
            ("ppt/slideMasters/slideMaster1.xml".to_string(), self.master()),
            ("ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(), self.master_rels()),
        ];

        for (i, (name, placeholders)) in self.layouts.iter().enumerate() {
            let n = i + 1;
            parts.push((
                format!("ppt/slideLayouts/slideLayout{}.xml", n),
                layout(name, placeholders),
            ));
            parts.push((
                format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n),
                LAYOUT_RELS.to_string(),
            ));
        }

        if self.existing_slide {
            parts.push(("ppt/slides/slide1.xml".to_string(), EXISTING_SLIDE.to_string()));
            parts.push((
                "ppt/slides/_rels/slide1.xml.rels".to_string(),
                EXISTING_SLIDE_RELS.to_string(),
            ));
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in parts {
            writer.start_file(name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn content_types(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
        );
        for n in 1..=self.layouts.len() {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slideLayouts/slideLayout{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
                n
            ));
        }
        if self.existing_slide {
            xml.push_str(r#"<Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#);
        }
        xml.push_str("</Types>");
        xml
    }

    fn presentation(&self) -> String {
        let slides = if self.existing_slide {
            r#"<p:sldIdLst><p:sldId id="256" r:id="rId3"/></p:sldIdLst>"#
        } else {
            ""
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{}<p:sldSz cx="9144000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
            slides
        )
    }

    fn presentation_rels(&self) -> String {
        let slide = if self.existing_slide {
            r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>"#
        } else {
            ""
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>{}</Relationships>"#,
            slide
        )
    }

    fn master(&self) -> String {
        let ids: String = (1..=self.layouts.len())
            .map(|n| format!(r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#, 2147483648 + n, n))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst>{}</p:sldLayoutIdLst></p:sldMaster>"#,
            ids
        )
    }

    fn master_rels(&self) -> String {
        let mut rels: String = (1..=self.layouts.len())
            .map(|n| {
                format!(
                    r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/>"#,
                    n, n
                )
            })
            .collect();
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>"#,
            self.layouts.len() + 1
        ));
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        )
    }
}

fn layout(name: &str, placeholders: &[(String, Option<String>, Option<u32>)]) -> String {
    let shapes: String = placeholders
        .iter()
        .enumerate()
        .map(|(i, (shape, kind, idx))| {
            let kind = kind.as_ref().map(|k| format!(r#" type="{}""#, k)).unwrap_or_default();
            let idx = idx.map(|i| format!(r#" idx="{}""#, i)).unwrap_or_default();
            format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph{}{}/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit</a:t></a:r></a:p></p:txBody></p:sp>"#,
                i + 2,
                shape,
                kind,
                idx
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" preserve="1"><p:cSld name="{}"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        name, shapes
    )
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

const LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Fixture"><a:themeElements/></a:theme>"#;

const EXISTING_SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld></p:sld>"#;

const EXISTING_SLIDE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#;
