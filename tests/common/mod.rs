//! Shared testing utilities for deckgen CLI tests.

use assert_cmd::Command;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// `(layout name, [(placeholder name, ph type)])`
pub type LayoutSpec<'a> = (&'a str, &'a [(&'a str, Option<&'a str>)]);

/// Testing harness providing an isolated working directory for CLI runs.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for the compiled `deckgen` binary, with API keys cleared.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("deckgen").expect("Failed to locate deckgen binary");
        cmd.current_dir(self.work_dir())
            .env_remove("DECKGEN_API_KEY")
            .env_remove("OPENAI_API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a template with the given layouts to `template.pptx` in the work directory.
    pub fn write_template(&self, layouts: &[LayoutSpec<'_>]) -> PathBuf {
        let path = self.work_dir.join("template.pptx");
        fs::write(&path, template_bytes(layouts)).expect("Failed to write template");
        path
    }

    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("deckgen.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Contents of a part inside a written `.pptx`.
    pub fn read_part(&self, pptx: &Path, part: &str) -> Option<String> {
        let bytes = fs::read(pptx).ok()?;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).ok()?;
        let mut file = archive.by_name(part).ok()?;
        let mut content = String::new();
        file.read_to_string(&mut content).ok()?;
        Some(content)
    }
}

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT: &str = "application/vnd.openxmlformats-officedocument.presentationml";

fn template_bytes(layouts: &[LayoutSpec<'_>]) -> Vec<u8> {
    let mut parts = Vec::new();

    let mut types = format!(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="{CT}.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="{CT}.slideMaster+xml"/>"#
    );
    for n in 1..=layouts.len() {
        types.push_str(&format!(
            r#"<Override PartName="/ppt/slideLayouts/slideLayout{n}.xml" ContentType="{CT}.slideLayout+xml"/>"#
        ));
    }
    types.push_str("</Types>");
    parts.push(("[Content_Types].xml".to_string(), types));

    parts.push((
        "_rels/.rels".to_string(),
        format!(
            r#"<Relationships xmlns="{RELS_NS}"><Relationship Id="rId1" Type="{REL}/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#
        ),
    ));
    parts.push((
        "ppt/presentation.xml".to_string(),
        format!(
            r#"<p:presentation {NS}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst/><p:sldSz cx="9144000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#
        ),
    ));
    parts.push((
        "ppt/_rels/presentation.xml.rels".to_string(),
        format!(
            r#"<Relationships xmlns="{RELS_NS}"><Relationship Id="rId1" Type="{REL}/slideMaster" Target="slideMasters/slideMaster1.xml"/></Relationships>"#
        ),
    ));

    let layout_ids: String = (1..=layouts.len())
        .map(|n| format!(r#"<p:sldLayoutId id="{}" r:id="rId{n}"/>"#, 2147483648usize + n))
        .collect();
    parts.push((
        "ppt/slideMasters/slideMaster1.xml".to_string(),
        format!(
            r#"<p:sldMaster {NS}><p:cSld><p:spTree/></p:cSld><p:sldLayoutIdLst>{layout_ids}</p:sldLayoutIdLst></p:sldMaster>"#
        ),
    ));
    let master_rels: String = (1..=layouts.len())
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{n}" Type="{REL}/slideLayout" Target="../slideLayouts/slideLayout{n}.xml"/>"#
            )
        })
        .collect();
    parts.push((
        "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
        format!(r#"<Relationships xmlns="{RELS_NS}">{master_rels}</Relationships>"#),
    ));

    for (i, (name, placeholders)) in layouts.iter().enumerate() {
        let shapes: String = placeholders
            .iter()
            .enumerate()
            .map(|(j, (shape, kind))| {
                let kind = kind.map(|k| format!(r#" type="{k}""#)).unwrap_or_default();
                format!(
                    r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{shape}"/><p:cNvSpPr/><p:nvPr><p:ph{kind} idx="{j}"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#,
                    j + 2
                )
            })
            .collect();
        parts.push((
            format!("ppt/slideLayouts/slideLayout{}.xml", i + 1),
            format!(
                r#"<p:sldLayout {NS}><p:cSld name="{name}"><p:spTree>{shapes}</p:spTree></p:cSld></p:sldLayout>"#
            ),
        ));
        parts.push((
            format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i + 1),
            format!(
                r#"<Relationships xmlns="{RELS_NS}"><Relationship Id="rId1" Type="{REL}/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
            ),
        ));
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in parts {
        writer.start_file(name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
