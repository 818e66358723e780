//! Slide layouts and the placeholders they define.

/// Role of a placeholder, as declared by `<p:ph type="...">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Title,
    Body,
    CenterTitle,
    Subtitle,
    Object,
    Chart,
    Table,
    ClipArt,
    Diagram,
    Media,
    SlideNumber,
    Header,
    Footer,
    Date,
    Picture,
    SlideImage,
}

impl PlaceholderKind {
    /// Parse the `type` attribute. A missing attribute means `obj`.
    pub fn from_ooxml(value: Option<&str>) -> Self {
        match value {
            Some("title") => PlaceholderKind::Title,
            Some("body") => PlaceholderKind::Body,
            Some("ctrTitle") => PlaceholderKind::CenterTitle,
            Some("subTitle") => PlaceholderKind::Subtitle,
            Some("chart") => PlaceholderKind::Chart,
            Some("tbl") => PlaceholderKind::Table,
            Some("clipArt") => PlaceholderKind::ClipArt,
            Some("dgm") => PlaceholderKind::Diagram,
            Some("media") => PlaceholderKind::Media,
            Some("sldNum") => PlaceholderKind::SlideNumber,
            Some("hdr") => PlaceholderKind::Header,
            Some("ftr") => PlaceholderKind::Footer,
            Some("dt") => PlaceholderKind::Date,
            Some("pic") => PlaceholderKind::Picture,
            Some("sldImg") => PlaceholderKind::SlideImage,
            _ => PlaceholderKind::Object,
        }
    }

    /// Value for the `type` attribute; `None` for the implicit `obj`.
    pub fn ooxml_type(&self) -> Option<&'static str> {
        match self {
            PlaceholderKind::Title => Some("title"),
            PlaceholderKind::Body => Some("body"),
            PlaceholderKind::CenterTitle => Some("ctrTitle"),
            PlaceholderKind::Subtitle => Some("subTitle"),
            PlaceholderKind::Object => None,
            PlaceholderKind::Chart => Some("chart"),
            PlaceholderKind::Table => Some("tbl"),
            PlaceholderKind::ClipArt => Some("clipArt"),
            PlaceholderKind::Diagram => Some("dgm"),
            PlaceholderKind::Media => Some("media"),
            PlaceholderKind::SlideNumber => Some("sldNum"),
            PlaceholderKind::Header => Some("hdr"),
            PlaceholderKind::Footer => Some("ftr"),
            PlaceholderKind::Date => Some("dt"),
            PlaceholderKind::Picture => Some("pic"),
            PlaceholderKind::SlideImage => Some("sldImg"),
        }
    }

    /// Numeric placeholder type code, following the PowerPoint object model.
    pub fn type_code(&self) -> u32 {
        match self {
            PlaceholderKind::Title => 1,
            PlaceholderKind::Body => 2,
            PlaceholderKind::CenterTitle => 3,
            PlaceholderKind::Subtitle => 4,
            PlaceholderKind::Object => 7,
            PlaceholderKind::Chart => 8,
            PlaceholderKind::ClipArt => 9,
            PlaceholderKind::Media => 10,
            PlaceholderKind::Diagram => 11,
            PlaceholderKind::Table => 12,
            PlaceholderKind::SlideNumber => 13,
            PlaceholderKind::Header => 14,
            PlaceholderKind::Footer => 15,
            PlaceholderKind::Date => 16,
            PlaceholderKind::Picture => 18,
            PlaceholderKind::SlideImage => 101,
        }
    }

    /// Date, footer and slide number placeholders are not copied onto new slides.
    pub fn is_inherited_only(&self) -> bool {
        matches!(self, PlaceholderKind::Date | PlaceholderKind::Footer | PlaceholderKind::SlideNumber)
    }

    /// Placeholders that carry a text frame when created on a slide.
    pub fn has_text_frame(&self) -> bool {
        matches!(
            self,
            PlaceholderKind::Title
                | PlaceholderKind::CenterTitle
                | PlaceholderKind::Subtitle
                | PlaceholderKind::Body
                | PlaceholderKind::Object
        )
    }
}

/// A placeholder shape declared by a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Shape id (`p:cNvPr/@id`).
    pub id: u32,
    /// Shape name (`p:cNvPr/@name`).
    pub name: String,
    pub kind: PlaceholderKind,
    /// Placeholder index (`p:ph/@idx`), linking slide shapes to layout shapes.
    pub idx: Option<u32>,
}

/// A layout loaded from a specific template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutHandle {
    /// 1-based position in template order.
    pub position: usize,
    /// Name declared in the layout, possibly blank.
    pub declared_name: String,
    /// Package part name, e.g. `ppt/slideLayouts/slideLayout2.xml`.
    pub part_name: String,
    pub placeholders: Vec<Placeholder>,
    /// Digest of the template package the layout was read from.
    pub template_digest: String,
}

impl LayoutHandle {
    pub fn placeholder_names(&self) -> Vec<&str> {
        self.placeholders.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Layout names mapped to handles, in template order.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    entries: Vec<(String, LayoutHandle)>,
}

impl LayoutCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a layout under a unique name derived from its declared name.
    ///
    /// Returns the key the layout was stored under.
    pub fn insert(&mut self, handle: LayoutHandle) -> &str {
        let name = self.unique_name(&handle.declared_name, handle.position);
        self.entries.push((name, handle));
        &self.entries[self.entries.len() - 1].0
    }

    /// Blank names become `UnnamedLayout_<position>`; collisions get `_1`, `_2`, ...
    fn unique_name(&self, declared: &str, position: usize) -> String {
        let base = if declared.trim().is_empty() {
            format!("UnnamedLayout_{}", position)
        } else {
            declared.to_string()
        };

        if !self.contains(&base) {
            return base;
        }

        let mut count = 1;
        loop {
            let candidate = format!("{}_{}", base, count);
            if !self.contains(&candidate) {
                return candidate;
            }
            count += 1;
        }
    }

    pub fn get(&self, name: &str) -> Option<&LayoutHandle> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, handle)| handle)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.entries.first().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayoutHandle)> {
        self.entries.iter().map(|(key, handle)| (key.as_str(), handle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
