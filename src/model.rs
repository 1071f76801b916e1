#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Bold,
}

impl FontStyle {
    pub fn from_bold(bold: bool) -> Self {
        if bold { FontStyle::Bold } else { FontStyle::Normal }
    }

    pub fn is_bold(self) -> bool {
        self == FontStyle::Bold
    }
}

/// A font selection as seen by layout: size in points plus weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub size: f32,
    pub style: FontStyle,
}

impl Font {
    pub fn regular(size: f32) -> Self {
        Self {
            size,
            style: FontStyle::Normal,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            size,
            style: FontStyle::Bold,
        }
    }

    pub fn with_style(self, style: FontStyle) -> Self {
        Self { style, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Page size and the margins every page shares. All values in points, with
/// the origin at the top-left corner and `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub border_margin: f32, // border rectangle inset from the page edge
    pub padding: f32, // gap between the border and the text column
    pub top_offset: f32, // extra space above the first baseline
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            border_margin: 0.3 * 72.0,
            padding: 8.0,
            top_offset: 15.0,
        }
    }

    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            ..Self::a4()
        }
    }

    pub fn content_margin(&self) -> f32 {
        self.border_margin + self.padding
    }

    pub fn content_left(&self) -> f32 {
        self.content_margin()
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.content_margin()
    }

    pub fn text_width(&self) -> f32 {
        self.width - self.content_margin() * 2.0
    }

    /// Baseline of the first line on every page.
    pub fn content_top(&self) -> f32 {
        self.content_margin() + self.top_offset
    }

    /// Lowest baseline-plus-line-height a placement may reach.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.border_margin
    }

    pub fn border(&self) -> Bounds {
        Bounds {
            x: self.border_margin,
            y: self.border_margin,
            width: self.width - 2.0 * self.border_margin,
            height: self.height - 2.0 * self.border_margin,
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    TextRun {
        text: String,
        style: FontStyle,
        size: f32,
        x: f32,
        y: f32, // baseline
        color: Option<[u8; 3]>, // None = black
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        gray: u8, // stroke gray level, 0 = black
    },
    LinkRect {
        x: f32,
        y: f32, // top edge
        w: f32,
        h: f32,
        url: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub border: Bounds,
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    /// All link rectangles as `(page index, op)` in emission order.
    pub fn links(&self) -> impl Iterator<Item = (usize, &DrawOp)> {
        self.pages.iter().enumerate().flat_map(|(i, page)| {
            page.ops
                .iter()
                .filter(|op| matches!(op, DrawOp::LinkRect { .. }))
                .map(move |op| (i, op))
        })
    }
}

/// Structured fields from the block above `---RESUME_START---`.
/// Placeholder values written by the generator are already `None` here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResumeHeader {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    ProjectsOrVolunteering,
    Education,
    Certifications,
    Other(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionRecord {
    /// Heading text as written; empty for lines that precede the first heading.
    pub heading: String,
    pub kind: SectionKind,
    pub raw_lines: Vec<String>,
    pub body: SectionBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SectionBody {
    Paragraphs(Vec<String>),
    Experience(Vec<EntryRecord>),
    Projects(Vec<ProjectItem>),
    Education(Vec<EducationRow>),
    Certifications(Vec<CertificationItem>),
    List(Vec<String>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobHeader {
    pub company: String,
    pub dates: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BusinessProblem {
    /// Text following a `Business Problem:` label.
    Statement(String),
    /// A line that occupied the problem slot without the label.
    Unlabeled(String),
}

impl BusinessProblem {
    pub fn text(&self) -> &str {
        match self {
            BusinessProblem::Statement(s) | BusinessProblem::Unlabeled(s) => s,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryRecord {
    pub company_line: String,
    pub role_line: String,
    pub header: JobHeader,
    pub business_problem: Option<BusinessProblem>,
    pub accomplishments: Vec<String>,
    pub tech_stack_line: Option<String>,
    pub trailing_unparsed: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectItem {
    pub title: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EducationRow {
    Columns {
        institution: String,
        degree: String,
        years: String,
    },
    Plain(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CertificationItem {
    pub label: String,
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resume {
    pub header: ResumeHeader,
    pub sections: Vec<SectionRecord>,
}
