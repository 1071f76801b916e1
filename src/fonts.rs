use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use memmap2::Mmap;
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Name, Pdf, Rect, Ref, Str};
use ttf_parser::Face;

use crate::layout::TextMeasure;
use crate::model::{Font, FontStyle};

pub const DEFAULT_FAMILY: &str = "Times New Roman;Liberation Serif;DejaVu Serif";

/// Extra font directories, searched before the platform ones.
pub const FONTS_ENV: &str = "RESUME_PDF_FONTS";

/// Which typeface to set the resume in. `family` is a `;`-separated list of
/// candidates tried in order; when none is installed the PDF base-14 Times
/// faces are used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontConfig {
    pub family: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY)
    }
}

impl FontConfig {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }

    /// Skip the system font search entirely.
    pub fn builtin() -> Self {
        Self::new("")
    }

    fn candidates(&self) -> impl Iterator<Item = &str> {
        self.family.split(';').map(str::trim).filter(|s| !s.is_empty())
    }
}

/// (lowercase family name, bold) -> (file path, face index within TTC)
type FontLookup = HashMap<(String, bool), (PathBuf, u32)>;

static FONT_INDEX: OnceLock<FontLookup> = OnceLock::new();

fn font_family_name(face: &Face) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
        .find_map(|name| name.to_string())
}

fn font_directories() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    if let Ok(val) = std::env::var(FONTS_ENV) {
        dirs.extend(std::env::split_paths(&val).filter(|p| !p.as_os_str().is_empty()));
    }

    #[cfg(target_os = "macos")]
    {
        dirs.extend([
            "/Library/Fonts".into(),
            "/System/Library/Fonts".into(),
            "/System/Library/Fonts/Supplemental".into(),
        ]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join("Library/Fonts"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        dirs.extend(["/usr/share/fonts".into(), "/usr/local/share/fonts".into()]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join(".local/share/fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(windir) = std::env::var("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push("C:\\Windows\\Fonts".into());
        }
    }

    dirs
}

fn is_font_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("ttf" | "otf" | "ttc")
    )
}

fn is_font_collection(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ttc"))
}

fn scan_font_dirs() -> FontLookup {
    let t0 = std::time::Instant::now();
    let mut index = FontLookup::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut files_scanned = 0u32;

    let mut stack = font_directories();
    while let Some(dir) = stack.pop() {
        if !visited.insert(dir.clone()) {
            continue;
        }
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if !is_font_file(&path) {
                continue;
            }
            files_scanned += 1;
            let Ok(file) = std::fs::File::open(&path) else {
                continue;
            };
            // Read-only mapping; the file is not modified while indexed.
            let Ok(data) = (unsafe { Mmap::map(&file) }) else {
                continue;
            };
            let face_count = if is_font_collection(&path) {
                ttf_parser::fonts_in_collection(&data).unwrap_or(1)
            } else {
                1
            };
            for face_idx in 0..face_count {
                let Ok(face) = Face::parse(&data, face_idx) else {
                    continue;
                };
                if face.is_italic() {
                    continue;
                }
                if let Some(family) = font_family_name(&face) {
                    index
                        .entry((family.to_lowercase(), face.is_bold()))
                        .or_insert((path.clone(), face_idx));
                }
            }
        }
    }

    log::info!(
        "Font scan: {:.1}ms, {} dirs, {} files parsed -> {} entries",
        t0.elapsed().as_secs_f64() * 1000.0,
        visited.len(),
        files_scanned,
        index.len(),
    );
    index
}

fn get_font_index() -> &'static FontLookup {
    FONT_INDEX.get_or_init(scan_font_dirs)
}

/// Look up a face by family; a missing bold face falls back to the regular one.
fn find_font_file(family: &str, bold: bool) -> Option<(PathBuf, u32)> {
    let index = get_font_index();
    let key = family.to_lowercase();
    index
        .get(&(key.clone(), bold))
        .or_else(|| if bold { index.get(&(key, false)) } else { None })
        .cloned()
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// WinAnsi bytes for a base-14 font string; unmappable chars become `?`.
fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match char_to_winansi(c) {
            0 => b'?',
            b => b,
        })
        .collect()
}

/// Big-endian 2-byte glyph IDs for CIDFont content streams.
fn encode_as_gids(text: &str, char_to_gid: &BTreeMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.extend_from_slice(&gid.to_be_bytes());
    }
    out
}

/// Approximate Times widths at 1000 units/em, by WinAnsi byte.
fn times_width(byte: u8, bold: bool) -> f32 {
    match (byte, bold) {
        (32, _) => 250.0,                                 // space
        (0x95, _) => 350.0,                               // bullet
        (48..=57, _) => 500.0,                            // digits
        (44 | 46 | 58 | 59, _) => 250.0,                  // , . : ;
        (33..=47 | 58..=64 | 91..=96 | 123..=126, _) => 333.0,
        (73 | 74, false) => 333.0,                        // I J
        (73 | 74, true) => 389.0,
        (77 | 87, false) => 889.0,                        // M W
        (77 | 87, true) => 944.0,
        (65..=90, false) => 667.0,
        (65..=90, true) => 722.0,
        (105 | 106 | 108, _) => 278.0,                    // i j l
        (102 | 116 | 114, _) => 333.0,                    // f t r
        (109, false) => 778.0,                            // m
        (109, true) => 833.0,
        (119, _) => 722.0,                                // w
        (97..=122, false) => 444.0,
        (97..=122, true) => 500.0,
        (0x96, _) => 500.0,                               // en dash
        (0x97, _) => 1000.0,                              // em dash
        (_, false) => 500.0,
        (_, true) => 556.0,
    }
}

struct EmbeddedFace {
    family: String,
    data: Vec<u8>,
    index: u32,
    remapper: subsetter::GlyphRemapper,
    char_to_gid: BTreeMap<char, u16>,
    char_widths: HashMap<char, f32>,
}

impl EmbeddedFace {
    fn new(family: &str, data: Vec<u8>, index: u32, used_chars: &BTreeSet<char>) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units = face.units_per_em() as f32;

        let mut remapper = subsetter::GlyphRemapper::new();
        let mut char_to_gid = BTreeMap::new();
        let mut char_widths = HashMap::new();
        for &ch in used_chars {
            if let Some(gid) = face.glyph_index(ch) {
                char_to_gid.insert(ch, remapper.remap(gid.0));
                let w = face
                    .glyph_hor_advance(gid)
                    .map(|adv| adv as f32 / units * 1000.0)
                    .unwrap_or(0.0);
                char_widths.insert(ch, w);
            }
        }
        Some(Self {
            family: family.to_string(),
            data,
            index,
            remapper,
            char_to_gid,
            char_widths,
        })
    }

    /// Write the subsetted face as a Type0 font with Identity-H encoding.
    fn write(&self, pdf: &mut Pdf, font_ref: Ref, alloc: &mut impl FnMut() -> Ref) -> Option<()> {
        let face = Face::parse(&self.data, self.index).ok()?;
        let units = face.units_per_em() as f32;
        let scale = |v: i16| v as f32 / units * 1000.0;

        let bb = face.global_bounding_box();
        let bbox = Rect::new(
            scale(bb.x_min),
            scale(bb.y_min),
            scale(bb.x_max),
            scale(bb.y_max),
        );

        let subset_data = subsetter::subset(&self.data, self.index, &self.remapper)
            .unwrap_or_else(|e| {
                log::warn!("Font subsetting failed for {}: {e}, embedding full font", self.family);
                self.data.clone()
            });

        let descriptor_ref = alloc();
        let data_ref = alloc();
        let cid_font_ref = alloc();
        let tounicode_ref = alloc();

        let data_len = i32::try_from(subset_data.len()).ok()?;
        pdf.stream(data_ref, &subset_data)
            .pair(Name(b"Length1"), data_len);

        let ps_name = self.family.replace(' ', "");
        pdf.font_descriptor(descriptor_ref)
            .name(Name(ps_name.as_bytes()))
            .flags(FontFlags::NON_SYMBOLIC)
            .bbox(bbox)
            .italic_angle(0.0)
            .ascent(scale(face.ascender()))
            .descent(scale(face.descender()))
            .cap_height(face.capital_height().map(scale).unwrap_or(700.0))
            .stem_v(80.0)
            .font_file2(data_ref);

        let identity = || SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        };
        {
            let mut cid = pdf.cid_font(cid_font_ref);
            cid.subtype(CidFontType::Type2);
            cid.base_font(Name(ps_name.as_bytes()));
            cid.system_info(identity());
            cid.font_descriptor(descriptor_ref);
            cid.default_width(0.0);
            cid.cid_to_gid_map_predefined(Name(b"Identity"));
            let mut gid_widths: Vec<(u16, f32)> = self
                .char_to_gid
                .iter()
                .filter_map(|(ch, &gid)| self.char_widths.get(ch).map(|&w| (gid, w)))
                .collect();
            gid_widths.sort_by_key(|&(gid, _)| gid);
            gid_widths.dedup_by_key(|(gid, _)| *gid);
            if !gid_widths.is_empty() {
                let mut w = cid.widths();
                for &(gid, width) in &gid_widths {
                    w.consecutive(gid, [width]);
                }
            }
        }

        let cmap_name = format!("{ps_name}-UTF16");
        let mut cmap = UnicodeCmap::new(Name(cmap_name.as_bytes()), identity());
        for (&ch, &gid) in &self.char_to_gid {
            cmap.pair(gid, ch);
        }
        let cmap_data = cmap.finish();
        pdf.stream(tounicode_ref, cmap_data.as_slice());

        pdf.type0_font(font_ref)
            .base_font(Name(ps_name.as_bytes()))
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_font_ref)
            .to_unicode(tounicode_ref);
        Some(())
    }
}

enum FontSource {
    Embedded(EmbeddedFace),
    Standard(&'static str),
}

pub(crate) struct FontEntry {
    bold: bool,
    source: FontSource,
}

impl FontEntry {
    fn load(config: &FontConfig, bold: bool, used_chars: &BTreeSet<char>) -> Self {
        let t0 = std::time::Instant::now();
        for candidate in config.candidates() {
            let Some((path, index)) = find_font_file(candidate, bold) else {
                continue;
            };
            let Ok(data) = std::fs::read(&path) else {
                continue;
            };
            if let Some(face) = EmbeddedFace::new(candidate, data, index, used_chars) {
                log::debug!(
                    "Font {candidate} bold={bold} from {} in {:.1}ms",
                    path.display(),
                    t0.elapsed().as_secs_f64() * 1000.0,
                );
                return Self {
                    bold,
                    source: FontSource::Embedded(face),
                };
            }
        }

        let base = if bold { "Times-Bold" } else { "Times-Roman" };
        if config.candidates().next().is_some() {
            log::warn!("Font not found: {} bold={bold}, using {base}", config.family);
        }
        Self {
            bold,
            source: FontSource::Standard(base),
        }
    }

    /// Width of a single character in 1000-units.
    fn char_width_1000(&self, ch: char) -> f32 {
        if let FontSource::Embedded(face) = &self.source
            && let Some(&w) = face.char_widths.get(&ch)
        {
            return w;
        }
        match char_to_winansi(ch) {
            0 if ch.is_control() => 0.0,
            byte => times_width(byte, self.bold),
        }
    }

    pub(crate) fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * size / 1000.0)
            .sum()
    }

    /// Bytes for a `Tj` string in this font's encoding.
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.source {
            FontSource::Embedded(face) => encode_as_gids(text, &face.char_to_gid),
            FontSource::Standard(_) => to_winansi_bytes(text),
        }
    }

    fn write(&self, pdf: &mut Pdf, font_ref: Ref, alloc: &mut impl FnMut() -> Ref) {
        let base = match &self.source {
            FontSource::Embedded(face) => match face.write(pdf, font_ref, alloc) {
                Some(()) => return,
                None => {
                    log::warn!("Embedding {} failed, using base-14 Times", face.family);
                    if self.bold { "Times-Bold" } else { "Times-Roman" }
                }
            },
            FontSource::Standard(base) => *base,
        };
        pdf.type1_font(font_ref)
            .base_font(Name(base.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// The regular and bold faces a resume is set in. Layout measures with the
/// same set the page writer draws with.
pub(crate) struct FontSet {
    regular: FontEntry,
    bold: FontEntry,
}

impl FontSet {
    pub(crate) fn load(config: &FontConfig, used_chars: &BTreeSet<char>) -> Self {
        Self {
            regular: FontEntry::load(config, false, used_chars),
            bold: FontEntry::load(config, true, used_chars),
        }
    }

    pub(crate) fn entry(&self, style: FontStyle) -> &FontEntry {
        match style {
            FontStyle::Normal => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }

    pub(crate) fn resource_name(style: FontStyle) -> &'static str {
        match style {
            FontStyle::Normal => "F1",
            FontStyle::Bold => "F2",
        }
    }

    /// Write both faces; returns their object refs keyed by style.
    pub(crate) fn write(
        &self,
        pdf: &mut Pdf,
        alloc: &mut impl FnMut() -> Ref,
    ) -> [(FontStyle, Ref); 2] {
        let regular_ref = alloc();
        self.regular.write(pdf, regular_ref, alloc);
        let bold_ref = alloc();
        self.bold.write(pdf, bold_ref, alloc);
        [(FontStyle::Normal, regular_ref), (FontStyle::Bold, bold_ref)]
    }
}

impl TextMeasure for FontSet {
    fn measure(&self, text: &str, font: Font) -> f32 {
        self.entry(font.style).text_width(text, font.size)
    }
}
