//! Plain-text documents with headings and image references
//!
//! Recognised line forms:
//! - `# Title`, `## Section` ... headings (anchor targets)
//! - `![alt](path)` image placeholders, loaded lazily
//! - anything else is a paragraph line

use std::path::{Path, PathBuf};

use unicode_width::UnicodeWidthChar;

/// Rows occupied by an image placeholder
pub const IMAGE_ROWS: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Image { alt: String, path: PathBuf },
    Text(String),
    Blank,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
    /// Directory that relative image paths resolve against
    pub base_dir: PathBuf,
}

impl Document {
    /// Load a document from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let fallback_title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        Ok(Self::parse(&content, base_dir, &fallback_title))
    }

    pub fn parse(content: &str, base_dir: PathBuf, fallback_title: &str) -> Self {
        let blocks: Vec<Block> = content.lines().map(parse_line).collect();
        let title = blocks
            .iter()
            .find_map(|b| match b {
                Block::Heading { text, .. } => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_else(|| fallback_title.to_string());
        Self {
            title,
            blocks,
            base_dir,
        }
    }

    /// Resolve an image path relative to the document
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn image_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Image { .. }))
            .count()
    }
}

fn parse_line(line: &str) -> Block {
    let trimmed = line.trim_end();
    if trimmed.trim().is_empty() {
        return Block::Blank;
    }

    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) {
        if let Some(text) = trimmed[hashes..].strip_prefix(' ') {
            return Block::Heading {
                level: hashes as u8,
                text: text.trim().to_string(),
            };
        }
    }

    if let Some(image) = parse_image(trimmed.trim()) {
        return image;
    }

    Block::Text(trimmed.to_string())
}

fn parse_image(line: &str) -> Option<Block> {
    let rest = line.strip_prefix("![")?;
    let (alt, rest) = rest.split_once("](")?;
    let path = rest.strip_suffix(')')?;
    if path.is_empty() {
        return None;
    }
    Some(Block::Image {
        alt: alt.to_string(),
        path: PathBuf::from(path),
    })
}

/// Break `text` into rows no wider than `width` display columns
///
/// Breaks at the last space when possible, otherwise mid-word.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0usize;

    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if row_width + w > width && !row.is_empty() {
            if ch == ' ' {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
                continue;
            }
            match row.rfind(' ') {
                Some(idx) if idx > 0 => {
                    let carry = row[idx + 1..].to_string();
                    row.truncate(idx);
                    rows.push(std::mem::take(&mut row));
                    row_width = carry.chars().filter_map(|c| c.width()).sum();
                    row = carry;
                }
                _ => {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
            }
        }
        row.push(ch);
        row_width += w;
    }
    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    rows
}

/// Row positions of every block for a given width
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    /// First row of each block
    pub tops: Vec<u32>,
    /// Rows occupied by each block
    pub heights: Vec<u32>,
    pub total_rows: u32,
    pub width: u16,
}

impl DocumentLayout {
    /// `leading_rows` reserves space above the first block
    pub fn compute(document: &Document, width: u16, leading_rows: u16) -> Self {
        let mut tops = Vec::with_capacity(document.blocks.len());
        let mut heights = Vec::with_capacity(document.blocks.len());
        let mut row = leading_rows as u32;

        for block in &document.blocks {
            let height = match block {
                Block::Heading { text, .. } | Block::Text(text) => {
                    u32::try_from(wrap(text, width).len()).unwrap_or(u32::MAX)
                }
                Block::Image { .. } => IMAGE_ROWS as u32,
                Block::Blank => 1,
            };
            tops.push(row);
            heights.push(height);
            row = row.saturating_add(height);
        }

        Self {
            tops,
            heights,
            total_rows: row,
            width,
        }
    }

    /// Top row of the first heading strictly below `row`
    pub fn next_heading(&self, document: &Document, row: u32) -> Option<u32> {
        self.heading_rows(document).find(|&top| top > row)
    }

    /// Top row of the last heading strictly above `row`
    pub fn prev_heading(&self, document: &Document, row: u32) -> Option<u32> {
        self.heading_rows(document).filter(|&top| top < row).last()
    }

    fn heading_rows<'a>(&'a self, document: &'a Document) -> impl Iterator<Item = u32> + 'a {
        document
            .blocks
            .iter()
            .zip(&self.tops)
            .filter(|(b, _)| matches!(b, Block::Heading { .. }))
            .map(|(_, &top)| top)
    }
}
