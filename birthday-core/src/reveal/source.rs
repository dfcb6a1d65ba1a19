use std::ops::Range;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const PARAGRAPH_START: &str = "<p>";
const PARAGRAPH_END: &str = "</p>";
const HIGHLIGHT_START: &str = "<span class=\"highlight\">";
const HIGHLIGHT_END: &str = "</span>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    ParagraphStart,
    ParagraphEnd,
    HighlightStart,
    HighlightEnd,
}

impl Tag {
    fn at(text: &str) -> Option<Tag> {
        [
            (PARAGRAPH_START, Tag::ParagraphStart),
            (PARAGRAPH_END, Tag::ParagraphEnd),
            (HIGHLIGHT_START, Tag::HighlightStart),
            (HIGHLIGHT_END, Tag::HighlightEnd),
        ]
        .into_iter()
        .find(|(literal, _)| text.starts_with(literal))
        .map(|(_, tag)| tag)
    }

    fn len(self) -> usize {
        match self {
            Tag::ParagraphStart => PARAGRAPH_START.len(),
            Tag::ParagraphEnd => PARAGRAPH_END.len(),
            Tag::HighlightStart => HIGHLIGHT_START.len(),
            Tag::HighlightEnd => HIGHLIGHT_END.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitKind {
    /// One character of a tag. `opens_paragraph` is set on the closing `>`
    /// of a paragraph start tag.
    Markup { opens_paragraph: bool },
    /// Whitespace between paragraphs
    Gap,
    Text { highlight: bool },
}

#[derive(Debug, Clone)]
struct Unit {
    range: Range<usize>,
    kind: UnitKind,
}

/// One run of uniformly styled text inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub highlight: bool,
}

/// A paragraph of revealed text, ready for a presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedParagraph {
    pub segments: Vec<Segment>,
}

impl RevealedParagraph {
    /// Paragraph text without styling
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append one visible grapheme, collapsing whitespace runs
    fn push(&mut self, grapheme: &str, highlight: bool, pending_space: &mut bool) {
        if grapheme.chars().all(char::is_whitespace) {
            *pending_space = !self.segments.is_empty();
            return;
        }

        if std::mem::take(pending_space) {
            if let Some(last) = self.segments.last_mut() {
                last.text.push(' ');
            }
        }

        match self.segments.last_mut() {
            Some(last) if last.highlight == highlight => last.text.push_str(grapheme),
            _ => self.segments.push(Segment {
                text: grapheme.to_string(),
                highlight,
            }),
        }
    }
}

/// Immutable text to disclose, tokenized into reveal units.
///
/// Text is split into grapheme clusters; every character of a markup tag is
/// its own unit so tags are revealed (invisibly) at the same cadence as the
/// text around them. A source without paragraph markers, or with markers
/// that do not nest properly, is treated as one plain paragraph.
#[derive(Debug, Clone)]
pub struct RevealSource {
    text: String,
    units: Vec<Unit>,
    structured: bool,
}

impl RevealSource {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let (units, structured) = match tokenize(&text) {
            Some(units) => (units, true),
            None => (plain_units(&text), false),
        };

        Self {
            text,
            units,
            structured,
        }
    }

    /// Number of reveal units (ticks needed to reveal everything)
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether paragraph markers were recognized
    pub fn is_structured(&self) -> bool {
        self.structured
    }

    /// Raw text of the unit at `index`
    pub fn unit(&self, index: usize) -> Option<&str> {
        self.units.get(index).map(|u| &self.text[u.range.clone()])
    }

    /// Raw source text of the first `position` units
    #[cfg(test)]
    fn prefix(&self, position: usize) -> &str {
        match position.min(self.len()).checked_sub(1) {
            Some(last) => &self.text[..self.units[last].range.end],
            None => "",
        }
    }

    /// Paragraphs visible once the first `position` units are revealed.
    ///
    /// Markup never shows up in the output, so a half-revealed tag leaves
    /// no fragment behind. A paragraph appears once its start tag is fully
    /// revealed.
    pub fn render_prefix(&self, position: usize) -> Vec<RevealedParagraph> {
        let revealed = &self.units[..position.min(self.len())];
        let mut paragraphs: Vec<RevealedParagraph> = Vec::new();
        let mut pending_space = false;

        if !self.structured && !revealed.is_empty() {
            paragraphs.push(RevealedParagraph::default());
        }

        for unit in revealed {
            match unit.kind {
                UnitKind::Markup {
                    opens_paragraph: true,
                } => {
                    paragraphs.push(RevealedParagraph::default());
                    pending_space = false;
                }
                UnitKind::Markup { .. } | UnitKind::Gap => {}
                UnitKind::Text { highlight } => {
                    if let Some(paragraph) = paragraphs.last_mut() {
                        paragraph.push(&self.text[unit.range.clone()], highlight, &mut pending_space);
                    }
                }
            }
        }

        paragraphs
    }

    /// Every paragraph, fully revealed
    pub fn paragraphs(&self) -> Vec<RevealedParagraph> {
        self.render_prefix(self.len())
    }
}

fn plain_units(text: &str) -> Vec<Unit> {
    text.grapheme_indices(true)
        .map(|(start, g)| Unit {
            range: start..start + g.len(),
            kind: UnitKind::Text { highlight: false },
        })
        .collect()
}

/// Split into units, or `None` if the markup is absent or malformed
fn tokenize(text: &str) -> Option<Vec<Unit>> {
    if !text.contains(PARAGRAPH_START) && !text.contains(PARAGRAPH_END) {
        return None;
    }

    let mut units = Vec::new();
    let mut in_paragraph = false;
    let mut highlight = false;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some(tag) = Tag::at(rest) {
            match tag {
                Tag::ParagraphStart if in_paragraph => return None,
                Tag::ParagraphStart => in_paragraph = true,
                Tag::ParagraphEnd if !in_paragraph => return None,
                Tag::ParagraphEnd => {
                    in_paragraph = false;
                    highlight = false;
                }
                Tag::HighlightStart if !in_paragraph || highlight => return None,
                Tag::HighlightStart => highlight = true,
                Tag::HighlightEnd if !highlight => return None,
                Tag::HighlightEnd => highlight = false,
            }

            // Tags are ASCII, one unit per byte
            let len = tag.len();
            units.extend((pos..pos + len).map(|i| Unit {
                range: i..i + 1,
                kind: UnitKind::Markup {
                    opens_paragraph: tag == Tag::ParagraphStart && i == pos + len - 1,
                },
            }));
            pos += len;
            continue;
        }

        let run_end = rest
            .match_indices('<')
            .map(|(i, _)| i)
            .find(|&i| i > 0 && Tag::at(&rest[i..]).is_some())
            .unwrap_or(rest.len());

        for (offset, grapheme) in rest[..run_end].grapheme_indices(true) {
            let kind = if in_paragraph {
                UnitKind::Text { highlight }
            } else if grapheme.chars().all(char::is_whitespace) {
                UnitKind::Gap
            } else {
                return None;
            };
            let start = pos + offset;
            units.push(Unit {
                range: start..start + grapheme.len(),
                kind,
            });
        }
        pos += run_end;
    }

    Some(units)
}
