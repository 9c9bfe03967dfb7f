//! Markup interpretation for terminal display.
//!
//! Message bubbles hold markup (escaped user text or trusted assistant
//! HTML). This module turns that markup into styled lines. Only a small
//! inline subset is understood; unknown tags are dropped and their text
//! kept. `<script>` and `<style>` element content is never displayed.
//! Line breaks inside text nodes are kept as line breaks.

use scraper::{ElementRef, Html};

/// Inline style flags for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSpan {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupLine {
    pub spans: Vec<MarkupSpan>,
}

impl MarkupLine {
    /// Concatenated text of the line.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }
}

#[derive(Default)]
struct Builder {
    lines: Vec<MarkupLine>,
    current: MarkupLine,
    bold: usize,
    italic: usize,
    code: usize,
}

impl Builder {
    fn style(&self) -> SpanStyle {
        SpanStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            code: self.code > 0,
        }
    }

    fn push_text(&mut self, text: &str) {
        let mut first = true;
        for part in text.split('\n') {
            if !first {
                self.break_line();
            }
            first = false;
            if part.is_empty() {
                continue;
            }
            let style = self.style();
            match self.current.spans.last_mut() {
                Some(last) if last.style == style => last.text.push_str(part),
                _ => self.current.spans.push(MarkupSpan {
                    text: part.to_string(),
                    style,
                }),
            }
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
    }

    /// Ends the current block: breaks only if the line has content.
    fn end_block(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<MarkupLine> {
        self.end_block();
        while self.lines.first().is_some_and(MarkupLine::is_empty) {
            self.lines.remove(0);
        }
        while self.lines.last().is_some_and(MarkupLine::is_empty) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Interprets markup into styled lines.
pub fn render_markup(markup: &str) -> Vec<MarkupLine> {
    let fragment = Html::parse_fragment(markup);
    let mut builder = Builder::default();
    walk(&mut builder, fragment.root_element());
    builder.finish()
}

fn walk(builder: &mut Builder, element: ElementRef<'_>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            builder.push_text(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            visit(builder, child);
        }
    }
}

fn visit(builder: &mut Builder, element: ElementRef<'_>) {
    match element.value().name() {
        "script" | "style" => {}
        "br" => builder.break_line(),
        "b" | "strong" => {
            builder.bold += 1;
            walk(builder, element);
            builder.bold -= 1;
        }
        "i" | "em" => {
            builder.italic += 1;
            walk(builder, element);
            builder.italic -= 1;
        }
        "code" | "pre" => {
            builder.code += 1;
            walk(builder, element);
            builder.code -= 1;
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            builder.end_block();
            builder.bold += 1;
            walk(builder, element);
            builder.bold -= 1;
            builder.end_block();
        }
        "li" => {
            builder.end_block();
            builder.push_text("• ");
            walk(builder, element);
            builder.end_block();
        }
        "p" | "div" | "ul" | "ol" | "blockquote" | "tr" | "table" => {
            builder.end_block();
            walk(builder, element);
            builder.end_block();
        }
        _ => walk(builder, element),
    }
}
