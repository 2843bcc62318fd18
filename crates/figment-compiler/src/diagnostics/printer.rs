//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::Severity;
use crate::source::SourceMap;

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    sources: Option<&'s SourceMap>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            sources: None,
            colored: false,
        }
    }

    /// Render snippets from these documents. Without it, output is one line per message.
    pub fn sources(mut self, sources: &'s SourceMap) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(sources) = self.sources else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let span = diag.span();
            let content = sources.content(span.source);

            let mut snippet = Snippet::source(content)
                .line_start(1)
                .path(sources.path(span.source))
                .annotation(
                    AnnotationKind::Primary
                        .span(adjust_range(span.range, content.len()))
                        .label(diag.message()),
                );

            // Related locations in other documents get their own snippet.
            let mut foreign = Vec::new();
            for related in diag.related() {
                let related_span = related.location.span;
                if related_span.source == span.source {
                    snippet = snippet.annotation(
                        AnnotationKind::Context
                            .span(adjust_range(related_span.range, content.len()))
                            .label(related.message()),
                    );
                } else {
                    let related_content = sources.content(related_span.source);
                    foreign.push(
                        Snippet::source(related_content)
                            .line_start(1)
                            .path(sources.path(related_span.source))
                            .annotation(
                                AnnotationKind::Context
                                    .span(adjust_range(
                                        related_span.range,
                                        related_content.len(),
                                    ))
                                    .label(related.message()),
                            ),
                    );
                }
            }

            let level = severity_to_level(diag.severity());
            let mut group = level.primary_title(diag.message()).element(snippet);
            for extra in foreign {
                group = group.element(extra);
            }
            let report: Vec<Group> = vec![group];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag)?;
        }
        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
