//! Corpus driver: walks the proofread page files in order and turns their
//! lines into records.
//!
//! Each page file is a sequence of lines of four kinds:
//!
//! ```text
//! # Date: 1943-12-15 Page: 1234567/[11]     directive, sets page context
//! Müller, Hans, Bahnhofstr. 5 [12345]       data line
//! — Peter, Marktg. 3                        continuation, same family
//!                                           blank, ignored
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Cursor, Lines};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AddrbookError, CorpusError, Result};
use crate::extract::patterns::PAGE_DIRECTIVE;
use crate::models::{resolve_publication_date, FamilyName, PageContext, Record};
use crate::pipeline::LineParser;
use crate::stats::Statistics;

/// Glyphs that mark a continuation line.
pub const CONTINUATION_MARKS: [char; 3] = ['—', '–', '-'];

/// Classification of one trimmed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// A `#` line.
    Directive(&'a str),
    /// Text after the continuation mark.
    Continuation(&'a str),
    Data(&'a str),
}

/// Classify a line of a page file.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('#') {
        return LineKind::Directive(line);
    }
    match line.strip_prefix(CONTINUATION_MARKS) {
        Some(rest) => LineKind::Continuation(rest.trim()),
        None => LineKind::Data(line),
    }
}

/// Parse a `# Date: ... Page: id/label` directive.
pub fn parse_directive(line: &str) -> Option<PageContext> {
    let caps = PAGE_DIRECTIVE.captures(line.trim())?;
    let date = resolve_publication_date(&caps[1])?;
    let page_id = caps[2].parse().ok()?;
    Some(PageContext::new(date, page_id, &caps[3]))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageState {
    AwaitingDirective,
    InPage(PageContext),
}

/// Page-level state machine feeding lines to the [`LineParser`].
///
/// Holds the current page context and the family name carried over to
/// continuation lines. Both are cleared by every directive and at the start
/// of every file.
pub struct RecordAssembler<'d> {
    parser: LineParser<'d>,
    state: PageState,
    family: Option<FamilyName>,
}

impl<'d> RecordAssembler<'d> {
    pub fn new(parser: LineParser<'d>) -> Self {
        Self {
            parser,
            state: PageState::AwaitingDirective,
            family: None,
        }
    }

    /// Reset before the first line of a new file.
    pub fn start_file(&mut self) {
        self.state = PageState::AwaitingDirective;
        self.family = None;
    }

    pub fn context(&self) -> Option<&PageContext> {
        match &self.state {
            PageState::InPage(ctx) => Some(ctx),
            PageState::AwaitingDirective => None,
        }
    }

    /// Family name that the next continuation line would inherit.
    pub fn carried_family(&self) -> Option<&FamilyName> {
        self.family.as_ref()
    }

    /// Process one raw line. `path` and `line_num` only label errors.
    pub fn process_line(
        &mut self,
        line: &str,
        path: &Path,
        line_num: usize,
        stats: &mut Statistics,
    ) -> std::result::Result<Option<Record>, CorpusError> {
        let kind = classify_line(line);

        if let LineKind::Directive(text) = kind {
            let ctx = parse_directive(text).ok_or_else(|| CorpusError::Directive {
                path: path.to_path_buf(),
                line: line_num,
                text: text.to_string(),
            })?;
            debug!("Page {} ({}) dated {}", ctx.page_label, ctx.page_id, ctx.date);
            self.state = PageState::InPage(ctx);
            self.family = None;
            return Ok(None);
        }
        if kind == LineKind::Blank {
            return Ok(None);
        }

        let PageState::InPage(ctx) = &self.state else {
            return Err(CorpusError::MissingDirective {
                path: path.to_path_buf(),
                line: line_num,
            });
        };

        stats.lines += 1;
        let parsed = match kind {
            LineKind::Continuation(rest) => {
                self.parser
                    .parse_continuation_line(ctx, rest, self.family.as_ref(), stats)
            }
            LineKind::Data(text) => {
                let parsed = self.parser.parse_data_line(ctx, text, stats);
                self.family = parsed.family.clone();
                parsed
            }
            LineKind::Blank | LineKind::Directive(_) => return Ok(None),
        };

        let record = self.parser.assemble(ctx, parsed);
        if record.is_some() {
            stats.records += 1;
        }
        Ok(record)
    }
}

/// A page file, or page text held in memory.
#[derive(Debug, Clone)]
pub enum PageSource {
    File(PathBuf),
    Text { name: String, text: String },
}

impl PageSource {
    fn path(&self) -> PathBuf {
        match self {
            PageSource::File(path) => path.clone(),
            PageSource::Text { name, .. } => PathBuf::from(name),
        }
    }

    fn open(self) -> std::result::Result<OpenPage, CorpusError> {
        let path = self.path();
        let reader: Box<dyn BufRead> = match self {
            PageSource::File(path) => {
                let file = File::open(&path).map_err(|source| CorpusError::Io {
                    path: path.clone(),
                    source,
                })?;
                Box::new(BufReader::new(file))
            }
            PageSource::Text { text, .. } => Box::new(Cursor::new(text)),
        };
        Ok(OpenPage {
            path,
            lines: reader.lines(),
            line_num: 0,
        })
    }
}

struct OpenPage {
    path: PathBuf,
    lines: Lines<Box<dyn BufRead>>,
    line_num: usize,
}

/// An ordered set of page files.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pages: Vec<PageSource>,
}

impl Corpus {
    /// Collect the `.txt` files of a directory in name order, optionally
    /// keeping only those whose name starts with `year`.
    pub fn from_dir(dir: &Path, year: Option<i32>) -> Result<Self> {
        if !dir.is_dir() {
            return Err(AddrbookError::Config(format!(
                "input directory not found: {}",
                dir.display()
            )));
        }

        let year_prefix = year.map(|y| format!("{:04}", y));
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("txt"))
            .filter(|path| match (&year_prefix, path.file_name().and_then(|n| n.to_str())) {
                (Some(prefix), Some(name)) => name.starts_with(prefix.as_str()),
                (Some(_), None) => false,
                (None, _) => true,
            })
            .collect();
        paths.sort();

        info!("Found {} page files in {}", paths.len(), dir.display());
        Ok(Self::from_files(paths))
    }

    /// Use the given files in the given order.
    pub fn from_files(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pages: paths.into_iter().map(PageSource::File).collect(),
        }
    }

    /// Use in-memory page texts, each labelled with a name for errors.
    pub fn from_texts<N, T>(texts: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        Self {
            pages: texts
                .into_iter()
                .map(|(name, text)| PageSource::Text {
                    name: name.into(),
                    text: text.into(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Stream the records of all pages through `parser`.
    pub fn records(self, parser: LineParser<'_>) -> RecordStream<'_> {
        RecordStream {
            assembler: RecordAssembler::new(parser),
            stats: Statistics::new(),
            pages: self.pages.into_iter(),
            current: None,
            failed: false,
        }
    }
}

/// Lazy, single-pass sequence of records.
///
/// Stops after the first error. Statistics are complete once the stream
/// is drained.
pub struct RecordStream<'d> {
    assembler: RecordAssembler<'d>,
    stats: Statistics,
    pages: std::vec::IntoIter<PageSource>,
    current: Option<OpenPage>,
    failed: bool,
}

impl RecordStream<'_> {
    /// Final statistics.
    pub fn into_statistics(self) -> Statistics {
        self.stats
    }

    fn fail(&mut self, err: impl Into<AddrbookError>) -> Option<Result<Record>> {
        self.failed = true;
        self.current = None;
        Some(Err(err.into()))
    }
}

impl Iterator for RecordStream<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            let Some(page) = self.current.as_mut() else {
                let source = self.pages.next()?;
                match source.open() {
                    Ok(page) => {
                        debug!("Processing {}", page.path.display());
                        self.assembler.start_file();
                        self.current = Some(page);
                    }
                    Err(e) => return self.fail(e),
                }
                continue;
            };

            let line = match page.lines.next() {
                None => {
                    self.current = None;
                    continue;
                }
                Some(Err(source)) => {
                    let path = page.path.clone();
                    return self.fail(CorpusError::Io { path, source });
                }
                Some(Ok(line)) => line,
            };
            page.line_num += 1;

            match self
                .assembler
                .process_line(&line, &page.path, page.line_num, &mut self.stats)
            {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return self.fail(e),
            }
        }
    }
}
