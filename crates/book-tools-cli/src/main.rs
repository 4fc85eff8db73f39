mod debug;

use anyhow::{Result, bail};
use book_async_runtime::{PaginationUpdate, ProgressThrottle, spawn_pagination};
use book_impose::{ArrangementConfig, MarksPolicy, SheetSize};
use book_paginate::rules::{
    AvoidOrphans, BreakBefore, KeepWithNext, MaxPages, PageNumbering, RunningFooter,
};
use book_paginate::units::parse_length;
use book_paginate::{Book, PageSetup, Paginator, RuleSet, RunContext, TextFlow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bookt", about = "Book pagination and imposition CLI", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flow a text file into pages
    Paginate {
        #[command(flatten)]
        book: BookArgs,

        /// Start paused and read step/pause/resume/finish/cancel from stdin
        #[arg(long)]
        debug: bool,

        /// Print the finished book as JSON
        #[arg(long)]
        json: bool,
    },

    /// Paginate, then impose the pages and write a proof PDF
    Impose {
        #[command(flatten)]
        book: BookArgs,

        #[command(flatten)]
        sheet: SheetArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show imposition statistics without writing anything
    Stats {
        #[command(flatten)]
        book: BookArgs,

        #[command(flatten)]
        sheet: SheetArgs,
    },
}

#[derive(Args)]
struct BookArgs {
    /// Input text file (one line per content unit, `#` lines are headings)
    #[arg(short, long)]
    input: PathBuf,

    /// Page setup JSON file; flags below override it
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Page width (e.g. 4in, 288pt, 100mm)
    #[arg(long, value_parser = length_arg)]
    width: Option<f32>,

    /// Page height
    #[arg(long, value_parser = length_arg)]
    height: Option<f32>,

    /// Uniform margin on all four sides
    #[arg(long, value_parser = length_arg)]
    margin: Option<f32>,

    /// Bleed past the trim edge
    #[arg(long, value_parser = length_arg)]
    bleed: Option<f32>,

    /// Height of one line of content
    #[arg(long, default_value = "12pt", value_parser = length_arg)]
    line_height: f32,

    /// Start a new page before blocks with this tag (repeatable)
    #[arg(long, value_name = "TAG")]
    break_before: Vec<String>,

    /// Never end a page right after a block with this tag (repeatable)
    #[arg(long, value_name = "TAG")]
    keep_with_next: Vec<String>,

    /// Minimum lines of a paragraph on either side of a break
    #[arg(long, value_name = "LINES")]
    orphans: Option<usize>,

    /// First page number
    #[arg(long, default_value = "1")]
    number_from: usize,

    /// Footer template, `{number}` and `{index}` are replaced
    #[arg(long)]
    footer: Option<String>,

    /// Fail if the book grows past this many pages
    #[arg(long)]
    max_pages: Option<usize>,
}

#[derive(Args)]
struct SheetArgs {
    /// Imposition config JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page arrangement
    #[arg(long, value_enum)]
    arrangement: Option<ArrangementArg>,

    /// Fixed output paper size (default: fit the sheet to the pages)
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Output orientation for a fixed paper size
    #[arg(long, default_value = "landscape", value_enum)]
    orientation: OrientationArg,

    /// Printer's marks
    #[arg(long, value_enum)]
    marks: Option<MarksArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ArrangementArg {
    One,
    Two,
    Booklet,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarksArg {
    None,
    Crop,
    Bleed,
    Both,
}

impl From<ArrangementArg> for book_impose::Arrangement {
    fn from(arg: ArrangementArg) -> Self {
        match arg {
            ArrangementArg::One => Self::One,
            ArrangementArg::Two => Self::Two,
            ArrangementArg::Booklet => Self::Booklet,
        }
    }
}

impl From<PaperArg> for book_impose::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for book_impose::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<MarksArg> for MarksPolicy {
    fn from(arg: MarksArg) -> Self {
        match arg {
            MarksArg::None => Self::None,
            MarksArg::Crop => Self::Crop,
            MarksArg::Bleed => Self::Bleed,
            MarksArg::Both => Self::Both,
        }
    }
}

fn length_arg(value: &str) -> std::result::Result<f32, String> {
    parse_length(value).map_err(|e| e.to_string())
}

impl BookArgs {
    async fn page_setup(&self) -> Result<PageSetup> {
        let mut setup = match &self.setup {
            Some(path) => PageSetup::load(path).await?,
            None => PageSetup::default(),
        };
        if let Some(width) = self.width {
            setup.size.width = width;
        }
        if let Some(height) = self.height {
            setup.size.height = height;
        }
        if let Some(margin) = self.margin {
            setup.margin = book_paginate::PageMargins::uniform(margin);
        }
        if let Some(bleed) = self.bleed {
            setup.bleed = bleed;
        }
        Ok(setup)
    }

    fn rules(&self) -> RuleSet {
        let mut rules = RuleSet::new();
        for tag in &self.break_before {
            rules.push(BreakBefore::new(tag.as_str()));
        }
        for tag in &self.keep_with_next {
            rules.push(KeepWithNext::new(tag.as_str()));
        }
        if let Some(lines) = self.orphans {
            rules.push(AvoidOrphans { lines });
        }
        if let Some(limit) = self.max_pages {
            rules.push(MaxPages { limit });
        }
        rules.push(PageNumbering {
            start: self.number_from,
        });
        if let Some(template) = &self.footer {
            rules.push(RunningFooter::new(template.as_str()));
        }
        rules
    }

    /// Read the input; a missing file becomes unavailable content
    async fn flow(&self) -> TextFlow {
        match tokio::fs::read_to_string(&self.input).await {
            Ok(text) => TextFlow::new(&text, self.line_height),
            Err(e) => TextFlow::unavailable(format!(
                "Could not read {}: {}",
                self.input.display(),
                e
            )),
        }
    }

    async fn paginator(&self, context: RunContext) -> Result<Paginator<TextFlow>> {
        let setup = self.page_setup().await?;
        Ok(Paginator::new(
            self.flow().await,
            self.rules(),
            setup,
            context,
        ))
    }
}

impl SheetArgs {
    async fn arrangement_config(&self) -> Result<ArrangementConfig> {
        let mut config = match &self.config {
            Some(path) => ArrangementConfig::load(path).await?,
            None => ArrangementConfig::default(),
        };
        if let Some(arrangement) = self.arrangement {
            config.arrangement = arrangement.into();
        }
        if let Some(paper) = self.paper {
            config.sheet_size = SheetSize::Fixed {
                paper: paper.into(),
                orientation: self.orientation.into(),
            };
        }
        if let Some(marks) = self.marks {
            config.marks = marks.into();
        }
        config.validate()?;
        Ok(config)
    }
}

fn context_for(input: &Path, debug: bool) -> RunContext {
    RunContext {
        debug,
        label: input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "book".to_string()),
    }
}

/// Run a pagination on the async worker, printing throttled progress
async fn run_pagination(paginator: Paginator<TextFlow>) -> Result<Book> {
    let mut handle = spawn_pagination(paginator);
    let mut throttle = ProgressThrottle::default();

    while let Some(update) = handle.next_update().await {
        match update {
            PaginationUpdate::Progress { page_count, .. } => {
                if throttle.should_render() {
                    eprintln!("  {} pages...", page_count);
                }
            }
            PaginationUpdate::Completed { book } => return Ok(book),
            PaginationUpdate::Failed { reason } => bail!("Pagination failed: {}", reason),
            PaginationUpdate::Cancelled => bail!("Pagination cancelled"),
            _ => {}
        }
    }
    bail!("Pagination worker stopped without a result")
}

fn print_book(book: &Book) {
    println!("Pages: {}", book.len());
    for page in book.pages() {
        let range = page.content_range();
        match &page.footer {
            Some(footer) => println!(
                "  page {:>3}: lines {}..{}  [{}]",
                page.number, range.start, range.end, footer
            ),
            None => println!("  page {:>3}: lines {}..{}", page.number, range.start, range.end),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Paginate { book, debug, json } => {
            let paginator = book.paginator(context_for(&book.input, debug)).await?;
            let result = if debug {
                debug::run_interactive(paginator).await?
            } else {
                Some(run_pagination(paginator).await?)
            };

            let Some(result) = result else {
                println!("Cancelled");
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_book(&result);
            }
        }

        Commands::Impose {
            book,
            sheet,
            output,
        } => {
            let config = sheet.arrangement_config().await?;
            let paginator = book.paginator(context_for(&book.input, false)).await?;
            let result = run_pagination(paginator).await?;

            let plan = book_impose::impose(&result, &config)?;
            println!(
                "Imposed {} pages onto {} sheets ({} faces, {} blank)",
                plan.source_pages,
                plan.sheet_count(),
                plan.face_count(),
                plan.blank_count()
            );

            let doc = book_impose::render_proof(&plan, &result)?;
            book_impose::save_pdf(doc, &output).await?;
            println!("Proof → {}", output.display());
        }

        Commands::Stats { book, sheet } => {
            let config = sheet.arrangement_config().await?;
            let paginator = book.paginator(context_for(&book.input, false)).await?;
            let result = run_pagination(paginator).await?;

            let stats = book_impose::calculate_statistics(&result, &config)?;
            println!("Imposition Statistics:");
            println!("  Source pages: {}", stats.source_pages);
            println!("  Padded pages: {}", stats.padded_pages);
            println!("  Output sheets: {}", stats.output_sheets);
            println!("  Output faces: {}", stats.output_faces);
            println!("  Blank pages added: {}", stats.blank_pages_added);
        }
    }

    Ok(())
}
