use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};

use resume_pdf::model::{Document, DrawOp, PageGeometry};
use resume_pdf::{Error, FontConfig, LayoutConfig};

#[derive(Parser)]
#[command(name = "resume-pdf")]
#[command(version)]
#[command(about = "Lay out a generated plain-text resume as a paginated PDF", long_about = None)]
struct Cli {
    /// Resume text file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output PDF (defaults to the suggested filename next to the input)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "a4")]
    page_size: PageSize,

    /// Font family candidates, separated by `;`
    #[arg(long, value_name = "FAMILY")]
    font: Option<String>,

    /// Print the laid-out draw operations instead of writing a PDF
    #[arg(long)]
    dump: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSize {
    A4,
    Letter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = LayoutConfig {
        geometry: match cli.page_size {
            PageSize::A4 => PageGeometry::a4(),
            PageSize::Letter => PageGeometry::letter(),
        },
        ..LayoutConfig::default()
    };
    let fonts = cli.font.map(FontConfig::new).unwrap_or_default();
    let text = resume_pdf::read_resume_text(&cli.input)?;

    if cli.dump {
        print_document(&resume_pdf::layout_text(&text, &config, &fonts));
        return Ok(());
    }

    let output = cli.output.unwrap_or_else(|| {
        let header = resume_pdf::parse(&text).header;
        cli.input
            .with_file_name(resume_pdf::suggested_filename(&header))
    });
    let bytes = resume_pdf::render_resume(&text, &config, &fonts)?;
    std::fs::write(&output, &bytes)?;
    println!("{}", output.display());
    Ok(())
}

fn print_document(doc: &Document) {
    for (i, page) in doc.pages.iter().enumerate() {
        println!("page {} ({:.2} x {:.2})", i + 1, page.width, page.height);
        for op in &page.ops {
            match op {
                DrawOp::TextRun {
                    text,
                    style,
                    size,
                    x,
                    y,
                    color,
                } => {
                    let color = color
                        .map(|[r, g, b]| format!(" rgb({r},{g},{b})"))
                        .unwrap_or_default();
                    println!("  text {x:7.2} {y:7.2} {style:?} {size}{color} {text:?}");
                }
                DrawOp::Rule {
                    x1,
                    y1,
                    x2,
                    y2,
                    gray,
                } => println!("  rule {x1:7.2} {y1:7.2} -> {x2:7.2} {y2:7.2} gray={gray}"),
                DrawOp::LinkRect { x, y, w, h, url } => {
                    println!("  link {x:7.2} {y:7.2} {w:.2}x{h:.2} {url}")
                }
            }
        }
    }
}
