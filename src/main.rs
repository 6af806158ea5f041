//! recode's entry point.
//! Parses arguments, wires the renderer, processor and formatter together
//! and reports the outcome.

use recode::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    formatter::{Formatter, NoopFormatter},
    helpers::HELPERS,
    processor::{open_input, Applied, Processor},
    renderer::{Renderer, TemplateSpec},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Compiles the template, failing before any input is read
/// 2. Opens the input stream
/// 3. Loads the source and renders the block
/// 4. Prints the block
/// 5. Writes the spliced file and runs the formatter when a label pair exists
fn run(args: Args) -> Result<()> {
    let src = args.source_path()?;
    let spec = TemplateSpec::from_options(&args.row, &args.col, &args.sep);
    let renderer = Renderer::compile(&spec, HELPERS)?;
    log::debug!("Rendering in {:?} mode", renderer.mode());
    let reader = open_input(args.input.as_deref())?;

    let formatter: Box<dyn Formatter> = if args.no_format {
        Box::new(NoopFormatter)
    } else {
        Box::new(args.command_formatter())
    };
    let processor = Processor::new(&renderer, &*formatter, args.label);

    let plan = processor.plan(&src, reader)?;
    println!("{}", plan.block);

    match processor.apply(&plan)? {
        Applied::Skipped => {}
        Applied::Written { format } => {
            println!("recode: updated '{}'", plan.path.display());
            if let Err(e) = format {
                log::warn!("{}", e);
            }
        }
    }
    Ok(())
}
