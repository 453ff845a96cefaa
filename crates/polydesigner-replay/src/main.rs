//! Replay a session script against a fresh editor and print the resulting shapes.
//!
//! ```text
//! polydesigner-replay <script.pds> [--dir DIR] [--load] [--save]
//! ```
//!
//! `--dir` (or `POLYDESIGNER_DIR`) picks the shape file directory, `--load`
//! reads existing shape files before the script runs and `--save` writes every
//! slot afterwards.

use camino::Utf8PathBuf;
use miette::{IntoDiagnostic, Result, WrapErr};
use polydesigner::{Editor, EditorConfig};

struct Args {
    script: Utf8PathBuf,
    dir: Option<Utf8PathBuf>,
    load: bool,
    save: bool,
}

fn usage() -> ! {
    eprintln!("Usage: polydesigner-replay <script.pds> [--dir DIR] [--load] [--save]");
    std::process::exit(2);
}

fn parse_args() -> Result<Args> {
    let mut script = None;
    let mut dir = None;
    let mut load = false;
    let mut save = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dir" => match args.next() {
                Some(d) => dir = Some(Utf8PathBuf::from(d)),
                None => miette::bail!("--dir needs a directory"),
            },
            "--load" => load = true,
            "--save" => save = true,
            "-h" | "--help" => usage(),
            other if other.starts_with("--") => miette::bail!("unknown option {}", other),
            other => {
                if script.replace(Utf8PathBuf::from(other)).is_some() {
                    miette::bail!("only one script can be replayed at a time");
                }
            }
        }
    }

    let Some(script) = script else { usage() };
    Ok(Args {
        script,
        dir,
        load,
        save,
    })
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the shape summary
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let source = std::fs::read_to_string(&args.script)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.script))?;

    let mut config = EditorConfig::from_env().with_autoload(args.load);
    if let Some(dir) = &args.dir {
        config = config.with_storage_dir(dir.as_std_path());
    }
    let mut editor = Editor::open(config);

    polydesigner::run_script(args.script.as_str(), &source, &mut editor)?;
    tracing::info!(script = %args.script, "replay finished");

    if args.save {
        editor.save_all()?;
        tracing::info!(dir = %editor.storage().dir().display(), "saved all shapes");
    }

    for (slot, shape) in editor.store().iter().filter(|(_, s)| !s.is_empty()) {
        let props = shape.properties();
        print!(
            "shape {:2}: {:2} vertices, area {:10.4} ({})",
            slot,
            props.valid_vertices,
            props.area,
            props.winding()
        );
        match props.centroid {
            Some(c) => println!(", centroid ({:.4}, {:.4})", c.x, c.y),
            None => println!(),
        }
    }
    println!("{}", editor.status_line());
    Ok(())
}
