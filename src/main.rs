use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use specview::app::SpecViewerApp;
use specview::data::model::MetadataEdit;
use specview::data::parser::ErrorPolicy;
use specview::settings::Settings;
use specview::ui::prompt::TerminalPrompt;

#[derive(Parser)]
#[command(
    name = "specview",
    version,
    about = "Inspect, edit and convert two-column spectrum files"
)]
struct Cli {
    /// Settings file (JSON); defaults to $SPECVIEW_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// What to do with rows that are not two numbers
    #[arg(long, global = true, value_enum)]
    on_error: Option<OnError>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnError {
    /// Discard the whole file
    Abort,
    /// Skip the row
    Skip,
    /// Ask on the terminal
    Ask,
}

#[derive(Subcommand)]
enum Command {
    /// Print name, type, point count and labels
    Info { file: PathBuf },
    /// Read a file and write it in the format of the output extension
    Convert { input: PathBuf, output: PathBuf },
    /// Change metadata, then save in place or to --out
    Edit {
        file: PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        file_type: Option<String>,
        #[arg(long)]
        x_label: Option<String>,
        #[arg(long)]
        y_label: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print title, labels and points as JSON for a plotting tool
    Plot { file: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    match cli.on_error {
        Some(OnError::Abort) => settings.on_error = ErrorPolicy::AbortOnError,
        Some(OnError::Skip) => settings.on_error = ErrorPolicy::SkipAndContinue,
        Some(OnError::Ask) | None => {}
    }
    let ask = matches!(cli.on_error, Some(OnError::Ask));

    let mut app = SpecViewerApp::new(settings);
    let open = |app: &mut SpecViewerApp, path: &PathBuf| {
        if ask {
            app.open_with(path, &mut TerminalPrompt::stdio())
        } else {
            app.open(path)
        }
    };

    match cli.command {
        Command::Info { file } => {
            open(&mut app, &file)?;
            println!("{}", app.info());
        }
        Command::Convert { input, output } => {
            open(&mut app, &input)?;
            app.save_as(&output)?;
        }
        Command::Edit {
            file,
            name,
            file_type,
            x_label,
            y_label,
            out,
        } => {
            open(&mut app, &file)?;
            let current = app.edit_form();
            app.edit(MetadataEdit {
                name: name.unwrap_or(current.name),
                file_type: file_type.unwrap_or(current.file_type),
                x_label: x_label.unwrap_or(current.x_label),
                y_label: y_label.unwrap_or(current.y_label),
            });
            match out {
                Some(out) => app.save_as(&out)?,
                None => {
                    let path = app.save()?;
                    log::info!("Wrote {}", path.display());
                }
            }
        }
        Command::Plot { file } => {
            open(&mut app, &file)?;
            println!("{}", serde_json::to_string_pretty(&app.plot_view())?);
        }
    }

    if let Some(msg) = &app.state.status_message {
        log::debug!("{msg}");
    }
    Ok(())
}
