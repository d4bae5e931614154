use std::path::Path;

use clap::{CommandFactory, FromArgMatches};
use tracing::error;

use volley::args::{OutputFormat, TesterArgs};
use volley::config::{apply_config, load_config};
use volley::error::AppResult;
use volley::report::{render_json, render_text, write_summary};
use volley::run_load_test;

pub(crate) fn run() -> AppResult<()> {
    let matches = TesterArgs::command().get_matches();
    let mut args = TesterArgs::from_arg_matches(&matches)?;

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose, args.no_color);

    let config = match args.load_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return Err(err);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let summary = runtime.block_on(run_load_test(&config))?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&summary)),
        OutputFormat::Json => println!("{}", render_json(&summary)?),
    }

    if !args.no_save {
        let path = write_summary(Path::new(&args.output_dir), &config, &summary)?;
        println!("Results saved to {}", path.display());
    }

    Ok(())
}
