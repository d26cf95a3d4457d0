use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use vite_require_context::{inspect, transform_file, Options, Pattern};

#[derive(StructOpt)]
#[structopt(about = "Expand require.context() calls into static imports")]
enum Commands {
    /// Rewrite a module and print or write the result
    Transform {
        /// Project base path, defaults to the working directory
        #[structopt(short, long, parse(from_os_str))]
        base: Option<PathBuf>,

        /// Pattern applied when a call omits its third parameter
        #[structopt(short, long)]
        pattern: Option<String>,

        /// Write the result to a file instead of stdout
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,

        /// Module to transform
        #[structopt(parse(from_os_str))]
        module: PathBuf,
    },

    /// Print the directive occurrences of a module as JSON
    Inspect {
        /// Project base path, defaults to the working directory
        #[structopt(short, long, parse(from_os_str))]
        base: Option<PathBuf>,

        /// Module to inspect
        #[structopt(parse(from_os_str))]
        module: PathBuf,
    },
}

fn options(base: Option<PathBuf>, pattern: Option<String>) -> Result<Options> {
    let mut options = Options::default();
    if let Some(base) = base {
        options.project_base_path = base.canonicalize()?;
    }
    if let Some(pattern) = pattern {
        options.default_reg_exp = Pattern::new(&pattern)?;
    }
    Ok(options)
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").ok().is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = Commands::from_args();
    match args {
        Commands::Transform {
            base,
            pattern,
            output,
            module,
        } => transform_file(module, options(base, pattern)?, output)?,
        Commands::Inspect { base, module } => {
            inspect(module, options(base, None)?)?
        }
    }
    Ok(())
}
