use clap::Parser;
use rch_core::{load_alias_config, render_tree, AliasTable, BuildOptions, PrintOptions, TreeBuilder};
use rch_logger::Logger;
use std::{fs::File, path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
#[command(version, about = "Prints the component hierarchy of a React application", long_about = None)]
struct Args {
    /// Root component file
    root: PathBuf,

    /// Alias configuration (json or webpack config) with a resolve.alias section
    #[arg(short, long, value_name = "CONFIG")]
    aliasing: Option<PathBuf>,

    /// Show the wrapped component in place of containers, marked with (*)
    #[arg(short = 'c', long)]
    hide_containers: bool,

    /// Depth of the tree to scan, unlimited by default
    #[arg(short = 'd', long, value_name = "N")]
    scan_depth: Option<usize>,

    /// Write the tree to a json file instead of printing it
    #[arg(short, long)]
    json: bool,

    /// Output file name for --json
    #[arg(long, default_value = "data")]
    file_name: String,

    /// Secondary directory to look for modules in
    #[arg(short, long, value_name = "DIR")]
    module_dir: Option<PathBuf>,

    /// Hide components that could not be found, usually third party ones
    #[arg(short = 't', long)]
    hide_third_party: bool,

    /// Verbosity level (-l = level 1, -ll = level 2, etc.)
    #[arg(short = 'l', action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();

    Logger::set_level(args.verbosity);

    let current_dir = std::env::current_dir()?;

    let alias = match &args.aliasing {
        Some(path) => load_alias_config(&current_dir.join(path)).unwrap_or_else(|e| {
            Logger::warn(&format!("{}, continuing without aliases", e));
            AliasTable::new()
        }),
        None => AliasTable::new(),
    };

    let mut options = BuildOptions::new(current_dir.clone())
        .with_alias(alias)
        .with_hide_third_party(args.hide_third_party);
    if let Some(scan_depth) = args.scan_depth {
        options = options.with_scan_depth(scan_depth);
    }
    if let Some(module_dir) = args.module_dir {
        options = options.with_module_dir(module_dir);
    }

    Logger::loading(&format!("Scanning {}", args.root.display()));
    let tree = TreeBuilder::new(options).build(&args.root);
    Logger::done_loading();

    for error in &tree.errors {
        Logger::error(&error.to_string());
    }

    if tree.is_empty() {
        Logger::error("Could not find any components. Did you process the right file?");
        return Ok(ExitCode::FAILURE);
    }

    if args.json {
        let output_path_with_extension = current_dir.join(format!("{}.json", args.file_name));

        Logger::info(&format!(
            "Writing tree to: {}",
            output_path_with_extension.display()
        ));

        let file = File::create(output_path_with_extension)?;
        serde_json::to_writer_pretty(file, &tree.root)?;
    } else {
        let print_options = PrintOptions {
            hide_containers: args.hide_containers,
        };
        print!("{}", render_tree(&tree.root, &print_options));
    }

    Ok(ExitCode::SUCCESS)
}
